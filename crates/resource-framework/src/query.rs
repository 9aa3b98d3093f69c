//! Request options for collection queries, flattened into URL query pairs.

use crate::sort::{build_sort_param, SortState};

/// Options accepted by `ResourceClient::query`.
///
/// ```
/// use resource_framework::{RequestOptions, SortOrder, SortState};
///
/// let options = RequestOptions::new()
///     .page(0)
///     .size(20)
///     .sort(&SortState::new("id", SortOrder::Asc))
///     .specified("kycCaseId", false);
/// assert_eq!(
///     options.to_pairs(),
///     vec![
///         ("page".to_string(), "0".to_string()),
///         ("size".to_string(), "20".to_string()),
///         ("sort".to_string(), "id,asc".to_string()),
///         ("kycCaseId.specified".to_string(), "false".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    page: Option<u32>,
    size: Option<u32>,
    sort: Vec<String>,
    filters: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based page index.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Adds a sort token; inactive states are skipped.
    pub fn sort(mut self, state: &SortState) -> Self {
        if let Some(token) = build_sort_param(state) {
            self.sort.push(token);
        }
        self
    }

    /// Relationship existence filter, e.g. `kycCaseId.specified=false`.
    pub fn specified(self, field: &str, specified: bool) -> Self {
        self.param(format!("{field}.specified"), specified.to_string())
    }

    /// Named backend filter, e.g. `filter=kyccase-is-null`.
    pub fn filter(self, name: &str) -> Self {
        self.param("filter", name)
    }

    /// Arbitrary criteria parameter (`status.equals=APPROVED`, …).
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        pairs.extend(self.sort.iter().map(|s| ("sort".to_string(), s.clone())));
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortOrder;

    #[test]
    fn empty_options_produce_no_pairs() {
        assert!(RequestOptions::new().to_pairs().is_empty());
    }

    #[test]
    fn inactive_sort_is_omitted() {
        let pairs = RequestOptions::new().sort(&SortState::default()).to_pairs();
        assert!(pairs.is_empty());
    }

    #[test]
    fn sort_is_repeatable_and_filters_keep_order() {
        let pairs = RequestOptions::new()
            .sort(&SortState::new("status", SortOrder::Desc))
            .sort(&SortState::new("id", SortOrder::Asc))
            .filter("kyccase-is-null")
            .to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("sort".into(), "status,desc".into()),
                ("sort".into(), "id,asc".into()),
                ("filter".into(), "kyccase-is-null".into()),
            ]
        );
    }
}
