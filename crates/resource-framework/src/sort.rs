//! # Sort State
//!
//! Parses and builds the `field,direction` sort token carried in list URLs and turns
//! it into a comparator over any [`Sortable`] record.

use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// The other direction; used when a column header is clicked twice.
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current list ordering. Both halves absent means "backend order".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub predicate: Option<String>,
    pub order: Option<SortOrder>,
}

impl SortState {
    pub fn new(predicate: impl Into<String>, order: SortOrder) -> Self {
        Self {
            predicate: Some(predicate.into()),
            order: Some(order),
        }
    }

    /// `true` when a client-side sort should be applied.
    pub fn is_active(&self) -> bool {
        self.predicate.is_some() && self.order.is_some()
    }
}

/// Parses a `field,asc|desc` token. Anything else yields an empty state.
pub fn parse_sort_param(token: Option<&str>) -> SortState {
    let Some((field, direction)) = token.and_then(|t| t.split_once(',')) else {
        return SortState::default();
    };
    let field = field.trim();
    let order = match direction.trim() {
        "asc" => SortOrder::Asc,
        "desc" => SortOrder::Desc,
        _ => return SortState::default(),
    };
    if field.is_empty() {
        return SortState::default();
    }
    SortState::new(field, order)
}

/// Inverse of [`parse_sort_param`]; an inactive state produces no parameter.
pub fn build_sort_param(state: &SortState) -> Option<String> {
    match (&state.predicate, state.order) {
        (Some(predicate), Some(order)) => Some(format!("{predicate},{order}")),
        _ => None,
    }
}

/// Typed value of a single field, as seen by the comparator.
///
/// Variants only compare meaningfully against the same variant; mixed comparisons
/// fall back to variant order so sorting stays total.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Absent,
    Bool(bool),
    Int(i64),
    Decimal(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Absent => 0,
            SortKey::Bool(_) => 1,
            SortKey::Int(_) => 2,
            SortKey::Decimal(_) => 3,
            SortKey::Text(_) => 4,
            SortKey::Date(_) => 5,
            SortKey::Timestamp(_) => 6,
        }
    }

    /// Total order used by the comparator. Text compares case-insensitively first,
    /// then by raw value, so `alice` and `Alice` stay adjacent.
    ///
    /// This approximates a locale collation: lowercase folding is Unicode aware, but
    /// accented letters order by code point (`é` after `z`), not next to their base
    /// letter.
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Decimal(a), SortKey::Decimal(b)) => a.total_cmp(b),
            (SortKey::Int(a), SortKey::Decimal(b)) => (*a as f64).total_cmp(b),
            (SortKey::Decimal(a), SortKey::Int(b)) => a.total_cmp(&(*b as f64)),
            (SortKey::Text(a), SortKey::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Timestamp(a), SortKey::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<i64> for SortKey {
    fn from(v: i64) -> Self {
        SortKey::Int(v)
    }
}

impl From<bool> for SortKey {
    fn from(v: bool) -> Self {
        SortKey::Bool(v)
    }
}

impl From<&str> for SortKey {
    fn from(v: &str) -> Self {
        SortKey::Text(v.to_string())
    }
}

impl From<&String> for SortKey {
    fn from(v: &String) -> Self {
        SortKey::Text(v.clone())
    }
}

impl From<DateTime<Utc>> for SortKey {
    fn from(v: DateTime<Utc>) -> Self {
        SortKey::Timestamp(v)
    }
}

impl From<Option<i64>> for SortKey {
    fn from(v: Option<i64>) -> Self {
        v.map_or(SortKey::Absent, SortKey::Int)
    }
}

impl From<Option<i32>> for SortKey {
    fn from(v: Option<i32>) -> Self {
        v.map_or(SortKey::Absent, |v| SortKey::Int(v.into()))
    }
}

impl From<Option<bool>> for SortKey {
    fn from(v: Option<bool>) -> Self {
        v.map_or(SortKey::Absent, SortKey::Bool)
    }
}

impl From<Option<&str>> for SortKey {
    fn from(v: Option<&str>) -> Self {
        v.map_or(SortKey::Absent, |s| SortKey::Text(s.to_string()))
    }
}

impl From<Option<&String>> for SortKey {
    fn from(v: Option<&String>) -> Self {
        v.map(String::as_str).into()
    }
}

impl From<Option<DateTime<Utc>>> for SortKey {
    fn from(v: Option<DateTime<Utc>>) -> Self {
        v.map_or(SortKey::Absent, SortKey::Timestamp)
    }
}

impl From<Option<NaiveDate>> for SortKey {
    fn from(v: Option<NaiveDate>) -> Self {
        v.map_or(SortKey::Absent, SortKey::Date)
    }
}

/// Records that can be ordered by a named field.
pub trait Sortable {
    /// The value of `field` (wire name) as a sort key; unknown fields are `Absent`.
    fn sort_key(&self, field: &str) -> SortKey;
}

/// Comparator for `state`, or `None` when no client-side sort applies.
///
/// `desc` reverses the field ordering. Use it with `slice::sort_by`, which is stable,
/// so equal keys keep their backend order.
pub fn comparator_for<T: Sortable>(state: &SortState) -> Option<impl Fn(&T, &T) -> Ordering> {
    let predicate = state.predicate.clone()?;
    let order = state.order?;
    Some(move |a: &T, b: &T| {
        let ordering = a.sort_key(&predicate).compare(&b.sort_key(&predicate));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    })
}

/// Sorts `items` in place when `state` is active; returns whether it did.
pub fn apply_sort<T: Sortable>(items: &mut [T], state: &SortState) -> bool {
    match comparator_for::<T>(state) {
        Some(cmp) => {
            items.sort_by(cmp);
            true
        }
        None => false,
    }
}
