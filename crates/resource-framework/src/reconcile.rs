//! Collection reconciliation: merge "currently selected" values into a fetched
//! option list without duplicating ids.

use crate::entity::{EntityId, Identified};
use std::collections::HashSet;

/// Prepends every candidate whose id is not already in `collection`.
///
/// `None` candidates are ignored. When nothing is left to merge the input vector is
/// returned as-is (same allocation). Otherwise each candidate is kept the first time
/// its id is seen and the kept ones are placed, in the given order, before the
/// existing items, whose relative order is untouched.
pub fn add_to_collection_if_missing<T, I>(collection: Vec<T>, candidates: I) -> Vec<T>
where
    T: Identified,
    I: IntoIterator<Item = Option<T>>,
{
    let candidates: Vec<T> = candidates.into_iter().flatten().collect();
    if candidates.is_empty() {
        return collection;
    }

    let mut seen: HashSet<Option<EntityId>> =
        collection.iter().map(Identified::identity).collect();
    let mut merged: Vec<T> = candidates
        .into_iter()
        .filter(|item| seen.insert(item.identity()))
        .collect();

    if merged.is_empty() {
        return collection;
    }
    merged.extend(collection);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::IdRef;

    fn ids(items: &[IdRef]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn adds_missing_item_in_front() {
        let collection = vec![IdRef::new(1342)];
        let result = add_to_collection_if_missing(collection, [Some(IdRef::new(7713))]);
        assert_eq!(ids(&result), vec![7713, 1342]);
    }

    #[test]
    fn already_present_items_do_not_change_length_or_order() {
        let collection = vec![IdRef::new(1), IdRef::new(2), IdRef::new(3)];
        let result =
            add_to_collection_if_missing(collection, [Some(IdRef::new(2)), Some(IdRef::new(3))]);
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn nulls_are_ignored() {
        let with_nulls = add_to_collection_if_missing(
            vec![IdRef::new(1)],
            [None, Some(IdRef::new(5)), None, Some(IdRef::new(6))],
        );
        let without_nulls =
            add_to_collection_if_missing(vec![IdRef::new(1)], [Some(IdRef::new(5)), Some(IdRef::new(6))]);
        assert_eq!(with_nulls, without_nulls);
    }

    #[test]
    fn empty_collection_keeps_candidate_order() {
        let result =
            add_to_collection_if_missing(Vec::new(), [Some(IdRef::new(10)), Some(IdRef::new(20))]);
        assert_eq!(ids(&result), vec![10, 20]);
    }

    #[test]
    fn duplicate_candidates_are_kept_once() {
        let result = add_to_collection_if_missing(
            vec![IdRef::new(1)],
            [Some(IdRef::new(9)), Some(IdRef::new(9)), Some(IdRef::new(1))],
        );
        assert_eq!(ids(&result), vec![9, 1]);
    }

    #[test]
    fn no_candidates_returns_same_allocation() {
        let collection = vec![IdRef::new(1), IdRef::new(2)];
        let ptr = collection.as_ptr();
        let result = add_to_collection_if_missing(collection, [None, None]);
        assert_eq!(result.as_ptr(), ptr);
    }
}
