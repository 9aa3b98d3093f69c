//! # RestEntity Trait
//!
//! The `RestEntity` trait defines the contract every record type (Customer, KycCase, …)
//! implements to be served by the generic [`ResourceClient`](crate::ResourceClient).
//! It names the REST resource, the partial-update DTO, and exposes the identity that
//! drives create-vs-update dispatch and collection reconciliation.
//!
//! # Identity
//! The backend assigns a numeric id. A record whose id is `None` is *new*; one with an
//! id is *persisted*. There is deliberately no other state flag.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Backend-assigned numeric identity.
pub type EntityId = i64;

/// Anything that exposes an (optional) entity id.
///
/// Implemented by entities, by their partial-update DTOs and by the `Pick<id>`-style
/// references used in tests. Reconciliation and identity comparison only need this.
pub trait Identified {
    fn identity(&self) -> Option<EntityId>;
}

impl<T: Identified + ?Sized> Identified for &T {
    fn identity(&self) -> Option<EntityId> {
        (**self).identity()
    }
}

impl<T: Identified + ?Sized> Identified for Box<T> {
    fn identity(&self) -> Option<EntityId> {
        (**self).identity()
    }
}

/// Trait that any record type must implement to be managed by a `ResourceClient`.
///
/// # Architecture Note
/// By defining one contract for all seven record types we write the HTTP mapping,
/// the list loading and the save flow *once*. Associated items keep it type-safe:
/// a `KycCase` client only accepts `KycCasePatch` for PATCH requests.
///
/// # Wire format
/// Serialization goes through `serde`. Date-time fields are `chrono::DateTime<Utc>`
/// (ISO-8601 on the wire) and optional fields stay `null` rather than defaulting.
pub trait RestEntity:
    Identified + Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Resource path relative to the API root, e.g. `api/kyc-cases`.
    const RESOURCE: &'static str;

    /// Short name used in logs, e.g. `KycCase`.
    const NAME: &'static str;

    /// Merge-patch payload: the id plus only the fields that change.
    type Patch: Identified + Serialize + Debug + Send + Sync;

    /// `true` while the record has not been persisted yet.
    fn is_new(&self) -> bool {
        self.identity().is_none()
    }
}

/// Id-based equality for selection purposes.
///
/// Two references are the same iff both are present with equal ids, or both are
/// absent. A present reference never equals an absent one, and two unsaved records
/// are never the same.
pub fn same_identity<A: Identified, B: Identified>(a: Option<&A>, b: Option<&B>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => matches!((a.identity(), b.identity()), (Some(x), Some(y)) if x == y),
        (None, None) => true,
        _ => false,
    }
}

/// Minimal identity-only reference (`{ id: 7713 }`), handy for relationship
/// selections and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
pub struct IdRef {
    pub id: EntityId,
}

impl IdRef {
    pub fn new(id: EntityId) -> Self {
        Self { id }
    }
}

impl Identified for IdRef {
    fn identity(&self) -> Option<EntityId> {
        Some(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_identity_is_true_for_equal_ids_in_both_orders() {
        let a = IdRef::new(7713);
        let b = IdRef::new(7713);
        assert!(same_identity(Some(&a), Some(&b)));
        assert!(same_identity(Some(&b), Some(&a)));
    }

    #[test]
    fn same_identity_is_false_for_different_ids_in_both_orders() {
        let a = IdRef::new(7713);
        let b = IdRef::new(21337);
        assert!(!same_identity(Some(&a), Some(&b)));
        assert!(!same_identity(Some(&b), Some(&a)));
    }

    #[test]
    fn same_identity_against_absent_reference() {
        let a = IdRef::new(7713);
        assert!(!same_identity(Some(&a), None::<&IdRef>));
        assert!(!same_identity(None::<&IdRef>, Some(&a)));
        assert!(same_identity(None::<&IdRef>, None::<&IdRef>));
    }

    struct Draft {
        id: Option<EntityId>,
    }

    impl Identified for Draft {
        fn identity(&self) -> Option<EntityId> {
            self.id
        }
    }

    #[test]
    fn unsaved_records_are_never_the_same() {
        let first = Draft { id: None };
        let second = Draft { id: None };
        assert!(!same_identity(Some(&first), Some(&second)));
        assert!(!same_identity(Some(&first), Some(&first)));
        assert!(!same_identity(Some(&first), Some(&IdRef::new(1))));
        assert!(!same_identity(Some(&IdRef::new(1)), Some(&first)));
    }
}
