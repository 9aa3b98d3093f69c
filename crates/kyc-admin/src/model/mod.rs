//! # KYC Records
//!
//! Wire models of the seven KYC resources. Every field is optional on the wire, so a
//! reference nested in another record (`{"id": 7}`) decodes into the same type as a
//! full record. Each record implements [`RestEntity`](resource_framework::RestEntity)
//! and [`Sortable`](resource_framework::Sortable); its `*Patch` type carries the id
//! plus the fields a merge-patch should touch.

/// Declares a merge-patch DTO: the id plus optional fields that are left out of the
/// JSON body when `None`.
macro_rules! patch {
    ($(#[$meta:meta])* $name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub id: resource_framework::EntityId,
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $name {
            pub fn new(id: resource_framework::EntityId) -> Self {
                Self {
                    id,
                    ..Default::default()
                }
            }
        }

        impl resource_framework::Identified for $name {
            fn identity(&self) -> Option<resource_framework::EntityId> {
                Some(self.id)
            }
        }
    };
}

pub mod cdms_submission;
pub mod customer;
pub mod customer_identifier;
pub mod enums;
pub mod kyc_case;
pub mod kyc_consent;
pub mod kyc_document;
pub mod kyc_notification;

pub use cdms_submission::*;
pub use customer::*;
pub use customer_identifier::*;
pub use enums::*;
pub use kyc_case::*;
pub use kyc_consent::*;
pub use kyc_document::*;
pub use kyc_notification::*;
