//! # KYC Clients
//!
//! One typed client per KYC resource. Each wraps a
//! [`ResourceClient`](resource_framework::ResourceClient), inherits the CRUD calls from
//! [`EntityClient`](resource_framework::EntityClient) and reports failures through its
//! own error enum. Resource-specific queries (criteria filters, unassigned
//! relationship targets) live next to each client.

/// Declares `<Entity>Client` and `<Entity>Error` for a record type in scope.
///
/// The error maps framework failures onto what a screen distinguishes: missing
/// records, backend rejections, invalid forms, and everything else.
macro_rules! entity_client {
    ($entity:ident) => {
        paste::paste! {
            #[doc = "Errors reported by [`" $entity "Client`]."]
            #[derive(Debug, thiserror::Error)]
            pub enum [<$entity Error>] {
                #[error("Not found: {0}")]
                NotFound(String),

                /// The backend rejected the request.
                #[error("Request failed ({status}): {message}")]
                Status { status: u16, message: String },

                #[error("Validation error: {0}")]
                Validation(String),

                /// Transport or decoding failure.
                #[error("Communication error: {0}")]
                Communication(String),
            }

            impl From<String> for [<$entity Error>] {
                fn from(s: String) -> Self {
                    [<$entity Error>]::Communication(s)
                }
            }

            impl From<resource_framework::FrameworkError> for [<$entity Error>] {
                fn from(e: resource_framework::FrameworkError) -> Self {
                    use resource_framework::FrameworkError;
                    match e {
                        FrameworkError::NotFound(what) => [<$entity Error>]::NotFound(what),
                        FrameworkError::Status { status: 404, body } => {
                            [<$entity Error>]::NotFound(body)
                        }
                        FrameworkError::Status { status, body } => [<$entity Error>]::Status {
                            status,
                            message: body,
                        },
                        e @ (FrameworkError::Validation(_) | FrameworkError::FormValue { .. }) => {
                            [<$entity Error>]::Validation(e.to_string())
                        }
                        e => [<$entity Error>]::Communication(e.to_string()),
                    }
                }
            }

            #[doc = "Client for the `" $entity "` resource."]
            #[derive(Clone)]
            pub struct [<$entity Client>] {
                inner: resource_framework::ResourceClient<$entity>,
            }

            impl [<$entity Client>] {
                pub fn new(inner: resource_framework::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }
            }

            #[async_trait::async_trait]
            impl resource_framework::EntityClient<$entity> for [<$entity Client>] {
                type Error = [<$entity Error>];

                fn inner(&self) -> &resource_framework::ResourceClient<$entity> {
                    &self.inner
                }

                fn map_error(e: resource_framework::FrameworkError) -> Self::Error {
                    e.into()
                }
            }
        }
    };
}

pub mod cdms_submission_client;
pub mod customer_client;
pub mod customer_identifier_client;
pub mod kyc_case_client;
pub mod kyc_consent_client;
pub mod kyc_document_client;
pub mod kyc_notification_client;

pub use cdms_submission_client::*;
pub use customer_client::*;
pub use customer_identifier_client::*;
pub use kyc_case_client::*;
pub use kyc_consent_client::*;
pub use kyc_document_client::*;
pub use kyc_notification_client::*;

use resource_framework::{ResourceClient, Transport};
use std::sync::Arc;

/// All seven clients over one transport. Forms use it to load relationship options.
#[derive(Clone)]
pub struct KycClients {
    pub customers: CustomerClient,
    pub customer_identifiers: CustomerIdentifierClient,
    pub kyc_cases: KycCaseClient,
    pub kyc_consents: KycConsentClient,
    pub kyc_documents: KycDocumentClient,
    pub kyc_notifications: KycNotificationClient,
    pub cdms_submissions: CdmsSubmissionClient,
}

impl KycClients {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            customers: CustomerClient::new(ResourceClient::new(transport.clone())),
            customer_identifiers: CustomerIdentifierClient::new(ResourceClient::new(
                transport.clone(),
            )),
            kyc_cases: KycCaseClient::new(ResourceClient::new(transport.clone())),
            kyc_consents: KycConsentClient::new(ResourceClient::new(transport.clone())),
            kyc_documents: KycDocumentClient::new(ResourceClient::new(transport.clone())),
            kyc_notifications: KycNotificationClient::new(ResourceClient::new(transport.clone())),
            cdms_submissions: CdmsSubmissionClient::new(ResourceClient::new(transport)),
        }
    }
}
