//! # Forms
//!
//! One [`FormModel`](resource_framework::FormModel) per KYC record: the editable
//! snapshot, its declarative constraints, the defaults a new record starts from and
//! the relationship option lists its selects offer.
//!
//! Every form uses [`KycClients`](crate::clients::KycClients) as its context, so an
//! editor for any record can be activated the same way.

use resource_framework::{add_to_collection_if_missing, AppEvent, EventManager, FileLoader, Identified};
use std::path::Path;
use tracing::warn;

pub mod cdms_submission_form;
pub mod customer_form;
pub mod customer_identifier_form;
pub mod kyc_case_form;
pub mod kyc_consent_form;
pub mod kyc_document_form;
pub mod kyc_notification_form;

pub use cdms_submission_form::*;
pub use customer_form::*;
pub use customer_identifier_form::*;
pub use kyc_case_form::*;
pub use kyc_consent_form::*;
pub use kyc_document_form::*;
pub use kyc_notification_form::*;

/// Message key broadcast when a text-blob field is fed a binary file.
pub const NOT_TEXT_KEY: &str = "error.file.not.text";

/// Reads `path` as the content of the text-blob field `field`.
///
/// Any failure, including a file that is not UTF-8, is broadcast on `events` and
/// yields `None`.
pub async fn read_text_blob(
    path: &Path,
    field: &str,
    loader: &FileLoader,
    events: &EventManager,
) -> Option<String> {
    let file = loader.load_into(path, field, events).await?;
    if file.text.is_none() {
        warn!(field, file_name = %file.file_name, "File is not text");
        events.broadcast(AppEvent::FileLoadFailed {
            field: field.to_string(),
            key: NOT_TEXT_KEY.to_string(),
            message: format!("{} is not a text file", file.file_name),
        });
    }
    file.text
}

/// An option list holding only the currently selected record, if any.
pub(crate) fn selected<T: Identified + Clone>(current: &Option<T>) -> Vec<T> {
    add_to_collection_if_missing(Vec::new(), [current.clone()])
}
