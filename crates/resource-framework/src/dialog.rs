//! Delete confirmation dialog.

use crate::client::ResourceClient;
use crate::entity::{EntityId, RestEntity};
use crate::error::FrameworkError;
use tracing::{info, warn};

/// How a dialog was closed, as reported to its opener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The record was deleted on the backend.
    Deleted,
    /// The user backed out; nothing was sent.
    Dismissed,
}

/// Holds the record the user asked to delete until they confirm or cancel.
pub struct DeleteDialog<T: RestEntity> {
    target: T,
    client: ResourceClient<T>,
}

impl<T: RestEntity> DeleteDialog<T> {
    pub fn new(target: T, client: ResourceClient<T>) -> Self {
        Self { target, client }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Deletes `id`; only a successful call closes the dialog as `Deleted`.
    pub async fn confirm_delete(&self, id: EntityId) -> Result<DialogOutcome, FrameworkError> {
        match self.client.delete(id).await {
            Ok(()) => {
                info!(entity_type = T::NAME, id, "Delete confirmed");
                Ok(DialogOutcome::Deleted)
            }
            Err(e) => {
                warn!(entity_type = T::NAME, id, error = %e, "Delete failed");
                Err(e)
            }
        }
    }

    pub fn cancel(self) -> DialogOutcome {
        DialogOutcome::Dismissed
    }
}
