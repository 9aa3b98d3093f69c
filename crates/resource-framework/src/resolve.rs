//! Resolving the record behind a detail or edit route before activating the view.

use crate::client::ResourceClient;
use crate::entity::{EntityId, RestEntity};
use crate::error::FrameworkError;
use crate::route::Navigator;
use tracing::warn;

/// Fetches the record for `id`.
///
/// No id means creation mode and resolves to `None`. A missing record redirects to
/// the not-found route and fails with [`FrameworkError::NotFound`].
pub async fn resolve<T: RestEntity>(
    client: &ResourceClient<T>,
    id: Option<EntityId>,
    navigator: &dyn Navigator,
) -> Result<Option<T>, FrameworkError> {
    let Some(id) = id else {
        return Ok(None);
    };
    match client.find(id).await? {
        Some(entity) => Ok(Some(entity)),
        None => {
            warn!(entity_type = T::NAME, id, "Record not found on resolve");
            navigator.not_found();
            Err(FrameworkError::NotFound(format!("{}/{}", T::RESOURCE, id)))
        }
    }
}
