//! # EntityClient Trait
//!
//! Provides a common interface for resource‑specific clients, adding default CRUD
//! methods built on top of a generic `ResourceClient` and mapping framework errors
//! into the resource's own error type.
use crate::{EntityId, FrameworkError, Page, RequestOptions, ResourceClient, RestEntity};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard CRUD operations.
///
/// # Example
///
/// ```rust
/// use resource_framework::{EntityClient, FrameworkError, Identified, ResourceClient, RestEntity};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Customer { id: Option<i64>, full_name: String }
///
/// #[derive(Debug, Serialize)]
/// struct CustomerPatch { id: i64 }
///
/// impl Identified for Customer { fn identity(&self) -> Option<i64> { self.id } }
/// impl Identified for CustomerPatch { fn identity(&self) -> Option<i64> { Some(self.id) } }
///
/// impl RestEntity for Customer {
///     const RESOURCE: &'static str = "api/customers";
///     const NAME: &'static str = "Customer";
///     type Patch = CustomerPatch;
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("customer error: {0}")]
/// struct CustomerError(String);
///
/// impl From<String> for CustomerError {
///     fn from(s: String) -> Self { CustomerError(s) }
/// }
///
/// struct CustomerClient { inner: ResourceClient<Customer> }
///
/// impl EntityClient<Customer> for CustomerClient {
///     type Error = CustomerError;
///     fn inner(&self) -> &ResourceClient<Customer> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { CustomerError(e.to_string()) }
/// }
///
/// async fn usage(client: CustomerClient) {
///     // find(), query(), delete() … are provided automatically.
///     let _ = client.find(1).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait EntityClient<T: RestEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    #[tracing::instrument(skip_all, fields(entity_type = T::NAME))]
    async fn create(&self, entity: &T) -> Result<T, Self::Error> {
        self.inner().create(entity).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip_all, fields(entity_type = T::NAME))]
    async fn update(&self, entity: &T) -> Result<T, Self::Error> {
        self.inner().update(entity).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip_all, fields(entity_type = T::NAME))]
    async fn partial_update(&self, patch: &T::Patch) -> Result<T, Self::Error> {
        self.inner().partial_update(patch).await.map_err(Self::map_error)
    }

    /// Fetch a record by id.
    #[tracing::instrument(skip(self), fields(entity_type = T::NAME))]
    async fn find(&self, id: EntityId) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self), fields(entity_type = T::NAME))]
    async fn query(&self, options: &RequestOptions) -> Result<Page<T>, Self::Error> {
        self.inner().query(options).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self), fields(entity_type = T::NAME))]
    async fn count(&self, options: &RequestOptions) -> Result<u64, Self::Error> {
        self.inner().count(options).await.map_err(Self::map_error)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self), fields(entity_type = T::NAME))]
    async fn delete(&self, id: EntityId) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
