//! # Generic Client
//!
//! This module defines the generic remote access service for a REST resource.

use crate::entity::{same_identity, EntityId, Identified, RestEntity};
use crate::error::FrameworkError;
use crate::query::RequestOptions;
use crate::reconcile::add_to_collection_if_missing;
use crate::transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

/// One page (or the whole) of a collection query.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Value of the total-count response header, for paginated listings.
    pub total_count: Option<u64>,
}

/// A type-safe client for the REST resource behind `T`.
///
/// ## ResourceClient
///
/// `ResourceClient<T>` maps CRUD calls onto HTTP verbs against `T::RESOURCE` and
/// converts between wire JSON and `T` on the way in and out. It holds only an
/// `Arc<dyn Transport>`, so cloning is cheap and clones can be shared across tasks.
///
/// * **No caching, no retry** – every call is one request.
/// * **Errors** – any non-2xx answer surfaces as [`FrameworkError::Status`].
pub struct ResourceClient<T: RestEntity> {
    transport: Arc<dyn Transport>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: RestEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: RestEntity> ResourceClient<T> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _entity: PhantomData,
        }
    }

    fn item_path(id: EntityId) -> String {
        format!("{}/{}", T::RESOURCE, id)
    }

    /// POST a new record; the backend assigns the id.
    #[tracing::instrument(skip_all, fields(entity_type = T::NAME))]
    pub async fn create(&self, entity: &T) -> Result<T, FrameworkError> {
        if let Some(id) = entity.identity() {
            return Err(FrameworkError::UnexpectedIdentity {
                resource: T::RESOURCE,
                id,
            });
        }
        debug!(?entity, "Create");
        let request =
            ApiRequest::new(HttpMethod::Post, T::RESOURCE).with_body(serde_json::to_value(entity)?);
        let created: T = Self::decode_entity(self.transport.send(request).await?)?;
        info!(id = ?created.identity(), "Created");
        Ok(created)
    }

    /// PUT the full record to `resource/{id}`.
    #[tracing::instrument(skip_all, fields(entity_type = T::NAME, id = ?entity.identity()))]
    pub async fn update(&self, entity: &T) -> Result<T, FrameworkError> {
        let id = entity
            .identity()
            .ok_or(FrameworkError::MissingIdentity(T::RESOURCE))?;
        debug!(?entity, "Update");
        let request = ApiRequest::new(HttpMethod::Put, Self::item_path(id))
            .with_body(serde_json::to_value(entity)?);
        let updated = Self::decode_entity(self.transport.send(request).await?)?;
        info!("Updated");
        Ok(updated)
    }

    /// PATCH only the provided fields of `resource/{id}`.
    #[tracing::instrument(skip_all, fields(entity_type = T::NAME, id = ?patch.identity()))]
    pub async fn partial_update(&self, patch: &T::Patch) -> Result<T, FrameworkError> {
        let id = patch
            .identity()
            .ok_or(FrameworkError::MissingIdentity(T::RESOURCE))?;
        debug!(?patch, "Partial update");
        let request = ApiRequest::new(HttpMethod::Patch, Self::item_path(id))
            .with_body(serde_json::to_value(patch)?);
        let updated = Self::decode_entity(self.transport.send(request).await?)?;
        info!("Partially updated");
        Ok(updated)
    }

    /// GET `resource/{id}`; `None` when the backend has no such record.
    #[tracing::instrument(skip(self), fields(entity_type = T::NAME))]
    pub async fn find(&self, id: EntityId) -> Result<Option<T>, FrameworkError> {
        let request = ApiRequest::new(HttpMethod::Get, Self::item_path(id));
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(FrameworkError::Status { status: 404, .. }) => {
                debug!(found = false, "Find");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let found = match response.body {
            Some(Value::Null) | None => None,
            Some(body) => Some(serde_json::from_value(body)?),
        };
        debug!(found = found.is_some(), "Find");
        Ok(found)
    }

    /// GET the collection with `options` flattened into query parameters.
    #[tracing::instrument(skip(self), fields(entity_type = T::NAME))]
    pub async fn query(&self, options: &RequestOptions) -> Result<Page<T>, FrameworkError> {
        let request =
            ApiRequest::new(HttpMethod::Get, T::RESOURCE).with_query(options.to_pairs());
        let response = self.transport.send(request).await?;
        let items: Vec<T> = match response.body {
            Some(Value::Null) | None => Vec::new(),
            Some(body) => serde_json::from_value(body)?,
        };
        debug!(count = items.len(), total = ?response.total_count, "Query");
        Ok(Page {
            items,
            total_count: response.total_count,
        })
    }

    /// GET `resource/count` with criteria; only resources with criteria filtering
    /// serve it.
    #[tracing::instrument(skip(self), fields(entity_type = T::NAME))]
    pub async fn count(&self, options: &RequestOptions) -> Result<u64, FrameworkError> {
        let request = ApiRequest::new(HttpMethod::Get, format!("{}/count", T::RESOURCE))
            .with_query(options.to_pairs());
        let response = self.transport.send(request).await?;
        let count: u64 = serde_json::from_value(response.body.unwrap_or(Value::Null))?;
        debug!(count, "Count");
        Ok(count)
    }

    /// DELETE `resource/{id}`. Success means the backend answered 2xx.
    #[tracing::instrument(skip(self), fields(entity_type = T::NAME))]
    pub async fn delete(&self, id: EntityId) -> Result<(), FrameworkError> {
        let request = ApiRequest::new(HttpMethod::Delete, Self::item_path(id));
        self.transport.send(request).await?;
        info!("Deleted");
        Ok(())
    }

    pub fn identity_of(entity: &T) -> Option<EntityId> {
        entity.identity()
    }

    pub fn same_identity(a: Option<&T>, b: Option<&T>) -> bool {
        same_identity(a, b)
    }

    /// [`add_to_collection_if_missing`] scoped to `T`.
    pub fn add_to_collection_if_missing<I>(collection: Vec<T>, candidates: I) -> Vec<T>
    where
        I: IntoIterator<Item = Option<T>>,
    {
        add_to_collection_if_missing(collection, candidates)
    }

    fn decode_entity(response: ApiResponse) -> Result<T, FrameworkError> {
        let body = response.body.unwrap_or(Value::Null);
        Ok(serde_json::from_value(body)?)
    }
}
