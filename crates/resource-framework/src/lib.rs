//! # Resource Framework
//!
//! Building blocks for admin clients of a CRUD REST API. The pattern every entity
//! screen repeats (load a list, sort it, page through it, delete with confirmation,
//! edit a record with relationship pickers and navigate back after saving) is written
//! here **once**, generically over the record type.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`RestEntity`]) - the record types and their wire format
//! 2. **Access Layer** ([`ResourceClient`] over a [`Transport`]) - typed CRUD calls
//! 3. **Controller Layer** ([`ListController`], [`EditController`], [`DeleteDialog`]) -
//!    screen state driven by the route
//!
//! A concrete application implements [`RestEntity`] and [`Sortable`] for each record
//! and a [`FormModel`] for each editor; the framework does the rest.
//!
//! ## Core Abstractions
//!
//! ```rust
//! use resource_framework::{Identified, RestEntity, SortKey, Sortable};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Customer {
//!     id: Option<i64>,
//!     full_name: String,
//! }
//!
//! #[derive(Debug, Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct CustomerPatch {
//!     id: i64,
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     full_name: Option<String>,
//! }
//!
//! impl Identified for Customer {
//!     fn identity(&self) -> Option<i64> { self.id }
//! }
//! impl Identified for CustomerPatch {
//!     fn identity(&self) -> Option<i64> { Some(self.id) }
//! }
//!
//! impl RestEntity for Customer {
//!     const RESOURCE: &'static str = "api/customers";
//!     const NAME: &'static str = "Customer";
//!     type Patch = CustomerPatch;
//! }
//!
//! impl Sortable for Customer {
//!     fn sort_key(&self, field: &str) -> SortKey {
//!         match field {
//!             "id" => self.id.into(),
//!             "fullName" => SortKey::from(&self.full_name),
//!             _ => SortKey::Absent,
//!         }
//!     }
//! }
//!
//! assert!(Customer { id: None, full_name: "Ada".into() }.is_new());
//! ```
//!
//! ## Routing
//!
//! The route query is the single source of truth for list state. Controllers only
//! *request* navigation through a [`Navigator`]; a [`ListSubscription`] observes the
//! route and reloads. See the [`route`] and [`list`] modules.
//!
//! ## Concurrency Model
//!
//! - Every remote call is one `async fn`; suspension happens only at the transport
//! - A controller owns its collection; views read published snapshots
//! - Route observation runs in its own Tokio task and stops when its handle is dropped
//!
//! ## Testing
//!
//! The [`mock`] module provides two transports (a channel one answered by hand, and
//! a fluent expectation queue) plus a recording navigator, so every controller can be
//! tested without a backend.

pub mod client;
pub mod client_trait;
pub mod dialog;
pub mod edit;
pub mod entity;
pub mod error;
pub mod events;
pub mod file;
pub mod list;
pub mod mock;
pub mod query;
pub mod reconcile;
pub mod resolve;
pub mod route;
pub mod sort;
pub mod tracing;
pub mod transport;
pub mod validation;

// Re-export core types for convenience
pub use client::{Page, ResourceClient};
pub use client_trait::EntityClient;
pub use dialog::{DeleteDialog, DialogOutcome};
pub use edit::{EditController, FormModel};
pub use entity::{same_identity, EntityId, IdRef, Identified, RestEntity};
pub use error::FrameworkError;
pub use events::{AppEvent, EventManager};
pub use file::{FileLoadError, FileLoader, LoadedFile};
pub use list::{ListController, ListSnapshot, ListSubscription, Pagination};
pub use query::RequestOptions;
pub use reconcile::add_to_collection_if_missing;
pub use resolve::resolve;
pub use route::{NavigationEvent, Navigator, RouteBus, RouteQuery};
pub use sort::{build_sort_param, parse_sort_param, SortKey, SortOrder, SortState, Sortable};
pub use transport::{HttpTransport, Transport};
pub use validation::{Constraint, FieldRule, ValidationReport};
