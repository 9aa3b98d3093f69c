//! # System Lifecycle & Wiring
//!
//! Builds everything one admin session shares: the transport, the seven typed
//! clients, the route bus that drives list state, the event channel for file-load
//! failures and the file loader.
//!
//! ## The AdminSystem Pattern
//!
//! ```rust,ignore
//! let system = AdminSystem::new(AdminConfig::from_env()?)?;
//!
//! // Lists follow the route; the subscription reloads on every route change.
//! let cases = system.list::<KycCase>().subscribe(system.routes.subscribe());
//!
//! // Editors resolve the record (or start blank) and load their pickers.
//! let mut editor = system.edit::<KycCaseForm>(Some(1342)).await?;
//! editor.save().await?;
//! ```
//!
//! Construction is the only place that knows about HTTP. Everything downstream
//! receives an `Arc<dyn Transport>` or a client built on one, so tests wire the
//! same system over [`MockTransport`](resource_framework::mock::MockTransport) with
//! [`AdminSystem::with_transport`].
//!
//! ## Observability
//!
//! Call [`setup_tracing`] once at startup; see [`resource_framework::tracing`].

pub mod admin_system;

pub use admin_system::*;
pub use resource_framework::tracing::setup_tracing;
