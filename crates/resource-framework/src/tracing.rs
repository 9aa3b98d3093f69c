//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the admin client. Every
//! client and controller operation runs inside a span carrying an `entity_type`
//! field, so the module path is hidden (`with_target(false)`).
//!
//! ## Levels
//!
//! - `info`: completed operations (`Created`, `Updated`, `Deleted`, `Saved`)
//! - `debug`: request payloads, result counts, navigation
//! - `warn`: failed loads, saves, deletes and file loads
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=resource_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a list load reads:
//!
//! ```text
//! DEBUG load{entity_type="KycCase"}:query{entity_type="KycCase"}: Query count=1 total=None
//! DEBUG load{entity_type="KycCase"}: Loaded count=1 total=None
//! ```

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
