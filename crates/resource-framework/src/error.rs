//! # Framework Errors
//!
//! This module defines the common error types used throughout the resource framework.
//! By centralizing error definitions, every typed client and controller reports
//! remote failures the same way.

use crate::validation::ValidationReport;

/// Errors that can occur while talking to a REST resource or driving a controller.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    /// The request never produced a response (connection, DNS, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status code.
    #[error("Request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// The response body could not be mapped onto the entity type.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Item not found: {0}")]
    NotFound(String),

    /// `update`/`partial_update` was called on an entity without an id.
    #[error("Entity has no identity: {0}")]
    MissingIdentity(&'static str),

    /// `create` was called on an entity that already carries an id.
    #[error("Entity is already persisted: {resource}/{id}")]
    UnexpectedIdentity { resource: &'static str, id: i64 },

    /// The form snapshot violates its declared constraints.
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    /// A form field could not be converted back into the entity model.
    #[error("Invalid value for `{field}`: {reason}")]
    FormValue { field: &'static str, reason: String },

    /// The mock transport received a request nobody expected.
    #[error("Unexpected request: {0}")]
    Unexpected(String),
}

impl FrameworkError {
    /// HTTP status of the failure, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FrameworkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FrameworkError {
    fn from(e: reqwest::Error) -> Self {
        FrameworkError::Transport(e.to_string())
    }
}
