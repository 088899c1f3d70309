//! Error types for event operations.

use culture_models::{EventId, FieldError};
use thiserror::Error;

/// Errors that can occur during event operations.
#[derive(Error, Debug)]
pub enum EventError {
    /// No event has the given identifier.
    #[error("event with id {0} not found")]
    NotFound(EventId),

    /// Event is in invalid state for operation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Draft rejected by form validation.
    #[error("invalid event: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for event operations.
pub type Result<T> = std::result::Result<T, EventError>;
