//! Domain error types.

use common::{Cause, InputError};
use store::StoreError;
use thiserror::Error;

/// Message carried by every field-level rejection.
pub const INVALID_DATA: &str = "Invalid data";

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The payload violates field rules or lacks required fields.
    #[error("{message}")]
    Validation { message: String, causes: Vec<Cause> },

    /// A field could not be parsed, e.g. a malformed date.
    #[error("{message}")]
    InvalidFormat { message: String, causes: Vec<Cause> },

    /// The addressed row, or a row it references, does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A natural key is taken, or the row is still referenced.
    #[error("{0}")]
    Conflict(String),

    /// An unclassified store failure.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl DomainError {
    pub fn invalid(causes: Vec<Cause>) -> Self {
        DomainError::Validation {
            message: INVALID_DATA.to_string(),
            causes,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict(message.into())
    }

    /// Metric label for a rejected write.
    pub fn reason(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "validation",
            DomainError::InvalidFormat { .. } => "invalid_format",
            DomainError::NotFound(_) => "not_found",
            DomainError::Conflict(_) => "conflict",
            DomainError::Store(_) => "store",
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => DomainError::NotFound(err.to_string()),
            StoreError::Referenced { .. } => DomainError::Conflict(err.to_string()),
            StoreError::Duplicated { entity, .. } => {
                DomainError::Conflict(format!("{entity} already exists"))
            }
            other => DomainError::Store(other),
        }
    }
}

impl From<InputError> for DomainError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Missing(causes) => DomainError::invalid(causes),
            InputError::Malformed(causes) => DomainError::InvalidFormat {
                message: INVALID_DATA.to_string(),
                causes,
            },
        }
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
