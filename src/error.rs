//! Error types for plan operations

use crate::lifecycle::LifecycleError;

/// Errors raised by the plan core
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid import file: {0}")]
    ImportFormat(String),

    #[error("{field} {message}")]
    Validation { field: String, message: String },

    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlanError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        PlanError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlanError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlanError::NotFound { .. })
    }
}

pub type Result<T, E = PlanError> = std::result::Result<T, E>;
