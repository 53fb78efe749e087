//! Error types for plan graph operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for all plan operations.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Malformed input: empty goal or title, bad status, capacity exceeded,
    /// invalid dependency reference, rejected status transition
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// Task not found in the active plan
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// Operation requires an active plan but the session has none
    #[error("No active plan (call create_plan first)")]
    NoActivePlan,
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Store configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse error category reported to agent callers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    State,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::State => "state",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlanError {
        PlanError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlanError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        PlanError::Configuration {
            message: message.into(),
        }
    }

    /// Category of this error as seen by agent callers.
    ///
    /// Serialization and configuration failures never originate from caller
    /// input about a plan, so they are reported as state errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::Validation { .. } => ErrorKind::Validation,
            PlanError::TaskNotFound { .. } => ErrorKind::NotFound,
            PlanError::NoActivePlan
            | PlanError::Serialization { .. }
            | PlanError::Configuration { .. } => ErrorKind::State,
        }
    }
}

/// Result type alias for plan operations
pub type Result<T> = std::result::Result<T, PlanError>;
