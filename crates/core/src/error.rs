//! Error types for the incident store
//!
//! Operation failures fall into four kinds (see [`ErrorKind`]). Every failure
//! is an ordinary return value: nothing here is fatal and nothing is retried.
//! The remaining variants only arise from snapshot I/O.
//! We use `thiserror` for `Display` and `Error`.

use crate::table::TableName;
use crate::vocab::Vocabulary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for store operations
pub type IncidentResult<T> = std::result::Result<T, IncidentError>;

/// Classification of an operation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced record does not exist
    NotFound,
    /// A value is outside its closed vocabulary
    InvalidEnum,
    /// A uniqueness-constrained value is already taken
    DuplicateConflict,
    /// Any other violated condition
    ValidationFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidEnum => "invalid_enum",
            ErrorKind::DuplicateConflict => "duplicate_conflict",
            ErrorKind::ValidationFailure => "validation_failure",
        };
        f.write_str(s)
    }
}

/// Error type for the incident store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IncidentError {
    /// A referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Label of the missing record's table (e.g. "Client")
        entity: String,
        /// Identifier as supplied
        id: String,
    },

    /// A value is outside its closed vocabulary
    #[error("Invalid {field} '{value}'. Must be one of [{}]", .allowed.join(", "))]
    InvalidEnum {
        /// Offending field
        field: String,
        /// Rejected value
        value: String,
        /// Every accepted value
        allowed: Vec<String>,
    },

    /// A uniqueness-constrained value already exists on another record
    #[error("{field} {value} already exists")]
    DuplicateConflict {
        /// Constrained field
        field: String,
        /// Conflicting value
        value: String,
    },

    /// A composite or free-text condition is violated
    #[error("{reason}")]
    ValidationFailure {
        /// What went wrong
        reason: String,
    },

    /// Filesystem error while loading or saving a snapshot
    #[error("I/O error: {reason}")]
    Io {
        /// Underlying error message
        reason: String,
    },

    /// Snapshot or configuration could not be encoded or decoded
    #[error("Serialization error: {reason}")]
    Serialization {
        /// Underlying error message
        reason: String,
    },

    /// Snapshot content contradicts itself or the store invariants
    #[error("Data corruption: {reason}")]
    Corruption {
        /// What is inconsistent
        reason: String,
    },
}

impl IncidentError {
    /// A reference into `table` names no existing record.
    pub fn not_found(table: TableName, id: impl fmt::Display) -> Self {
        IncidentError::NotFound {
            entity: table.label().to_string(),
            id: id.to_string(),
        }
    }

    /// `value` is not a member of vocabulary `V`.
    pub fn invalid_enum<V: Vocabulary>(field: &str, value: &str) -> Self {
        IncidentError::InvalidEnum {
            field: field.to_string(),
            value: value.to_string(),
            allowed: V::VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `value` is already used by another record.
    pub fn duplicate(field: &str, value: impl fmt::Display) -> Self {
        IncidentError::DuplicateConflict {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// A composite rule is violated.
    pub fn validation(reason: impl Into<String>) -> Self {
        IncidentError::ValidationFailure {
            reason: reason.into(),
        }
    }

    /// Snapshot inconsistency.
    pub fn corruption(reason: impl Into<String>) -> Self {
        IncidentError::Corruption {
            reason: reason.into(),
        }
    }

    /// Classify this error.
    ///
    /// Infrastructure errors have no operation-level meaning and are
    /// reported as validation failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IncidentError::NotFound { .. } => ErrorKind::NotFound,
            IncidentError::InvalidEnum { .. } => ErrorKind::InvalidEnum,
            IncidentError::DuplicateConflict { .. } => ErrorKind::DuplicateConflict,
            IncidentError::ValidationFailure { .. }
            | IncidentError::Io { .. }
            | IncidentError::Serialization { .. }
            | IncidentError::Corruption { .. } => ErrorKind::ValidationFailure,
        }
    }
}

impl From<io::Error> for IncidentError {
    fn from(e: io::Error) -> Self {
        IncidentError::Io {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IncidentError {
    fn from(e: serde_json::Error) -> Self {
        IncidentError::Serialization {
            reason: e.to_string(),
        }
    }
}
