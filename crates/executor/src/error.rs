//! Error types for the executor layer.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! Errors are structured and serializable so they survive a trip through
//! any dispatcher, and every one of them renders to the halting error
//! envelope at the JSON boundary.
//!
//! # Error Categories
//!
//! | Category | Variants | Kind |
//! |----------|----------|------|
//! | Not Found | `NotFound` | `not_found` |
//! | Vocabulary | `InvalidEnum` | `invalid_enum` |
//! | Uniqueness | `DuplicateConflict` | `duplicate_conflict` |
//! | Rules | `ValidationFailure` | `validation_failure` |
//! | Dispatch | `UnknownOperation`, `InvalidArguments` | `validation_failure` |
//! | Storage | `Io`, `Serialization`, `Corruption` | `validation_failure` |
//! | Internal | `Internal` | `validation_failure` |

use incidentdb_core::ErrorKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Executor error type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Not Found ====================
    /// A referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Label of the record's table
        entity: String,
        /// Identifier as supplied
        id: String,
    },

    // ==================== Validation ====================
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

    /// A unique value is already taken
    #[error("{field} {value} already exists")]
    DuplicateConflict {
        /// Constrained field
        field: String,
        /// Conflicting value
        value: String,
    },

    /// A composite rule is violated
    #[error("{reason}")]
    ValidationFailure {
        /// What went wrong
        reason: String,
    },

    // ==================== Dispatch ====================
    /// No operation has this name
    #[error("Unknown operation '{name}'")]
    UnknownOperation {
        /// Name as invoked
        name: String,
    },

    /// Arguments do not match the operation's parameters
    #[error("Invalid arguments for {operation}: {reason}")]
    InvalidArguments {
        /// Operation invoked
        operation: String,
        /// Decoder message
        reason: String,
    },

    // ==================== Storage ====================
    /// Filesystem error
    #[error("I/O error: {reason}")]
    Io {
        /// Underlying error message
        reason: String,
    },

    /// Snapshot or config could not be encoded or decoded
    #[error("Serialization error: {reason}")]
    Serialization {
        /// Underlying error message
        reason: String,
    },

    /// Loaded data violates the store invariants
    #[error("Data corruption: {reason}")]
    Corruption {
        /// What is inconsistent
        reason: String,
    },

    // ==================== Internal ====================
    /// Bug or invariant violation inside the executor
    #[error("Internal error: {reason}")]
    Internal {
        /// Description
        reason: String,
    },
}

impl Error {
    /// Classify this error into one of the four operation kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::InvalidEnum { .. } => ErrorKind::InvalidEnum,
            Error::DuplicateConflict { .. } => ErrorKind::DuplicateConflict,
            Error::ValidationFailure { .. }
            | Error::UnknownOperation { .. }
            | Error::InvalidArguments { .. }
            | Error::Io { .. }
            | Error::Serialization { .. }
            | Error::Corruption { .. }
            | Error::Internal { .. } => ErrorKind::ValidationFailure,
        }
    }

    /// The error envelope returned to an external caller.
    ///
    /// `halt` tells the calling layer to stop the interaction rather than
    /// retry.
    pub fn to_json(&self) -> Value {
        json!({"error": self.to_string(), "halt": true})
    }

    /// Whether the error arose from opening or saving a store rather than
    /// from an operation.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::Io { .. } | Error::Serialization { .. } | Error::Corruption { .. }
        )
    }
}
