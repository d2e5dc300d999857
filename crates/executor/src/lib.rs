//! # IncidentDB Executor
//!
//! The public API of IncidentDB - a relational-integrity layer over an
//! in-memory IT incident-management store.
//!
//! This is the only crate users need to import. It provides:
//! - [`IncidentDb`] - a store plus its executor, with snapshot load/save
//! - [`SharedIncidentDb`] - the same, serialized behind one lock
//! - [`Command`]/[`Output`] - the typed operation interface
//! - [`Executor::invoke`] - name + JSON arguments in, JSON reply out
//! - [`descriptors`] - the published contract of every operation
//!
//! ## Quick Start
//!
//! ```text
//! use incidentdb_executor::IncidentDb;
//! use serde_json::json;
//!
//! let mut db = IncidentDb::in_memory();
//! let reply = db.invoke("create_client", json!({
//!     "client_name": "Globex",
//!     "registration_number": "REG-1",
//!     "contact_email": "it@globex.test",
//!     "client_type": "enterprise"
//! }));
//! // {"client_id": "1", "success": true}
//! ```
//!
//! ## Replies
//!
//! | Operation | Success | Failure |
//! |-----------|---------|---------|
//! | create | `{"<id_field>": "<id>", "success": true}` | `{"error": "...", "halt": true}` |
//! | update | the full updated record | `{"error": "...", "halt": true}` |
//! | discover | list of records, ascending id | never fails on filter values |

#![warn(missing_docs)]

mod api;
mod catalogue;
mod command;
mod convert;
mod error;
mod executor;
mod output;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use api::{IncidentDb, SharedIncidentDb};
pub use catalogue::{descriptor, descriptors, OperationDescriptor};
pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;

/// Engine request types, one module per record family.
pub use incidentdb_engine::ops;
pub use incidentdb_engine::{Clock, EngineConfig, FixedClock, SystemClock};

pub use incidentdb_core::{ErrorKind, RawId, Record, TableName};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
