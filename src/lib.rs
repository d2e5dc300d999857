//! IncidentDB - relational-integrity layer for IT incident management
//!
//! IncidentDB keeps twenty-three related tables (clients, incidents,
//! escalations, work orders, ...) consistent: every foreign key resolves,
//! every enumerated field stays inside its vocabulary, unique fields stay
//! unique, and a rejected operation leaves the store exactly as it was.
//!
//! # Quick Start
//!
//! ```ignore
//! use incidentdb::IncidentDb;
//! use serde_json::json;
//!
//! let mut db = IncidentDb::in_memory();
//! let reply = db.invoke("discover_incidents", json!({"status": "open"}));
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which turns a [`Command`]
//! (or an operation name plus JSON arguments) into a call on the engine.
//! [`IncidentDb`] owns a store and an executor; [`SharedIncidentDb`]
//! serializes access for concurrent callers.

// Re-export the public API from incidentdb-executor
pub use incidentdb_executor::*;
