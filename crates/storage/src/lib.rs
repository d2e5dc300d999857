//! Storage layer for IncidentDB
//!
//! This crate implements the in-memory entity store:
//! - Table: ordered id → record map with the `max + 1` identifier allocator
//! - EntityStore: one table per entity, generic access via `HasTable`
//! - Snapshot: load/save a directory of per-table JSON files
//! - Integrity: store-wide referential and uniqueness verification

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod integrity;
pub mod snapshot;
pub mod store;
pub mod table;

pub use integrity::{verify, Violation};
pub use snapshot::{load_dir, save_dir, table_path};
pub use store::{EntityStore, HasTable, TableVisitor, TableVisitorMut};
pub use table::Table;
