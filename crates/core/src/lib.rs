//! Core types for IncidentDB
//!
//! This crate defines the foundational types used throughout the system:
//! - Identifiers: one newtype per table (`ClientId`, `IncidentId`, ...) plus
//!   `RawId` for unvalidated caller input
//! - Vocabularies: the closed value sets of every status/type/level field
//! - TableName: discriminates between entity tables
//! - Records: one struct per table, and the type-erased `Record`
//! - Entity: table, identifier, references and unique keys of a record
//! - Error: `IncidentError` and its `ErrorKind` classification

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod error;
pub mod ids;
pub mod record;
pub mod records;
pub mod table;
pub mod vocab;

pub use entity::{Entity, Reference, UniqueKey};
pub use error::{ErrorKind, IncidentError, IncidentResult};
pub use ids::*;
pub use record::Record;
pub use records::*;
pub use table::TableName;
pub use vocab::*;
