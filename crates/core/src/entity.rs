//! The `Entity` trait
//!
//! Every record type names its table and identifier and reports the two
//! kinds of constraint the store must keep true: outgoing references that
//! must resolve, and values that must be unique within the table.

use crate::ids::EntityId;
use crate::record::Record;
use crate::table::TableName;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// A non-null foreign key held by a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Field holding the reference
    pub field: &'static str,
    /// Table the reference points into
    pub table: TableName,
    /// Raw identifier referenced
    pub id: u64,
}

impl Reference {
    /// Reference to `id` in `table` held by `field`.
    pub fn new<I: EntityId>(field: &'static str, table: TableName, id: I) -> Self {
        Reference {
            field,
            table,
            id: id.raw(),
        }
    }
}

/// A value that no other record in the same table may share.
///
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueKey {
    /// Constrained field (or `a+b` for a composite key)
    pub field: &'static str,
    /// Value of the field on this record
    pub value: String,
}

impl UniqueKey {
    /// Unique value `value` of `field`.
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        UniqueKey {
            field,
            value: value.into(),
        }
    }
}

/// A record stored in one entity table.
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Into<Record> + Send + Sync + 'static
{
    /// Identifier type of this table
    type Id: EntityId;

    /// Table holding records of this type
    const TABLE: TableName;

    /// Identifier of this record.
    fn id(&self) -> Self::Id;

    /// Every non-null foreign key of this record.
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Every uniqueness-constrained value of this record.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }
}
