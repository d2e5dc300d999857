//! One entity table and its identifier allocator
//!
//! A table is an ordered map from identifier to record. Ordering is by
//! numeric identifier, so iteration and "last key" are both meaningful:
//! the next identifier is always `max + 1`, and `1` for an empty table.
//! Records are never removed, so identifiers are never reused.

use incidentdb_core::{Entity, EntityId, IncidentError, IncidentResult};
use std::collections::BTreeMap;

/// Ordered identifier → record map for entity type `E`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<E: Entity> {
    rows: BTreeMap<E::Id, E>,
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Table {
            rows: BTreeMap::new(),
        }
    }
}

impl<E: Entity> Table<E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from persisted rows.
    ///
    /// # Errors
    ///
    /// Returns `Corruption` if a row is stored under a key that differs from
    /// the record's own identifier.
    pub fn from_rows(rows: BTreeMap<E::Id, E>) -> IncidentResult<Self> {
        for (key, record) in &rows {
            if *key != record.id() {
                return Err(IncidentError::corruption(format!(
                    "{} row stored under key {} has {} {}",
                    E::TABLE,
                    key,
                    E::TABLE.id_field(),
                    record.id()
                )));
            }
        }
        Ok(Table { rows })
    }

    /// Borrow the rows.
    pub fn rows(&self) -> &BTreeMap<E::Id, E> {
        &self.rows
    }

    /// Record with identifier `id`.
    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.rows.get(&id)
    }

    /// Whether a record with identifier `id` exists.
    pub fn contains(&self, id: E::Id) -> bool {
        self.rows.contains_key(&id)
    }

    /// Whether a record with raw identifier `raw` exists.
    pub fn contains_raw(&self, raw: u64) -> bool {
        self.contains(E::Id::from_raw(raw))
    }

    /// Insert or replace a record under its own identifier.
    pub fn insert(&mut self, record: E) -> Option<E> {
        self.rows.insert(record.id(), record)
    }

    /// Records in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.rows.values()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Identifier the next created record will receive.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` once the table holds identifier
    /// `u64::MAX`; identifiers are never wrapped or reused.
    pub fn next_id(&self) -> IncidentResult<E::Id> {
        match self.rows.keys().next_back() {
            Some(last) => last.next().ok_or_else(|| {
                IncidentError::validation(format!(
                    "{} identifiers exhausted after {}",
                    E::TABLE,
                    last
                ))
            }),
            None => Ok(E::Id::from_raw(1)),
        }
    }
}
