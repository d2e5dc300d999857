//! Partial updates
//!
//! Update requests carry a per-entity patch: one optional slot per mutable
//! field. Only present slots are validated and applied. Nullable fields use
//! `Option<Option<T>>` so that an explicit `null` (clear) is distinguishable
//! from an absent key (leave unchanged):
//!
//! | JSON | Slot |
//! |------|------|
//! | key absent | `None` |
//! | `"field": null` | `Some(None)` |
//! | `"field": "x"` | `Some(Some("x"))` |

use crate::validate::{parse_enum, require, require_text};
use incidentdb_core::{Entity, IncidentResult, RawId, Vocabulary};
use incidentdb_storage::{EntityStore, HasTable};
use serde::{Deserialize, Deserializer};

/// Deserialize a present key into `Some(value)`, keeping `null` as
/// `Some(None)`. Use with `#[serde(default)]`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Let a convenience argument override the matching `change_set` slot.
pub fn overlay<T>(slot: &mut Option<T>, argument: Option<T>) {
    if argument.is_some() {
        *slot = argument;
    }
}

/// [`overlay`] for a nullable slot: a supplied argument always sets a value.
pub fn overlay_nullable<T>(slot: &mut Option<Option<T>>, argument: Option<T>) {
    if let Some(value) = argument {
        *slot = Some(Some(value));
    }
}

/// Whether a nullable slot sets a value (as opposed to clearing or skipping).
pub fn sets<T>(slot: &Option<Option<T>>) -> bool {
    matches!(slot, Some(Some(_)))
}

/// Overwrite `target` when the slot is present.
pub fn apply<T>(target: &mut T, slot: Option<T>) {
    if let Some(value) = slot {
        *target = value;
    }
}

/// Overwrite a required text field, rejecting blank values.
pub fn apply_text(field: &str, target: &mut String, slot: Option<String>) -> IncidentResult<()> {
    if let Some(value) = slot {
        require_text(field, &value)?;
        *target = value;
    }
    Ok(())
}

/// Overwrite a vocabulary field.
pub fn apply_enum<V: Vocabulary>(
    field: &str,
    target: &mut V,
    slot: Option<String>,
) -> IncidentResult<()> {
    if let Some(value) = slot {
        *target = parse_enum(field, &value)?;
    }
    Ok(())
}

/// Overwrite or clear a nullable vocabulary field.
pub fn apply_opt_enum<V: Vocabulary>(
    field: &str,
    target: &mut Option<V>,
    slot: Option<Option<String>>,
) -> IncidentResult<()> {
    if let Some(value) = slot {
        *target = value.map(|v| parse_enum(field, &v)).transpose()?;
    }
    Ok(())
}

/// Overwrite a required foreign key.
pub fn apply_ref<E: Entity>(
    store: &EntityStore,
    target: &mut E::Id,
    slot: Option<RawId>,
) -> IncidentResult<()>
where
    EntityStore: HasTable<E>,
{
    if let Some(raw) = slot {
        *target = require::<E>(store, &raw)?;
    }
    Ok(())
}

/// Overwrite or clear a nullable foreign key.
pub fn apply_opt_ref<E: Entity>(
    store: &EntityStore,
    target: &mut Option<E::Id>,
    slot: Option<Option<RawId>>,
) -> IncidentResult<()>
where
    EntityStore: HasTable<E>,
{
    if let Some(value) = slot {
        *target = value.map(|raw| require::<E>(store, &raw)).transpose()?;
    }
    Ok(())
}
