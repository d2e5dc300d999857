//! Discovery filter matching
//!
//! Every filter is optional; an absent or empty filter matches everything.
//! Identifier and vocabulary filters compare exactly on the text, so a value
//! outside a vocabulary simply matches nothing. Name filters are
//! case-insensitive substrings; email filters are case-insensitive equality.

use incidentdb_core::{EntityId, RawId, Vocabulary};

fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|f| !f.is_empty())
}

fn active_id(filter: &Option<RawId>) -> Option<&RawId> {
    filter.as_ref().filter(|f| !f.as_str().is_empty())
}

/// Identifier filter against a required identifier.
pub fn id_is<I: EntityId>(filter: &Option<RawId>, id: I) -> bool {
    active_id(filter).map_or(true, |f| f.names(id))
}

/// Identifier filter against a nullable identifier; null never matches.
pub fn opt_id_is<I: EntityId>(filter: &Option<RawId>, id: Option<I>) -> bool {
    match active_id(filter) {
        None => true,
        Some(f) => id.map_or(false, |id| f.names(id)),
    }
}

/// Vocabulary filter against a required value.
pub fn vocab_is<V: Vocabulary>(filter: &Option<String>, value: V) -> bool {
    active(filter).map_or(true, |f| f == value.as_str())
}

/// Vocabulary filter against a nullable value; null never matches.
pub fn opt_vocab_is<V: Vocabulary>(filter: &Option<String>, value: Option<V>) -> bool {
    match active(filter) {
        None => true,
        Some(f) => value.map_or(false, |v| f == v.as_str()),
    }
}

/// Case-insensitive substring filter.
pub fn contains_ci(filter: &Option<String>, value: &str) -> bool {
    active(filter).map_or(true, |f| value.to_lowercase().contains(&f.to_lowercase()))
}

/// Case-insensitive equality filter.
pub fn eq_ci(filter: &Option<String>, value: &str) -> bool {
    active(filter).map_or(true, |f| value.to_lowercase() == f.to_lowercase())
}

/// Exact text filter.
pub fn eq(filter: &Option<String>, value: &str) -> bool {
    active(filter).map_or(true, |f| f == value)
}

/// Exact text filter against a nullable value; null never matches.
pub fn opt_eq(filter: &Option<String>, value: Option<&str>) -> bool {
    match active(filter) {
        None => true,
        Some(f) => value == Some(f),
    }
}
