//! Field validator
//!
//! Three independent checks, composed per field by the operations:
//! - enumeration membership (`InvalidEnum`)
//! - foreign-key existence (`NotFound`)
//! - table-wide uniqueness (`DuplicateConflict`)
//!
//! plus non-empty text for required names and titles. All checks read the
//! store only; operations run every check before writing anything.

use incidentdb_core::{Entity, IncidentError, IncidentResult, RawId, Vocabulary};
use incidentdb_storage::{EntityStore, HasTable, Table};

/// Parse `value` as a member of vocabulary `V`.
pub fn parse_enum<V: Vocabulary>(field: &str, value: &str) -> IncidentResult<V> {
    value
        .parse()
        .map_err(|_| IncidentError::invalid_enum::<V>(field, value))
}

/// Parse an optional vocabulary value.
pub fn parse_opt_enum<V: Vocabulary>(field: &str, value: Option<&str>) -> IncidentResult<Option<V>> {
    value.map(|v| parse_enum(field, v)).transpose()
}

/// Resolve `raw` to the identifier of an existing `E`.
///
/// A malformed identifier cannot name a record, so it is reported as
/// `NotFound` like any other missing reference.
pub fn require<E: Entity>(store: &EntityStore, raw: &RawId) -> IncidentResult<E::Id>
where
    EntityStore: HasTable<E>,
{
    raw.parse::<E::Id>()
        .ok()
        .filter(|id| store.table::<E>().contains(*id))
        .ok_or_else(|| IncidentError::not_found(E::TABLE, raw))
}

/// Resolve an optional reference; `None` skips the check.
pub fn require_opt<E: Entity>(
    store: &EntityStore,
    raw: Option<&RawId>,
) -> IncidentResult<Option<E::Id>>
where
    EntityStore: HasTable<E>,
{
    raw.map(|r| require::<E>(store, r)).transpose()
}

/// Reject empty or whitespace-only text for a required field.
pub fn require_text(field: &str, value: &str) -> IncidentResult<()> {
    if value.trim().is_empty() {
        return Err(IncidentError::validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

/// Reject `candidate` if another record in `table` shares one of its unique
/// values. The record with the candidate's own identifier is ignored, so the
/// same check serves creates and updates.
pub fn ensure_unique<E: Entity>(table: &Table<E>, candidate: &E) -> IncidentResult<()> {
    let own = candidate.id();
    for key in candidate.unique_keys() {
        let taken = table
            .iter()
            .filter(|other| other.id() != own)
            .any(|other| other.unique_keys().contains(&key));
        if taken {
            return Err(IncidentError::duplicate(key.field, key.value));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use incidentdb_core::*;

    fn store_with_client() -> EntityStore {
        let mut store = EntityStore::new();
        store.table_mut::<Client>().insert(Client {
            client_id: ClientId::new(1),
            client_name: "Initech".into(),
            registration_number: "REG-1".into(),
            contact_email: "it@initech.test".into(),
            contact_phone: Some("555-0001".into()),
            client_type: ClientType::MidMarket,
            industry: None,
            country: None,
            status: PartyStatus::Active,
            created_at: String::new(),
            updated_at: String::new(),
        });
        store
    }

    #[test]
    fn parse_enum_reports_field_and_allowed() {
        let err = parse_enum::<Level>("impact_level", "huge").unwrap_err();
        match err {
            IncidentError::InvalidEnum { field, value, allowed } => {
                assert_eq!(field, "impact_level");
                assert_eq!(value, "huge");
                assert_eq!(allowed.len(), 4);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(parse_opt_enum::<Level>("impact_level", None).unwrap(), None);
    }

    #[test]
    fn require_resolves_existing_and_rejects_missing_or_malformed() {
        let store = store_with_client();
        assert_eq!(
            require::<Client>(&store, &RawId::from("1")).unwrap(),
            ClientId::new(1)
        );
        let missing = require::<Client>(&store, &RawId::from("999")).unwrap_err();
        assert_eq!(missing.to_string(), "Client 999 not found");
        let malformed = require::<Client>(&store, &RawId::from("abc")).unwrap_err();
        assert_eq!(malformed.kind(), ErrorKind::NotFound);
        assert_eq!(require_opt::<Client>(&store, None).unwrap(), None);
    }

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text("title", "Outage").is_ok());
        assert!(require_text("title", "   ").is_err());
    }

    #[test]
    fn ensure_unique_ignores_self() {
        let store = store_with_client();
        let table = store.table::<Client>();
        let mut same = table.get(ClientId::new(1)).unwrap().clone();
        same.client_name = "Renamed".into();
        assert!(ensure_unique(table, &same).is_ok());

        let mut other = same.clone();
        other.client_id = ClientId::new(2);
        other.contact_email = "new@initech.test".into();
        other.contact_phone = None;
        let err = ensure_unique(table, &other).unwrap_err();
        assert_eq!(err.to_string(), "registration_number REG-1 already exists");
    }

    #[test]
    fn uniqueness_is_case_sensitive() {
        let store = store_with_client();
        let table = store.table::<Client>();
        let mut other = table.get(ClientId::new(1)).unwrap().clone();
        other.client_id = ClientId::new(2);
        other.registration_number = "reg-1".into();
        other.contact_email = "IT@initech.test".into();
        other.contact_phone = None;
        assert!(ensure_unique(table, &other).is_ok());
    }
}
