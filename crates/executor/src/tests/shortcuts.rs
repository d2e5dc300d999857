//! Tests for the typed shortcuts on `IncidentDb`.

use super::seeded;
use crate::ops::incident;
use crate::{descriptors, Command, ErrorKind, Executor, IncidentDb};
use serde_json::{json, Map, Value};

fn seeded_db() -> IncidentDb {
    let (executor, store) = seeded();
    IncidentDb::from_store(store, executor)
}

fn resolve_incident() -> Command {
    Command::UpdateIncident(
        serde_json::from_value::<incident::UpdateIncident>(
            json!({"incident_id": "1", "status": "resolved"}),
        )
        .unwrap(),
    )
}

#[test]
fn every_command_belongs_to_one_family() {
    for d in descriptors() {
        let mut args = Map::new();
        for name in d.required() {
            let value = match d.parameters["properties"][name]["type"].as_str() {
                Some("number") => json!(1.5),
                Some("integer") => json!(1),
                Some("object") => json!({}),
                _ => json!("1"),
            };
            args.insert(name.to_string(), value);
        }
        let cmd = Executor::parse(d.name, Value::Object(args)).unwrap();
        let families = [cmd.is_create(), cmd.is_update(), cmd.is_read_only()];
        assert_eq!(families.iter().filter(|f| **f).count(), 1, "{}", d.name);
    }
}

#[test]
fn create_refuses_an_update_without_running_it() {
    let mut db = seeded_db();
    let before = db.store().clone();

    let err = db.create(resolve_incident()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert!(err.to_string().contains("not a create operation"));
    assert_eq!(db.store(), &before);
}

#[test]
fn discover_refuses_a_create_without_running_it() {
    let mut db = seeded_db();
    let before = db.store().clone();

    let cmd = Executor::parse(
        "transfer_to_human",
        json!({"reason": "caller asked", "escalation_level": "technical"}),
    )
    .unwrap();
    assert!(db.discover(cmd.clone()).is_err());
    assert!(db.update(cmd.clone()).is_err());
    assert_eq!(db.store(), &before);

    assert_eq!(db.create(cmd).unwrap(), "1");
}

#[test]
fn update_shortcut_returns_the_record() {
    let mut db = seeded_db();
    let record = db.update(resolve_incident()).unwrap();
    assert_eq!(record.to_json()["status"], "resolved");
}
