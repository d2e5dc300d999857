//! Snapshot directories: save, reopen, and refusal of broken data.

use crate::common::*;
use incidentdb::IncidentDb;
use incidentdb_core::TableName;
use incidentdb_storage::table_path;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn save_then_open_restores_every_table() {
    let dir = TempDir::new().unwrap();
    let mut db = seeded_db();
    db.invoke(
        "create_escalation",
        json!({
            "incident_id": "1",
            "escalated_by_user": "1",
            "escalated_to_user": "2",
            "escalation_level": "technical",
            "escalated_at": "2025-10-01T00:05:00"
        }),
    );
    db.save(dir.path()).unwrap();

    let reopened = IncidentDb::open(dir.path()).unwrap();
    assert_eq!(reopened.store(), db.store());
    assert!(dir.path().join("incidentdb.toml").exists());
}

#[test]
fn reopened_store_continues_numbering() {
    let dir = TempDir::new().unwrap();
    seeded_db().save(dir.path()).unwrap();

    let mut reopened = IncidentDb::open(dir.path()).unwrap();
    let reply = reopened.invoke("create_client", client_args(2));
    assert_eq!(reply, json!({"client_id": "2", "success": true}));
}

#[test]
fn open_on_an_empty_directory_starts_empty() {
    let dir = TempDir::new().unwrap();
    let db = IncidentDb::open(dir.path().join("fresh")).unwrap();
    assert_eq!(db.store().total_records(), 0);
}

#[test]
fn dangling_reference_is_refused_on_open() {
    let dir = TempDir::new().unwrap();
    seeded_db().save(dir.path()).unwrap();
    // Incident 1 and both users now point at a client that is gone.
    fs::remove_file(table_path(dir.path(), TableName::Clients)).unwrap();

    let err = IncidentDb::open(dir.path()).err().unwrap();
    let message = err.to_string();
    assert!(message.contains("violation"), "{}", message);
    assert!(message.contains("client"), "{}", message);
}

#[test]
fn verification_can_be_turned_off() {
    let dir = TempDir::new().unwrap();
    seeded_db().save(dir.path()).unwrap();
    fs::remove_file(table_path(dir.path(), TableName::Clients)).unwrap();
    fs::write(dir.path().join("incidentdb.toml"), "verify_on_load = false\n").unwrap();

    let db = IncidentDb::open(dir.path()).unwrap();
    assert_eq!(db.store().total_records(), 6);
}

#[test]
fn malformed_config_is_refused() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("incidentdb.toml"), "max_slas_per_subscription = 0\n").unwrap();
    assert!(IncidentDb::open(dir.path()).is_err());
}

#[test]
fn exhausted_identifiers_refuse_new_records() {
    let dir = TempDir::new().unwrap();
    seeded_db().save(dir.path()).unwrap();
    let last = u64::MAX.to_string();
    let mut row = serde_json::Map::new();
    row.insert(
        last.clone(),
        json!({
            "transfer_id": last,
            "reason": "imported",
            "context": {},
            "escalation_level": "technical",
            "created_at": NOW
        }),
    );
    fs::write(
        table_path(dir.path(), TableName::HumanTransfers),
        serde_json::to_string_pretty(&row).unwrap(),
    )
    .unwrap();

    let mut db = IncidentDb::open(dir.path()).unwrap();
    let before = db.store().clone();
    let reply = db.invoke(
        "transfer_to_human",
        json!({"reason": "caller asked", "escalation_level": "technical"}),
    );
    assert!(is_error(&reply), "{}", reply);
    assert!(reply["error"].as_str().unwrap().contains("exhausted"));
    assert_eq!(db.store(), &before);
}

#[test]
fn zero_padded_keys_are_refused_on_open() {
    let dir = TempDir::new().unwrap();
    seeded_db().save(dir.path()).unwrap();
    let path = table_path(dir.path(), TableName::Clients);
    let mut clients: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let mut alias = clients["1"].clone();
    alias["registration_number"] = json!("REG-ALIAS");
    clients.insert("01".into(), alias);
    fs::write(&path, serde_json::to_string_pretty(&clients).unwrap()).unwrap();

    let err = IncidentDb::open(dir.path()).err().unwrap();
    assert!(err.to_string().contains("'01'"), "{}", err);
}
