//! Reference walkthroughs over a seeded database.

use crate::common::*;
use incidentdb::{EngineConfig, ErrorKind, Executor, IncidentDb};
use incidentdb_core::{Client, Escalation, Incident, IncidentId};
use serde_json::json;

#[test]
fn duplicate_registration_number_is_refused() {
    let mut db = create_db();
    let first = db.create(Executor::parse("create_client", client_args(1)).unwrap());
    assert_eq!(first.unwrap(), "1");

    let mut second = client_args(2);
    second["registration_number"] = json!("REG-1");
    let err = db
        .execute(Executor::parse("create_client", second).unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateConflict);

    assert_eq!(db.store().table::<Client>().len(), 1);
    let listed = listed(&mut db, "discover_clients", json!({}));
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["client_name"], "Client 1");
}

#[test]
fn incident_for_unknown_client_is_refused() {
    let mut db = seeded_db();
    let before = db.store().clone();

    let err = db
        .execute(Executor::parse("create_incident", incident_args("999")).unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Client 999 not found");

    assert_eq!(db.store().table::<Incident>().len(), 1);
    assert_eq!(db.store(), &before);
}

#[test]
fn resolving_without_escalations_keeps_resolution_timestamp() {
    // Seed earlier than NOW so the refresh of updated_at is visible.
    let earlier = seeded_db_at("2025-09-30T23:55:00");
    let mut db = IncidentDb::from_store(
        earlier.into_store(),
        Executor::with_config(EngineConfig::fixed(NOW)).unwrap(),
    );
    assert!(db.store().table::<Escalation>().is_empty());

    let updated = db.invoke("update_incident", json!({"incident_id": "1", "status": "resolved"}));
    assert_eq!(updated["status"], "resolved");
    assert_eq!(updated["created_at"], "2025-09-30T23:55:00");
    assert_eq!(updated["updated_at"], NOW);
    assert!(updated["resolution_timestamp"].is_null());

    let stored = db.get::<Incident>(IncidentId::new(1)).unwrap();
    assert_eq!(stored.resolution_timestamp, None);
    assert_eq!(stored.updated_at, NOW);
}

#[test]
fn self_escalation_is_refused() {
    let mut db = seeded_db();
    let before = db.store().clone();

    let err = db
        .execute(
            Executor::parse(
                "create_escalation",
                json!({
                    "incident_id": "1",
                    "escalated_by_user": "2",
                    "escalated_to_user": "2",
                    "escalation_level": "technical",
                    "escalated_at": "2025-10-01T00:05:00"
                }),
            )
            .unwrap(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    assert_eq!(db.store(), &before);

    let reply = db.invoke(
        "create_escalation",
        json!({
            "incident_id": "1",
            "escalated_by_user": "2",
            "escalated_to_user": "1",
            "escalation_level": "technical",
            "escalated_at": "2025-10-01T00:05:00"
        }),
    );
    assert_eq!(reply, json!({"escalation_id": "1", "success": true}));
}
