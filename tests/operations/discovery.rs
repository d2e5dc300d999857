//! Discovery filters as seen through `discover_*` calls.

use crate::common::*;
use incidentdb::Command;
use serde_json::json;

#[test]
fn filters_combine_and_results_are_ordered_by_id() {
    let mut db = seeded_db();
    for (title, severity) in [("Disk full", "P3"), ("Payments slow", "P2"), ("DNS flapping", "P3")] {
        let mut args = incident_args("1");
        args["title"] = json!(title);
        args["severity"] = json!(severity);
        assert_eq!(db.invoke("create_incident", args)["success"], true);
    }

    let p3 = listed(&mut db, "discover_incidents", json!({"severity": "P3"}));
    let ids: Vec<&str> = p3.iter().map(|i| i["incident_id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["2", "4"]);

    let payments = listed(&mut db, "discover_incidents", json!({"title": "PAYMENTS"}));
    assert_eq!(payments.len(), 2);

    let narrowed = listed(
        &mut db,
        "discover_incidents",
        json!({"title": "payments", "severity": "P2"}),
    );
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0]["incident_id"], "3");
}

#[test]
fn id_filters_accept_numbers_and_strings() {
    let mut db = seeded_db();
    assert_eq!(listed(&mut db, "discover_users", json!({"user_id": 2})).len(), 1);
    assert_eq!(listed(&mut db, "discover_users", json!({"user_id": "2"})).len(), 1);
    assert!(listed(&mut db, "discover_users", json!({"user_id": "42"})).is_empty());
}

#[test]
fn values_outside_a_vocabulary_match_nothing() {
    let mut db = seeded_db();
    assert!(listed(&mut db, "discover_incidents", json!({"status": "archived"})).is_empty());
    assert_eq!(listed(&mut db, "discover_incidents", json!({"status": ""})).len(), 1);
}

#[test]
fn discovery_never_mutates() {
    let mut db = seeded_db();
    let before = db.store().clone();
    for name in Command::NAMES.iter().filter(|n| n.starts_with("discover_")) {
        let reply = db.invoke(name, json!({}));
        assert!(reply.is_array(), "{}: {}", name, reply);
    }
    assert_eq!(db.store(), &before);
}
