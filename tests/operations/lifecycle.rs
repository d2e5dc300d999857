//! Status gates and composite rules, driven through the JSON interface.

use crate::common::*;
use serde_json::json;

#[test]
fn resolution_timestamp_needs_a_resolved_status() {
    let mut db = seeded_db();

    let early = db.invoke(
        "update_incident",
        json!({"incident_id": "1", "change_set": {"resolution_timestamp": "2025-10-01T04:00:00"}}),
    );
    assert!(is_error(&early));
    assert!(early["error"].as_str().unwrap().contains("resolution_timestamp"));

    let resolved = db.invoke(
        "update_incident",
        json!({
            "incident_id": "1",
            "change_set": {"status": "resolved", "resolution_timestamp": "2025-10-01T04:00:00"}
        }),
    );
    assert_eq!(resolved["status"], "resolved");
    assert_eq!(resolved["resolution_timestamp"], "2025-10-01T04:00:00");

    let cleared = db.invoke(
        "update_incident",
        json!({"incident_id": "1", "change_set": {"status": "open", "resolution_timestamp": null}}),
    );
    assert_eq!(cleared["status"], "open");
    assert!(cleared["resolution_timestamp"].is_null());
}

#[test]
fn incident_created_resolved_may_carry_its_timestamp() {
    let mut db = seeded_db();
    let mut args = incident_args("1");
    args["status"] = json!("closed");
    args["resolution_timestamp"] = json!("2025-09-30T23:59:00");
    assert_eq!(
        db.invoke("create_incident", args),
        json!({"incident_id": "2", "success": true})
    );

    let mut open = incident_args("1");
    open["resolution_timestamp"] = json!("2025-09-30T23:59:00");
    assert!(is_error(&db.invoke("create_incident", open)));
}

#[test]
fn work_order_past_created_needs_an_assignee() {
    let mut db = seeded_db();
    let base = json!({
        "title": "Replace disk",
        "work_type": "hardware_replacement",
        "created_by_user": "1",
        "incident_id": "1"
    });

    let draft = db.invoke("create_work_order", base.clone());
    assert_eq!(draft, json!({"workorder_id": "1", "success": true}));

    let unassigned = db.invoke(
        "update_work_order",
        json!({"workorder_id": "1", "change_set": {"status": "in_progress"}}),
    );
    assert!(is_error(&unassigned));

    let assigned = db.invoke(
        "update_work_order",
        json!({"workorder_id": "1", "change_set": {"status": "assigned", "assigned_to_user": "2"}}),
    );
    assert_eq!(assigned["status"], "assigned");
    assert_eq!(assigned["assigned_to_user"], "2");

    let early_hours = db.invoke(
        "update_work_order",
        json!({"workorder_id": "1", "change_set": {"actual_hours": 3.5}}),
    );
    assert!(is_error(&early_hours));

    let done = db.invoke(
        "update_work_order",
        json!({
            "workorder_id": "1",
            "change_set": {
                "status": "completed",
                "actual_hours": 3.5,
                "completion_date": "2025-10-01T09:00:00"
            }
        }),
    );
    assert_eq!(done["status"], "completed");
    assert_eq!(done["actual_hours"], 3.5);
}

#[test]
fn escalation_resolved_at_needs_resolved_status() {
    let mut db = seeded_db();
    let escalation = json!({
        "incident_id": "1",
        "escalated_by_user": "1",
        "escalated_to_user": "2",
        "escalation_level": "technical",
        "escalated_at": "2025-10-01T00:05:00",
        "resolved_at": "2025-10-01T02:00:00"
    });
    assert!(is_error(&db.invoke("create_escalation", escalation.clone())));

    let mut resolved = escalation;
    resolved["status"] = json!("resolved");
    assert_eq!(
        db.invoke("create_escalation", resolved),
        json!({"escalation_id": "1", "success": true})
    );
}

#[test]
fn only_contacts_belong_to_a_party() {
    let mut db = seeded_db();
    let engineer = db.invoke(
        "create_user",
        json!({"name": "Sam", "email": "sam@globex.test", "role": "technical_support", "client_id": "1"}),
    );
    assert!(is_error(&engineer));

    let contact = db.invoke(
        "create_user",
        json!({"name": "Sam", "email": "sam@globex.test", "role": "client_contact", "client_id": "1"}),
    );
    assert_eq!(contact, json!({"user_id": "3", "success": true}));

    let both = db.invoke(
        "update_user",
        json!({"user_id": "3", "change_set": {"vendor_id": "1"}}),
    );
    assert!(is_error(&both));
}

#[test]
fn resolving_ignores_open_escalations() {
    let mut db = seeded_db();
    db.invoke(
        "create_escalation",
        json!({
            "incident_id": "1",
            "escalated_by_user": "1",
            "escalated_to_user": "2",
            "escalation_level": "management",
            "escalated_at": "2025-10-01T00:05:00"
        }),
    );
    let resolved = db.invoke("update_incident", json!({"incident_id": "1", "status": "resolved"}));
    assert_eq!(resolved["status"], "resolved");
}
