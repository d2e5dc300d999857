//! Tests for the JSON replies of `Executor::invoke`.

use super::{executor, seeded, NOW};
use incidentdb_storage::EntityStore;
use serde_json::json;

#[test]
fn create_envelope_carries_id_and_success() {
    let (executor, mut store) = seeded();
    let reply = executor.invoke(
        &mut store,
        "create_workaround",
        json!({
            "incident_id": "1",
            "implemented_by_user": "2",
            "effectiveness_level": "partial_mitigation",
            "implemented_at": "2025-10-01T00:30:00"
        }),
    );
    assert_eq!(reply, json!({"workaround_id": "1", "success": true}));
}

#[test]
fn integer_ids_are_accepted() {
    let (executor, mut store) = seeded();
    let reply = executor.invoke(
        &mut store,
        "create_incident_report",
        json!({"incident_id": 1, "report_type": "post_mortem", "generated_by_user": 1}),
    );
    assert_eq!(reply, json!({"report_id": "1", "success": true}));
}

#[test]
fn metric_envelope_lists_values_per_type() {
    let (executor, mut store) = seeded();
    for minutes in [12.7, 3.0] {
        executor.invoke(
            &mut store,
            "create_performance_metric",
            json!({
                "incident_id": "1",
                "metric_type": "response_time",
                "calculated_value_minutes": minutes,
                "recorded_by_user": "1"
            }),
        );
    }
    let reply = executor.invoke(
        &mut store,
        "create_performance_metric",
        json!({
            "incident_id": "1",
            "metric_type": "resolution_time",
            "calculated_value_minutes": 95,
            "recorded_by_user": "1",
            "target_minutes": 240
        }),
    );
    assert_eq!(
        reply,
        json!({
            "metric_id": "3",
            "calculated_values": {"resolution_time": [95], "response_time": [12, 3]},
            "success": true
        })
    );
}

#[test]
fn update_envelope_is_the_record() {
    let (executor, mut store) = seeded();
    let reply = executor.invoke(
        &mut store,
        "update_incident",
        json!({"incident_id": "1", "status": "resolved"}),
    );
    assert_eq!(reply["incident_id"], "1");
    assert_eq!(reply["status"], "resolved");
    assert_eq!(reply["updated_at"], NOW);
    assert!(reply["resolution_timestamp"].is_null());
    assert!(reply.get("success").is_none());
}

#[test]
fn discover_envelope_is_a_list() {
    let (executor, mut store) = seeded();
    let reply = executor.invoke(&mut store, "discover_users", json!({"role": "technical_support"}));
    let users = reply.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "lin@globex.test");

    let none = executor.invoke(&mut store, "discover_users", json!({"role": "astronaut"}));
    assert_eq!(none, json!([]));
}

#[test]
fn errors_halt() {
    let (executor, mut store) = seeded();
    let reply = executor.invoke(
        &mut store,
        "create_incident",
        json!({
            "title": "Ghost client",
            "category": "data_loss",
            "severity": "P2",
            "impact_level": "low",
            "urgency_level": "low",
            "client_id": "999",
            "component_id": "1",
            "reporter_user_id": "1",
            "detection_timestamp": "2025-10-01T00:00:00"
        }),
    );
    assert_eq!(reply, json!({"error": "Client 999 not found", "halt": true}));
}

#[test]
fn invalid_enum_message_lists_allowed_values() {
    let (executor, mut store) = seeded();
    let reply = executor.invoke(
        &mut store,
        "update_incident",
        json!({"incident_id": "1", "change_set": {"severity": "P0"}}),
    );
    assert_eq!(
        reply["error"],
        "Invalid severity 'P0'. Must be one of [P1, P2, P3, P4]"
    );
    assert_eq!(reply["halt"], true);
}

#[test]
fn unknown_operation_halts() {
    let executor = executor();
    let mut store = EntityStore::new();
    let reply = executor.invoke(&mut store, "delete_incident", json!({"incident_id": "1"}));
    assert_eq!(reply["error"], "Unknown operation 'delete_incident'");
    assert_eq!(reply["halt"], true);
}

#[test]
fn malformed_arguments_halt() {
    let executor = executor();
    let mut store = EntityStore::new();

    let missing = executor.invoke(&mut store, "create_vendor", json!({"vendor_name": "Acme"}));
    assert_eq!(missing["halt"], true);
    assert!(missing["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid arguments for create_vendor"));

    let unknown_field = executor.invoke(
        &mut store,
        "discover_clients",
        json!({"client_colour": "blue"}),
    );
    assert_eq!(unknown_field["halt"], true);

    let not_an_object = executor.invoke(&mut store, "discover_clients", json!(["1"]));
    assert_eq!(not_an_object["halt"], true);
}

#[test]
fn null_arguments_mean_no_filters() {
    let (executor, mut store) = seeded();
    let reply = executor.invoke(&mut store, "discover_clients", serde_json::Value::Null);
    assert_eq!(reply.as_array().map(Vec::len), Some(1));
}
