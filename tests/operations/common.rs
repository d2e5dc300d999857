//! Common test utilities for operation tests

use incidentdb::{EngineConfig, IncidentDb};
use serde_json::{json, Value};

/// Time every test database is frozen at.
pub const NOW: &str = "2025-10-01T00:00:00";

/// Empty database frozen at [`NOW`].
pub fn create_db() -> IncidentDb {
    create_db_at(NOW)
}

/// Empty database frozen at `timestamp`.
pub fn create_db_at(timestamp: &str) -> IncidentDb {
    IncidentDb::with_config(EngineConfig::fixed(timestamp)).unwrap()
}

/// Database holding client 1, vendor 1, product 1, component 1, an
/// incident manager (user 1), a support engineer (user 2) and open
/// incident 1.
pub fn seeded_db() -> IncidentDb {
    seeded_db_at(NOW)
}

/// [`seeded_db`] with every record stamped `timestamp`.
pub fn seeded_db_at(timestamp: &str) -> IncidentDb {
    let mut db = create_db_at(timestamp);
    for (name, arguments) in seed_calls() {
        let reply = db.invoke(name, arguments);
        assert_eq!(reply["success"], true, "{}: {}", name, reply);
    }
    db
}

fn seed_calls() -> Vec<(&'static str, Value)> {
    vec![
        ("create_client", client_args(1)),
        (
            "create_vendor",
            json!({
                "vendor_name": "Acme Cloud",
                "vendor_email": "support@acme.test",
                "vendor_phone": "555-0100",
                "vendor_type": "cloud_provider"
            }),
        ),
        (
            "create_product",
            json!({
                "product_name": "Payments API",
                "product_type": "application",
                "support_vendor_id": "1"
            }),
        ),
        (
            "create_component",
            json!({
                "component_name": "pay-db-01",
                "component_type": "database",
                "environment": "production",
                "product_id": "1"
            }),
        ),
        (
            "create_user",
            json!({"name": "Ada", "email": "ada@globex.test", "role": "incident_manager"}),
        ),
        (
            "create_user",
            json!({"name": "Lin", "email": "lin@globex.test", "role": "technical_support"}),
        ),
        ("create_incident", incident_args("1")),
    ]
}

/// Arguments for a client whose unique fields are derived from `n`.
pub fn client_args(n: u64) -> Value {
    json!({
        "client_name": format!("Client {}", n),
        "registration_number": format!("REG-{}", n),
        "contact_email": format!("it{}@client.test", n),
        "client_type": "enterprise"
    })
}

/// Arguments for a P1 outage reported by user 1 against component 1.
pub fn incident_args(client_id: &str) -> Value {
    json!({
        "title": "Payments timing out",
        "category": "service_outage",
        "severity": "P1",
        "impact_level": "high",
        "urgency_level": "critical",
        "client_id": client_id,
        "component_id": "1",
        "reporter_user_id": "1",
        "detection_timestamp": "2025-09-30T23:50:00"
    })
}

/// True when `reply` is an error envelope.
pub fn is_error(reply: &Value) -> bool {
    reply["halt"] == true && reply["error"].is_string()
}

/// Records returned by a discover call, as JSON.
pub fn listed(db: &mut IncidentDb, name: &str, filters: Value) -> Vec<Value> {
    match db.invoke(name, filters) {
        Value::Array(rows) => rows,
        other => panic!("Expected a list from {}, got {}", name, other),
    }
}
