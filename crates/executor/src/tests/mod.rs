//! Test modules for the executor crate.

pub mod envelopes;
pub mod parity;
pub mod shortcuts;

use crate::{EngineConfig, Executor};
use incidentdb_storage::EntityStore;
use serde_json::json;

pub const NOW: &str = "2025-10-01T00:00:00";

/// Executor frozen at [`NOW`].
pub fn executor() -> Executor {
    Executor::with_config(EngineConfig::fixed(NOW)).unwrap()
}

/// Store holding client 1, vendor 1, product 1, component 1, an incident
/// manager (user 1), a support engineer (user 2) and open incident 1.
pub fn seeded() -> (Executor, EntityStore) {
    let executor = executor();
    let mut store = EntityStore::new();
    let calls = [
        (
            "create_client",
            json!({
                "client_name": "Globex",
                "registration_number": "REG-1",
                "contact_email": "it@globex.test",
                "client_type": "enterprise"
            }),
        ),
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
        (
            "create_incident",
            json!({
                "title": "Payments timing out",
                "category": "service_outage",
                "severity": "P1",
                "impact_level": "high",
                "urgency_level": "critical",
                "client_id": "1",
                "component_id": "1",
                "reporter_user_id": "1",
                "detection_timestamp": "2025-09-30T23:50:00"
            }),
        ),
    ];
    for (name, arguments) in calls {
        let reply = executor.invoke(&mut store, name, arguments);
        assert_eq!(reply["success"], true, "{}: {}", name, reply);
    }
    (executor, store)
}
