//! Store invariants under random operation sequences.
//!
//! Each case starts from the seeded database and applies a random mix of
//! creates and updates, many of which are built to fail (taken unique
//! values, dangling references, unknown vocabulary, self-escalation).
//! After every step and at the end of the sequence the store must still
//! satisfy the invariants every operation promises.

use crate::common::*;
use incidentdb::IncidentDb;
use incidentdb_core::{
    Client, Entity, EntityId, Escalation, Incident, IncidentStatus, User, UserRole, Vocabulary,
};
use incidentdb_storage::{verify, EntityStore, HasTable};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone)]
enum Step {
    CreateClient { reg: u8, email: u8 },
    RenumberClient { client: u8, reg: u8 },
    CreateUser { email: u8, role: &'static str, client: Option<u8> },
    CreateIncident { client: u8, reporter: u8 },
    SetStatus { incident: u8, status: &'static str, resolved_at: bool },
    Escalate { incident: u8, by: u8, to: u8 },
}

const ROLES: &[&str] = &["client_contact", "technical_support", "executive", "manager"];
const STATUSES: &[&str] = &["open", "investigating", "in_progress", "resolved", "closed", "reopened", "RESOLVED"];

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u8..6, 0u8..6).prop_map(|(reg, email)| Step::CreateClient { reg, email }),
        (0u8..5, 0u8..6).prop_map(|(client, reg)| Step::RenumberClient { client, reg }),
        (0u8..6, prop::sample::select(ROLES), prop::option::of(0u8..5))
            .prop_map(|(email, role, client)| Step::CreateUser { email, role, client }),
        (0u8..5, 0u8..5).prop_map(|(client, reporter)| Step::CreateIncident { client, reporter }),
        (0u8..4, prop::sample::select(STATUSES), any::<bool>()).prop_map(
            |(incident, status, resolved_at)| Step::SetStatus { incident, status, resolved_at }
        ),
        (0u8..4, 0u8..5, 0u8..5).prop_map(|(incident, by, to)| Step::Escalate { incident, by, to }),
    ]
}

/// Operation name, arguments and, for creates, the id field of the reply.
fn call(step: &Step) -> (&'static str, Value, Option<&'static str>) {
    match step {
        Step::CreateClient { reg, email } => (
            "create_client",
            json!({
                "client_name": "Random",
                "registration_number": format!("REG-{}", reg),
                "contact_email": format!("it{}@client.test", email),
                "client_type": "startup"
            }),
            Some("client_id"),
        ),
        Step::RenumberClient { client, reg } => (
            "update_client",
            json!({
                "client_id": client.to_string(),
                "change_set": {"registration_number": format!("REG-{}", reg)}
            }),
            None,
        ),
        Step::CreateUser { email, role, client } => {
            let mut args = json!({
                "name": "Random",
                "email": format!("u{}@people.test", email),
                "role": role
            });
            if let Some(client) = client {
                args["client_id"] = json!(client.to_string());
            }
            ("create_user", args, Some("user_id"))
        }
        Step::CreateIncident { client, reporter } => {
            let mut args = incident_args(&client.to_string());
            args["reporter_user_id"] = json!(reporter.to_string());
            ("create_incident", args, Some("incident_id"))
        }
        Step::SetStatus { incident, status, resolved_at } => {
            let mut change_set = json!({"status": status});
            if *resolved_at {
                change_set["resolution_timestamp"] = json!("2025-10-01T06:00:00");
            }
            (
                "update_incident",
                json!({"incident_id": incident.to_string(), "change_set": change_set}),
                None,
            )
        }
        Step::Escalate { incident, by, to } => (
            "create_escalation",
            json!({
                "incident_id": incident.to_string(),
                "escalated_by_user": by.to_string(),
                "escalated_to_user": to.to_string(),
                "escalation_level": "management",
                "escalated_at": "2025-10-01T01:00:00"
            }),
            Some("escalation_id"),
        ),
    }
}

fn ids_are_dense<E: Entity>(db: &IncidentDb) -> bool
where
    EntityStore: HasTable<E>,
{
    db.store()
        .table::<E>()
        .iter()
        .map(|record| record.id().raw())
        .eq(1..=db.store().table::<E>().len() as u64)
}

fn no_duplicates<'a>(mut values: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    values.all(|v| seen.insert(v))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_sequences_preserve_store_invariants(steps in prop::collection::vec(step(), 1..40)) {
        let mut db = seeded_db();
        let mut next: BTreeMap<&str, u64> = [
            ("client_id", 2),
            ("user_id", 3),
            ("incident_id", 2),
            ("escalation_id", 1),
        ]
        .into_iter()
        .collect();

        for step in &steps {
            let before = db.store().clone();
            let (name, arguments, id_field) = call(step);
            let reply = db.invoke(name, arguments);

            if is_error(&reply) {
                // Atomicity: a refused call leaves every table untouched.
                prop_assert_eq!(db.store(), &before, "{:?} -> {}", step, reply);
                continue;
            }
            if let Some(field) = id_field {
                // Monotonicity: creates hand out the next dense id.
                let expected = next[field];
                prop_assert_eq!(&reply[field], &json!(expected.to_string()));
                next.insert(field, expected + 1);
            }
            // Referential integrity and uniqueness hold after every success.
            let violations = verify(db.store());
            prop_assert!(violations.is_empty(), "{:?} -> {:?}", step, violations);
        }

        prop_assert!(ids_are_dense::<Client>(&db));
        prop_assert!(ids_are_dense::<User>(&db));
        prop_assert!(ids_are_dense::<Incident>(&db));
        prop_assert!(ids_are_dense::<Escalation>(&db));

        let clients = db.store().table::<Client>();
        prop_assert!(no_duplicates(clients.iter().map(|c| c.registration_number.as_str())));
        prop_assert!(no_duplicates(clients.iter().map(|c| c.contact_email.as_str())));
        prop_assert!(no_duplicates(db.store().table::<User>().iter().map(|u| u.email.as_str())));

        // Enumeration closure, as seen by a caller.
        for incident in listed(&mut db, "discover_incidents", json!({})) {
            prop_assert!(IncidentStatus::VALUES.contains(&incident["status"].as_str().unwrap()));
        }
        for user in listed(&mut db, "discover_users", json!({})) {
            prop_assert!(UserRole::VALUES.contains(&user["role"].as_str().unwrap()));
        }
        for escalation in db.store().table::<Escalation>().iter() {
            prop_assert_ne!(escalation.escalated_by_user, escalation.escalated_to_user);
        }
    }

    #[test]
    fn sequential_creates_number_from_one(n in 1u64..30) {
        let mut db = create_db();
        for expected in 1..=n {
            let reply = db.invoke("create_client", client_args(expected));
            prop_assert_eq!(&reply["client_id"], &json!(expected.to_string()));
            // Interleaved updates never disturb the allocator.
            let touched = db.invoke(
                "update_client",
                json!({"client_id": "1", "change_set": {"industry": "retail"}}),
            );
            prop_assert_eq!(&touched["client_id"], "1");
        }
        prop_assert_eq!(db.store().table::<Client>().len() as u64, n);
    }
}
