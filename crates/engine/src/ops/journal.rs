//! Append-only journals: incident updates, audit entries and human transfers.
//!
//! Journal records are never updated. Their `created_at` is the time the
//! caller reports for the event, except for human transfers which are
//! stamped with the invocation time.

use super::{commit, listing};
use crate::context::OpContext;
use crate::discover::{eq, id_is, vocab_is};
use crate::validate::{parse_enum, require, require_text};
use incidentdb_core::{
    AuditId, AuditLog, HumanTransfer, Incident, IncidentResult, IncidentUpdate, RawId, TransferId,
    UpdateId, User,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Field name recorded when the details do not name one.
pub const MULTIPLE_FIELDS: &str = "multiple_fields";

fn multiple_fields() -> String {
    MULTIPLE_FIELDS.to_string()
}

/// Accept any JSON value as text; strings are taken verbatim.
fn as_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// What an incident update changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDetails {
    #[serde(default = "multiple_fields", deserialize_with = "as_text")]
    pub field_changed: String,
    #[serde(default, deserialize_with = "as_text")]
    pub old_value: String,
    #[serde(default, deserialize_with = "as_text")]
    pub new_value: String,
}

impl Default for UpdateDetails {
    fn default() -> Self {
        Self {
            field_changed: multiple_fields(),
            old_value: String::new(),
            new_value: String::new(),
        }
    }
}

/// Arguments of `create_incident_update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateIncidentUpdate {
    pub incident_id: RawId,
    pub update_type: String,
    #[serde(default)]
    pub update_details: UpdateDetails,
    pub updated_by_user: RawId,
    /// Stored as the entry's `created_at`.
    pub update_timestamp: String,
}

/// Filters of `discover_incident_updates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncidentUpdateFilter {
    pub update_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub update_type: Option<String>,
}

/// Append an entry to an incident's change history.
pub fn create_incident_update(
    store: &mut EntityStore,
    _ctx: &OpContext,
    req: CreateIncidentUpdate,
) -> IncidentResult<UpdateId> {
    let incident_id = require::<Incident>(store, &req.incident_id)?;
    let updated_by_user = require::<User>(store, &req.updated_by_user)?;
    let update_type = parse_enum("update_type", &req.update_type)?;
    require_text("update_timestamp", &req.update_timestamp)?;

    let details = req.update_details;
    let record = IncidentUpdate {
        update_id: store.table::<IncidentUpdate>().next_id()?,
        incident_id,
        updated_by_user,
        update_type,
        field_changed: details.field_changed,
        old_value: details.old_value,
        new_value: details.new_value,
        created_at: req.update_timestamp,
    };
    Ok(commit(store, record))
}

/// List incident updates matching every supplied filter.
pub fn discover_incident_updates(
    store: &EntityStore,
    filter: &IncidentUpdateFilter,
) -> Vec<IncidentUpdate> {
    listing(store, |u: &IncidentUpdate| {
        id_is(&filter.update_id, u.update_id)
            && id_is(&filter.incident_id, u.incident_id)
            && vocab_is(&filter.update_type, u.update_type)
    })
}

/// Arguments of `create_audit_log`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateAuditLog {
    pub action_type: String,
    pub entity_type: String,
    /// Recorded as given; not resolved against `entity_type`'s table.
    pub entity_id: RawId,
    pub performed_by_user: RawId,
    #[serde(default)]
    pub action_details: Option<Value>,
    /// Stored as the entry's `created_at`.
    pub timestamp: String,
}

/// Filters of `discover_audit_logs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditLogFilter {
    pub audit_id: Option<RawId>,
    pub audit_by_user: Option<RawId>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub action: Option<String>,
}

/// Append an audit entry.
pub fn create_audit_log(
    store: &mut EntityStore,
    _ctx: &OpContext,
    req: CreateAuditLog,
) -> IncidentResult<AuditId> {
    let action = parse_enum("action_type", &req.action_type)?;
    let entity_type = parse_enum("entity_type", &req.entity_type)?;
    let audit_by_user = require::<User>(store, &req.performed_by_user)?;
    require_text("timestamp", &req.timestamp)?;

    let record = AuditLog {
        audit_id: store.table::<AuditLog>().next_id()?,
        action,
        entity_type,
        entity_id: req.entity_id.as_str().to_string(),
        audit_by_user,
        action_details: req.action_details,
        created_at: req.timestamp,
    };
    Ok(commit(store, record))
}

/// List audit entries matching every supplied filter.
pub fn discover_audit_logs(store: &EntityStore, filter: &AuditLogFilter) -> Vec<AuditLog> {
    listing(store, |a: &AuditLog| {
        id_is(&filter.audit_id, a.audit_id)
            && id_is(&filter.audit_by_user, a.audit_by_user)
            && vocab_is(&filter.entity_type, a.entity_type)
            && eq(&filter.entity_id, &a.entity_id)
            && vocab_is(&filter.action, a.action)
    })
}

/// Arguments of `transfer_to_human`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransferToHuman {
    pub reason: String,
    /// Free-form context handed to the human agent.
    #[serde(default)]
    pub context: Value,
    pub escalation_level: String,
}

/// Hand the interaction over to a human agent.
pub fn transfer_to_human(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: TransferToHuman,
) -> IncidentResult<TransferId> {
    require_text("reason", &req.reason)?;
    let escalation_level = parse_enum("escalation_level", &req.escalation_level)?;

    let record = HumanTransfer {
        transfer_id: store.table::<HumanTransfer>().next_id()?,
        reason: req.reason,
        context: req.context,
        escalation_level,
        created_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::{ctx, raw, seeded, NOW};
    use incidentdb_core::{AuditAction, AuditEntityType, ErrorKind, EscalationLevel};
    use serde_json::json;

    #[test]
    fn update_details_default_to_multiple_fields() {
        let mut store = seeded();
        let req: CreateIncidentUpdate = serde_json::from_value(json!({
            "incident_id": "1",
            "update_type": "status_change",
            "update_details": {"note": "triaged"},
            "updated_by_user": "2",
            "update_timestamp": "2025-10-01T00:20:00"
        }))
        .unwrap();
        let id = create_incident_update(&mut store, &ctx(), req).unwrap();
        let entry = store.get::<IncidentUpdate>(id).unwrap();
        assert_eq!(entry.field_changed, MULTIPLE_FIELDS);
        assert_eq!(entry.old_value, "");
        assert_eq!(entry.created_at, "2025-10-01T00:20:00");
    }

    #[test]
    fn update_details_values_become_text() {
        let mut store = seeded();
        let req: CreateIncidentUpdate = serde_json::from_value(json!({
            "incident_id": 1,
            "update_type": "severity_change",
            "update_details": {"field_changed": "severity", "old_value": "P2", "new_value": 1},
            "updated_by_user": 1,
            "update_timestamp": "2025-10-01T00:25:00"
        }))
        .unwrap();
        let id = create_incident_update(&mut store, &ctx(), req).unwrap();
        let entry = store.get::<IncidentUpdate>(id).unwrap();
        assert_eq!(entry.field_changed, "severity");
        assert_eq!(entry.new_value, "1");

        let filter = IncidentUpdateFilter {
            update_type: Some("severity_change".into()),
            ..Default::default()
        };
        assert_eq!(discover_incident_updates(&store, &filter).len(), 1);
    }

    #[test]
    fn audit_entity_id_is_not_resolved() {
        let mut store = seeded();
        let req = CreateAuditLog {
            action_type: "delete".into(),
            entity_type: "work_order".into(),
            entity_id: RawId::from("9001"),
            performed_by_user: raw(1),
            action_details: Some(json!({"reason": "duplicate"})),
            timestamp: "2025-10-01T01:00:00".into(),
        };
        let id = create_audit_log(&mut store, &ctx(), req).unwrap();
        let entry = store.get::<AuditLog>(id).unwrap();
        assert_eq!(entry.action, AuditAction::Delete);
        assert_eq!(entry.entity_type, AuditEntityType::WorkOrder);
        assert_eq!(entry.entity_id, "9001");

        let filter = AuditLogFilter {
            entity_id: Some("9001".into()),
            audit_by_user: Some(raw(1)),
            ..Default::default()
        };
        assert_eq!(discover_audit_logs(&store, &filter).len(), 1);
    }

    #[test]
    fn audit_requires_known_user_and_entity_type() {
        let mut store = seeded();
        let mut req = CreateAuditLog {
            action_type: "update".into(),
            entity_type: "spaceship".into(),
            entity_id: RawId::from("1"),
            performed_by_user: raw(1),
            action_details: None,
            timestamp: "2025-10-01T01:00:00".into(),
        };
        assert_eq!(
            create_audit_log(&mut store, &ctx(), req.clone()).unwrap_err().kind(),
            ErrorKind::InvalidEnum
        );
        req.entity_type = "incident".into();
        req.performed_by_user = raw(44);
        assert_eq!(
            create_audit_log(&mut store, &ctx(), req).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert!(store.table::<AuditLog>().is_empty());
    }

    #[test]
    fn transfer_records_context() {
        let mut store = seeded();
        let req = TransferToHuman {
            reason: "Customer requests a call".into(),
            context: json!({"incident_id": "1"}),
            escalation_level: "management".into(),
        };
        let id = transfer_to_human(&mut store, &ctx(), req).unwrap();
        assert_eq!(id, TransferId::new(1));
        let transfer = store.get::<HumanTransfer>(id).unwrap();
        assert_eq!(transfer.escalation_level, EscalationLevel::Management);
        assert_eq!(transfer.created_at, NOW);
    }
}
