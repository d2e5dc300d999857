//! Append-only journals: incident updates, audit logs, human transfers

use crate::entity::{Entity, Reference};
use crate::ids::{AuditId, IncidentId, TransferId, UpdateId, UserId};
use crate::table::TableName;
use crate::vocab::{AuditAction, AuditEntityType, EscalationLevel, UpdateType};
use serde::{Deserialize, Serialize};

/// One entry in an incident's change journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentUpdate {
    /// Identifier
    pub update_id: UpdateId,
    /// Journalled incident
    pub incident_id: IncidentId,
    /// Author
    pub updated_by_user: UserId,
    /// Kind of change
    pub update_type: UpdateType,
    /// Field that changed, or `multiple_fields`
    pub field_changed: String,
    /// Previous value
    pub old_value: String,
    /// New value
    pub new_value: String,
    /// When the update happened (caller-supplied)
    pub created_at: String,
}

impl Entity for IncidentUpdate {
    type Id = UpdateId;
    const TABLE: TableName = TableName::IncidentUpdates;

    fn id(&self) -> UpdateId {
        self.update_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("incident_id", TableName::Incidents, self.incident_id),
            Reference::new("updated_by_user", TableName::Users, self.updated_by_user),
        ]
    }
}

/// An audit trail entry.
///
/// `entity_id` is recorded as given and is not checked against the table
/// named by `entity_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    /// Identifier
    pub audit_id: AuditId,
    /// Action performed
    pub action: AuditAction,
    /// Kind of entity acted on
    pub entity_type: AuditEntityType,
    /// Identifier of the entity acted on
    pub entity_id: String,
    /// Acting user
    pub audit_by_user: UserId,
    /// Structured details of the action
    #[serde(default)]
    pub action_details: Option<serde_json::Value>,
    /// When the action happened (caller-supplied)
    pub created_at: String,
}

impl Entity for AuditLog {
    type Id = AuditId;
    const TABLE: TableName = TableName::AuditLogs;

    fn id(&self) -> AuditId {
        self.audit_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new(
            "audit_by_user",
            TableName::Users,
            self.audit_by_user,
        )]
    }
}

/// A request to hand the current interaction to a human operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanTransfer {
    /// Identifier
    pub transfer_id: TransferId,
    /// Why the transfer is needed
    pub reason: String,
    /// Free-form context handed to the operator
    pub context: serde_json::Value,
    /// Level transferred to
    pub escalation_level: EscalationLevel,
    /// Creation time
    pub created_at: String,
}

impl Entity for HumanTransfer {
    type Id = TransferId;
    const TABLE: TableName = TableName::HumanTransfers;

    fn id(&self) -> TransferId {
        self.transfer_id
    }
}
