//! Escalations, communications and workarounds

use crate::entity::{Entity, Reference};
use crate::ids::{CommunicationId, EscalationId, IncidentId, UserId, WorkaroundId};
use crate::table::TableName;
use crate::vocab::{
    CommunicationType, DeliveryMethod, DeliveryStatus, Effectiveness, EscalationLevel,
    EscalationStatus, RecipientType, WorkaroundStatus,
};
use serde::{Deserialize, Serialize};

/// Hand-off of an incident from one user to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Escalation {
    /// Identifier
    pub escalation_id: EscalationId,
    /// Escalated incident
    pub incident_id: IncidentId,
    /// User escalating
    pub escalated_by_user: UserId,
    /// User escalated to; never the same as `escalated_by_user`
    pub escalated_to_user: UserId,
    /// Level escalated to
    pub escalation_level: EscalationLevel,
    /// Free-text reason
    pub reason: Option<String>,
    /// Status
    pub status: EscalationStatus,
    /// When the escalation happened
    pub escalated_at: String,
    /// When it was resolved; only set while resolved
    pub resolved_at: Option<String>,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for Escalation {
    type Id = EscalationId;
    const TABLE: TableName = TableName::IncidentEscalations;

    fn id(&self) -> EscalationId {
        self.escalation_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("incident_id", TableName::Incidents, self.incident_id),
            Reference::new("escalated_by_user", TableName::Users, self.escalated_by_user),
            Reference::new("escalated_to_user", TableName::Users, self.escalated_to_user),
        ]
    }
}

/// A message sent about an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Communication {
    /// Identifier
    pub communication_id: CommunicationId,
    /// Incident discussed
    pub incident_id: IncidentId,
    /// Sending user
    pub sender_id: UserId,
    /// Receiving user
    pub recipient_id: UserId,
    /// Audience
    pub recipient_type: Option<RecipientType>,
    /// Purpose
    pub communication_type: CommunicationType,
    /// Channel
    pub delivery_method: DeliveryMethod,
    /// Delivery state
    pub delivery_status: DeliveryStatus,
    /// When it was sent; only set while `sent`
    pub sent_at: Option<String>,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for Communication {
    type Id = CommunicationId;
    const TABLE: TableName = TableName::Communications;

    fn id(&self) -> CommunicationId {
        self.communication_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("incident_id", TableName::Incidents, self.incident_id),
            Reference::new("sender_id", TableName::Users, self.sender_id),
            Reference::new("recipient_id", TableName::Users, self.recipient_id),
        ]
    }
}

/// A temporary mitigation for an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workaround {
    /// Identifier
    pub workaround_id: WorkaroundId,
    /// Mitigated incident
    pub incident_id: IncidentId,
    /// Implementer
    pub implemented_by_user: UserId,
    /// How well it mitigates
    pub effectiveness_level: Effectiveness,
    /// Status
    pub status: WorkaroundStatus,
    /// When it went live
    pub implemented_at: String,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for Workaround {
    type Id = WorkaroundId;
    const TABLE: TableName = TableName::Workarounds;

    fn id(&self) -> WorkaroundId {
        self.workaround_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("incident_id", TableName::Incidents, self.incident_id),
            Reference::new(
                "implemented_by_user",
                TableName::Users,
                self.implemented_by_user,
            ),
        ]
    }
}
