//! Incidents and problem tickets

use super::optional_ref;
use crate::entity::{Entity, Reference};
use crate::ids::{ClientId, ComponentId, IncidentId, ProblemId, UserId};
use crate::table::TableName;
use crate::vocab::{IncidentCategory, IncidentStatus, Level, ProblemPriority, ProblemStatus, Severity};
use serde::{Deserialize, Serialize};

/// A service disruption reported against a client's component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Identifier
    pub incident_id: IncidentId,
    /// Short summary
    pub title: String,
    /// Category
    pub category: IncidentCategory,
    /// Severity
    pub severity: Severity,
    /// Business impact
    pub impact_level: Level,
    /// Urgency
    pub urgency_level: Level,
    /// Status
    pub status: IncidentStatus,
    /// Affected client
    pub client_id: ClientId,
    /// Affected component
    pub component_id: ComponentId,
    /// Reporting user
    pub reporter_user_id: UserId,
    /// Assignee
    pub assigned_to_user_id: Option<UserId>,
    /// When the incident was detected
    pub detection_timestamp: String,
    /// When the incident was resolved; only set while resolved or closed
    pub resolution_timestamp: Option<String>,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for Incident {
    type Id = IncidentId;
    const TABLE: TableName = TableName::Incidents;

    fn id(&self) -> IncidentId {
        self.incident_id
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![
            Reference::new("client_id", TableName::Clients, self.client_id),
            Reference::new(
                "component_id",
                TableName::InfrastructureComponents,
                self.component_id,
            ),
            Reference::new("reporter_user_id", TableName::Users, self.reporter_user_id),
        ];
        optional_ref(
            &mut refs,
            "assigned_to_user_id",
            TableName::Users,
            self.assigned_to_user_id,
        );
        refs
    }
}

/// Underlying cause investigation raised from an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemTicket {
    /// Identifier
    pub problem_id: ProblemId,
    /// Originating incident
    pub incident_id: IncidentId,
    /// Short summary
    pub title: String,
    /// Status
    pub status: ProblemStatus,
    /// Priority
    pub priority: Option<ProblemPriority>,
    /// User who raised the ticket
    pub issued_by_user: UserId,
    /// Assignee
    pub assigned_to_user: Option<UserId>,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for ProblemTicket {
    type Id = ProblemId;
    const TABLE: TableName = TableName::ProblemTickets;

    fn id(&self) -> ProblemId {
        self.problem_id
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![
            Reference::new("incident_id", TableName::Incidents, self.incident_id),
            Reference::new("issued_by_user", TableName::Users, self.issued_by_user),
        ];
        optional_ref(
            &mut refs,
            "assigned_to_user",
            TableName::Users,
            self.assigned_to_user,
        );
        refs
    }
}
