//! Change requests, rollbacks and work orders

use super::optional_ref;
use crate::entity::{Entity, Reference};
use crate::ids::{ChangeId, IncidentId, ProblemId, RollbackId, UserId, WorkOrderId};
use crate::table::TableName;
use crate::vocab::{
    ChangeStatus, ChangeType, RiskLevel, RollbackStatus, WorkOrderPriority, WorkOrderStatus,
    WorkType,
};
use serde::{Deserialize, Serialize};

/// A planned change to production, optionally tied to an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// Identifier
    pub change_id: ChangeId,
    /// Related incident
    pub incident_id: Option<IncidentId>,
    /// Short summary
    pub title: String,
    /// Kind of change
    pub change_type: ChangeType,
    /// Risk
    pub risk_level: RiskLevel,
    /// Status
    pub status: ChangeStatus,
    /// Requester
    pub requesting_user: UserId,
    /// Approver; never set while `requested`
    pub approved_by_user: Option<UserId>,
    /// Planned start
    pub scheduled_start_time: Option<String>,
    /// Planned end
    pub scheduled_end_time: Option<String>,
    /// Actual start; only set once completed, failed or rolled back
    pub actual_start_time: Option<String>,
    /// Actual end; only set once completed, failed or rolled back
    pub actual_end_time: Option<String>,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for ChangeRequest {
    type Id = ChangeId;
    const TABLE: TableName = TableName::ChangeRequests;

    fn id(&self) -> ChangeId {
        self.change_id
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![Reference::new(
            "requesting_user",
            TableName::Users,
            self.requesting_user,
        )];
        optional_ref(&mut refs, "incident_id", TableName::Incidents, self.incident_id);
        optional_ref(
            &mut refs,
            "approved_by_user",
            TableName::Users,
            self.approved_by_user,
        );
        refs
    }
}

/// A request to undo a change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollbackRequest {
    /// Identifier
    pub rollback_id: RollbackId,
    /// Change being rolled back
    pub change_id: ChangeId,
    /// Related incident
    pub incident_id: Option<IncidentId>,
    /// Requester
    pub requesting_user: UserId,
    /// Status
    pub status: RollbackStatus,
    /// Approver; only set once approved or failed
    pub approved_by_user: Option<UserId>,
    /// Completion time; only set once approved or failed
    pub completed_at: Option<String>,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for RollbackRequest {
    type Id = RollbackId;
    const TABLE: TableName = TableName::RollbackRequests;

    fn id(&self) -> RollbackId {
        self.rollback_id
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![
            Reference::new("change_id", TableName::ChangeRequests, self.change_id),
            Reference::new("requesting_user", TableName::Users, self.requesting_user),
        ];
        optional_ref(&mut refs, "incident_id", TableName::Incidents, self.incident_id);
        optional_ref(
            &mut refs,
            "approved_by_user",
            TableName::Users,
            self.approved_by_user,
        );
        refs
    }
}

/// Hands-on work tied to an incident, change or problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Identifier
    pub workorder_id: WorkOrderId,
    /// Related incident
    pub incident_id: Option<IncidentId>,
    /// Related change request
    pub change_id: Option<ChangeId>,
    /// Related problem ticket
    pub problem_id: Option<ProblemId>,
    /// Short summary
    pub title: String,
    /// Kind of work
    pub work_type: WorkType,
    /// Priority
    pub priority: Option<WorkOrderPriority>,
    /// Status
    pub status: WorkOrderStatus,
    /// Assignee; required once past `created`
    pub assigned_to_user: Option<UserId>,
    /// Author
    pub created_by_user: UserId,
    /// Estimated effort
    pub estimated_hours: Option<f64>,
    /// Actual effort; only set once completed
    pub actual_hours: Option<f64>,
    /// Planned date
    pub scheduled_date: Option<String>,
    /// Completion date; only set once completed
    pub completion_date: Option<String>,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for WorkOrder {
    type Id = WorkOrderId;
    const TABLE: TableName = TableName::WorkOrders;

    fn id(&self) -> WorkOrderId {
        self.workorder_id
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![Reference::new(
            "created_by_user",
            TableName::Users,
            self.created_by_user,
        )];
        optional_ref(&mut refs, "incident_id", TableName::Incidents, self.incident_id);
        optional_ref(&mut refs, "change_id", TableName::ChangeRequests, self.change_id);
        optional_ref(&mut refs, "problem_id", TableName::ProblemTickets, self.problem_id);
        optional_ref(
            &mut refs,
            "assigned_to_user",
            TableName::Users,
            self.assigned_to_user,
        );
        refs
    }
}
