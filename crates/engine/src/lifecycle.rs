//! Lifecycle rules
//!
//! Status vocabularies live in `incidentdb_core::vocab`; this module holds the
//! timestamp gates and the composite rules tied to status.
//!
//! | Record | Gated field | Allowed statuses |
//! |--------|-------------|------------------|
//! | Incident | `resolution_timestamp` | resolved, closed |
//! | ChangeRequest | `approved_by_user` | anything but requested |
//! | ChangeRequest | `actual_start_time`, `actual_end_time` | completed, failed, rolled_back |
//! | RollbackRequest | `approved_by_user`, `completed_at` | approved, failed |
//! | WorkOrder | `actual_hours`, `completion_date` | completed |
//! | Escalation | `resolved_at` | resolved |
//! | RootCauseAnalysis | `completed_at` | completed, reviewed |
//! | PostIncidentReview | `completed_at` | completed |
//! | Communication | `sent_at` | sent |
//!
//! Gates reject: a gated value supplied by the caller together with a
//! resulting status outside the allowed set fails the whole operation.
//! Values not supplied in the call are never checked or touched, and
//! clearing a value (explicit null) is always allowed.

use incidentdb_core::{
    AnalysisStatus, ChangeStatus, DeliveryStatus, EscalationStatus, IncidentError,
    IncidentResult, IncidentStatus, ReviewStatus, RollbackStatus, UserId, UserRole,
    Vocabulary, WorkOrderStatus,
};

/// Statuses in which an incident may carry `resolution_timestamp`.
pub const INCIDENT_RESOLVED: &[IncidentStatus] = &[IncidentStatus::Resolved, IncidentStatus::Closed];

/// Statuses in which a change request may carry `approved_by_user`.
pub const CHANGE_APPROVED: &[ChangeStatus] = &[
    ChangeStatus::InProgress,
    ChangeStatus::Scheduled,
    ChangeStatus::RolledBack,
    ChangeStatus::Completed,
    ChangeStatus::Failed,
    ChangeStatus::Approved,
];

/// Statuses in which a change request may carry actual start/end times.
pub const CHANGE_EXECUTED: &[ChangeStatus] = &[
    ChangeStatus::Completed,
    ChangeStatus::Failed,
    ChangeStatus::RolledBack,
];

/// Statuses in which a rollback may carry an approver and completion time.
pub const ROLLBACK_DECIDED: &[RollbackStatus] = &[RollbackStatus::Approved, RollbackStatus::Failed];

/// Statuses in which a work order may carry actual hours and completion date.
pub const WORK_ORDER_DONE: &[WorkOrderStatus] = &[WorkOrderStatus::Completed];

/// Statuses in which an escalation may carry `resolved_at`.
pub const ESCALATION_RESOLVED: &[EscalationStatus] = &[EscalationStatus::Resolved];

/// Statuses in which an analysis may carry `completed_at`.
pub const ANALYSIS_DONE: &[AnalysisStatus] = &[AnalysisStatus::Completed, AnalysisStatus::Reviewed];

/// Statuses in which a review may carry `completed_at`.
pub const REVIEW_DONE: &[ReviewStatus] = &[ReviewStatus::Completed];

/// Delivery states in which a communication may carry `sent_at`.
pub const COMMUNICATION_SENT: &[DeliveryStatus] = &[DeliveryStatus::Sent];

/// Apply one timestamp gate.
///
/// `supplied` is whether the caller provided a non-null value for `field`
/// in this call; `status` is the status the record will have afterwards.
pub fn gate<S: Vocabulary>(
    field: &str,
    supplied: bool,
    status: S,
    allowed: &[S],
) -> IncidentResult<()> {
    if supplied && !allowed.contains(&status) {
        let names: Vec<&str> = allowed.iter().map(|s| s.as_str()).collect();
        return Err(IncidentError::validation(format!(
            "{} can only be set when status is one of [{}], not '{}'",
            field,
            names.join(", "),
            status
        )));
    }
    Ok(())
}

/// A work order past `created` must have an assignee.
pub fn require_assignee(status: WorkOrderStatus, assignee: Option<UserId>) -> IncidentResult<()> {
    if status != WorkOrderStatus::Created && assignee.is_none() {
        return Err(IncidentError::validation(format!(
            "assigned_to_user is required when work order status is '{}'",
            status
        )));
    }
    Ok(())
}

/// An escalation must move the incident to a different user.
pub fn distinct_users(escalated_by: UserId, escalated_to: UserId) -> IncidentResult<()> {
    if escalated_by == escalated_to {
        return Err(IncidentError::validation(format!(
            "escalated_by_user and escalated_to_user must differ (both are {})",
            escalated_by
        )));
    }
    Ok(())
}

/// Only contacts may be bound to a party, and only to their own kind.
pub fn role_binding(
    role: UserRole,
    has_client: bool,
    has_vendor: bool,
) -> IncidentResult<()> {
    if has_client && has_vendor {
        return Err(IncidentError::validation(
            "a user cannot belong to both a client and a vendor",
        ));
    }
    if has_client && role != UserRole::ClientContact {
        return Err(IncidentError::validation(format!(
            "client_id may only be set for role 'client_contact', not '{}'",
            role
        )));
    }
    if has_vendor && role != UserRole::VendorContact {
        return Err(IncidentError::validation(format!(
            "vendor_id may only be set for role 'vendor_contact', not '{}'",
            role
        )));
    }
    Ok(())
}
