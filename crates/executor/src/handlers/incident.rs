//! Incident and incident-response command handlers.
//!
//! Covers the incident itself and every record that hangs off it during
//! response: problem tickets, changes and rollbacks, work orders,
//! escalations, communications, workarounds, root cause analyses and
//! performance metrics.

use incidentdb_core::TableName;
use incidentdb_engine::ops::{
    analysis, change, communication, escalation, incident, problem, work_order, workaround,
};
use incidentdb_engine::OpContext;
use incidentdb_storage::EntityStore;

use super::{created, found, updated};
use crate::convert::convert_result;
use crate::{Output, Result};

// =============================================================================
// Incidents
// =============================================================================

/// Handle CreateIncident command.
pub fn create_incident(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: incident::CreateIncident,
) -> Result<Output> {
    let id = convert_result(incident::create_incident(store, ctx, req))?;
    Ok(created(TableName::Incidents, id))
}

/// Handle UpdateIncident command.
pub fn update_incident(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: incident::UpdateIncident,
) -> Result<Output> {
    Ok(updated(convert_result(incident::update_incident(store, ctx, req))?))
}

/// Handle DiscoverIncidents command.
pub fn discover_incidents(store: &EntityStore, filter: &incident::IncidentFilter) -> Result<Output> {
    Ok(found(incident::discover_incidents(store, filter)))
}

// =============================================================================
// Problems, changes and rollbacks
// =============================================================================

/// Handle CreateProblemTicket command.
pub fn create_problem_ticket(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: problem::CreateProblemTicket,
) -> Result<Output> {
    let id = convert_result(problem::create_problem_ticket(store, ctx, req))?;
    Ok(created(TableName::ProblemTickets, id))
}

/// Handle UpdateProblemTicket command.
pub fn update_problem_ticket(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: problem::UpdateProblemTicket,
) -> Result<Output> {
    Ok(updated(convert_result(problem::update_problem_ticket(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverProblemTickets command.
pub fn discover_problem_tickets(
    store: &EntityStore,
    filter: &problem::ProblemTicketFilter,
) -> Result<Output> {
    Ok(found(problem::discover_problem_tickets(store, filter)))
}

/// Handle CreateChangeRequest command.
pub fn create_change_request(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: change::CreateChangeRequest,
) -> Result<Output> {
    let id = convert_result(change::create_change_request(store, ctx, req))?;
    Ok(created(TableName::ChangeRequests, id))
}

/// Handle UpdateChangeRequest command.
pub fn update_change_request(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: change::UpdateChangeRequest,
) -> Result<Output> {
    Ok(updated(convert_result(change::update_change_request(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverChangeRequests command.
pub fn discover_change_requests(
    store: &EntityStore,
    filter: &change::ChangeRequestFilter,
) -> Result<Output> {
    Ok(found(change::discover_change_requests(store, filter)))
}

/// Handle CreateRollbackRequest command.
pub fn create_rollback_request(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: change::CreateRollbackRequest,
) -> Result<Output> {
    let id = convert_result(change::create_rollback_request(store, ctx, req))?;
    Ok(created(TableName::RollbackRequests, id))
}

/// Handle UpdateRollbackRequest command.
pub fn update_rollback_request(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: change::UpdateRollbackRequest,
) -> Result<Output> {
    Ok(updated(convert_result(change::update_rollback_request(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverRollbackRequests command.
pub fn discover_rollback_requests(
    store: &EntityStore,
    filter: &change::RollbackRequestFilter,
) -> Result<Output> {
    Ok(found(change::discover_rollback_requests(store, filter)))
}

// =============================================================================
// Response work
// =============================================================================

/// Handle CreateWorkOrder command.
pub fn create_work_order(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: work_order::CreateWorkOrder,
) -> Result<Output> {
    let id = convert_result(work_order::create_work_order(store, ctx, req))?;
    Ok(created(TableName::WorkOrders, id))
}

/// Handle UpdateWorkOrder command.
pub fn update_work_order(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: work_order::UpdateWorkOrder,
) -> Result<Output> {
    Ok(updated(convert_result(work_order::update_work_order(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverWorkOrders command.
pub fn discover_work_orders(
    store: &EntityStore,
    filter: &work_order::WorkOrderFilter,
) -> Result<Output> {
    Ok(found(work_order::discover_work_orders(store, filter)))
}

/// Handle CreateEscalation command.
pub fn create_escalation(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: escalation::CreateEscalation,
) -> Result<Output> {
    let id = convert_result(escalation::create_escalation(store, ctx, req))?;
    Ok(created(TableName::IncidentEscalations, id))
}

/// Handle UpdateEscalation command.
pub fn update_escalation(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: escalation::UpdateEscalation,
) -> Result<Output> {
    Ok(updated(convert_result(escalation::update_escalation(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverEscalations command.
pub fn discover_escalations(
    store: &EntityStore,
    filter: &escalation::EscalationFilter,
) -> Result<Output> {
    Ok(found(escalation::discover_escalations(store, filter)))
}

/// Handle CreateCommunication command.
pub fn create_communication(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: communication::CreateCommunication,
) -> Result<Output> {
    let id = convert_result(communication::create_communication(store, ctx, req))?;
    Ok(created(TableName::Communications, id))
}

/// Handle UpdateCommunication command.
pub fn update_communication(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: communication::UpdateCommunication,
) -> Result<Output> {
    Ok(updated(convert_result(communication::update_communication(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverCommunications command.
pub fn discover_communications(
    store: &EntityStore,
    filter: &communication::CommunicationFilter,
) -> Result<Output> {
    Ok(found(communication::discover_communications(store, filter)))
}

/// Handle CreateWorkaround command.
pub fn create_workaround(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: workaround::CreateWorkaround,
) -> Result<Output> {
    let id = convert_result(workaround::create_workaround(store, ctx, req))?;
    Ok(created(TableName::Workarounds, id))
}

/// Handle UpdateWorkaround command.
pub fn update_workaround(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: workaround::UpdateWorkaround,
) -> Result<Output> {
    Ok(updated(convert_result(workaround::update_workaround(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverWorkarounds command.
pub fn discover_workarounds(
    store: &EntityStore,
    filter: &workaround::WorkaroundFilter,
) -> Result<Output> {
    Ok(found(workaround::discover_workarounds(store, filter)))
}

// =============================================================================
// Analysis and measurement
// =============================================================================

/// Handle CreateRootCauseAnalysis command.
pub fn create_root_cause_analysis(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: analysis::CreateRootCauseAnalysis,
) -> Result<Output> {
    let id = convert_result(analysis::create_root_cause_analysis(store, ctx, req))?;
    Ok(created(TableName::RootCauseAnalysis, id))
}

/// Handle UpdateRootCauseAnalysis command.
pub fn update_root_cause_analysis(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: analysis::UpdateRootCauseAnalysis,
) -> Result<Output> {
    Ok(updated(convert_result(analysis::update_root_cause_analysis(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverRootCauseAnalyses command.
pub fn discover_root_cause_analyses(
    store: &EntityStore,
    filter: &analysis::RootCauseAnalysisFilter,
) -> Result<Output> {
    Ok(found(analysis::discover_root_cause_analyses(store, filter)))
}

/// Handle CreatePerformanceMetric command.
pub fn create_performance_metric(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: analysis::CreatePerformanceMetric,
) -> Result<Output> {
    let summary = convert_result(analysis::create_performance_metric(store, ctx, req))?;
    Ok(Output::MetricRecorded(summary))
}

/// Handle DiscoverPerformanceMetrics command.
pub fn discover_performance_metrics(
    store: &EntityStore,
    filter: &analysis::PerformanceMetricFilter,
) -> Result<Output> {
    Ok(found(analysis::discover_performance_metrics(store, filter)))
}
