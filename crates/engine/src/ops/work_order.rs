//! Work order operations.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{id_is, opt_id_is, vocab_is};
use crate::lifecycle::{gate, require_assignee, WORK_ORDER_DONE};
use crate::patch::{
    apply, apply_enum, apply_opt_enum, apply_opt_ref, apply_ref, apply_text, double_option,
    overlay, overlay_nullable, sets,
};
use crate::validate::{parse_enum, parse_opt_enum, require, require_opt, require_text};
use incidentdb_core::{
    ChangeRequest, Incident, IncidentError, IncidentResult, ProblemTicket, RawId, User, WorkOrder,
    WorkOrderId, WorkOrderStatus,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_work_order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateWorkOrder {
    pub title: String,
    pub work_type: String,
    pub created_by_user: RawId,
    #[serde(default)]
    pub incident_id: Option<RawId>,
    #[serde(default)]
    pub change_id: Option<RawId>,
    #[serde(default)]
    pub problem_id: Option<RawId>,
    /// Required unless status is `created`.
    #[serde(default)]
    pub assigned_to_user: Option<RawId>,
    /// Default: `created`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    /// Only with status `completed`.
    #[serde(default)]
    pub actual_hours: Option<f64>,
    /// Only with status `completed`.
    #[serde(default)]
    pub completion_date: Option<String>,
}

/// Mutable work order fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkOrderPatch {
    pub title: Option<String>,
    pub work_type: Option<String>,
    pub status: Option<String>,
    pub created_by_user: Option<RawId>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub incident_id: Option<Option<RawId>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub change_id: Option<Option<RawId>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub problem_id: Option<Option<RawId>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub assigned_to_user: Option<Option<RawId>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<Option<f64>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<Option<f64>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<Option<String>>,
}

/// Arguments of `update_work_order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateWorkOrder {
    pub workorder_id: RawId,
    #[serde(default)]
    pub change_set: WorkOrderPatch,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assigned_to_user: Option<RawId>,
}

/// Filters of `discover_work_orders`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkOrderFilter {
    pub workorder_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub change_id: Option<RawId>,
    pub problem_id: Option<RawId>,
    pub status: Option<String>,
    pub assigned_to_user: Option<RawId>,
}

fn check_hours(field: &str, hours: Option<f64>) -> IncidentResult<()> {
    match hours {
        Some(h) if !h.is_finite() || h < 0.0 => Err(IncidentError::validation(format!(
            "{} must be a non-negative number, got {}",
            field, h
        ))),
        _ => Ok(()),
    }
}

fn work_order_rules(record: &WorkOrder, finished: bool, dated: bool) -> IncidentResult<()> {
    require_assignee(record.status, record.assigned_to_user)?;
    gate("actual_hours", finished, record.status, WORK_ORDER_DONE)?;
    gate("completion_date", dated, record.status, WORK_ORDER_DONE)
}

/// Open a work order.
pub fn create_work_order(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateWorkOrder,
) -> IncidentResult<WorkOrderId> {
    require_text("title", &req.title)?;
    let work_type = parse_enum("work_type", &req.work_type)?;
    let status = parse_opt_enum("status", req.status.as_deref())?.unwrap_or(WorkOrderStatus::Created);
    let priority = parse_opt_enum("priority", req.priority.as_deref())?;
    let created_by_user = require::<User>(store, &req.created_by_user)?;
    let incident_id = require_opt::<Incident>(store, req.incident_id.as_ref())?;
    let change_id = require_opt::<ChangeRequest>(store, req.change_id.as_ref())?;
    let problem_id = require_opt::<ProblemTicket>(store, req.problem_id.as_ref())?;
    let assigned_to_user = require_opt::<User>(store, req.assigned_to_user.as_ref())?;
    check_hours("estimated_hours", req.estimated_hours)?;
    check_hours("actual_hours", req.actual_hours)?;

    let record = WorkOrder {
        workorder_id: store.table::<WorkOrder>().next_id()?,
        incident_id,
        change_id,
        problem_id,
        title: req.title,
        work_type,
        priority,
        status,
        assigned_to_user,
        created_by_user,
        estimated_hours: req.estimated_hours,
        actual_hours: req.actual_hours,
        scheduled_date: req.scheduled_date,
        completion_date: req.completion_date,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    work_order_rules(
        &record,
        record.actual_hours.is_some(),
        record.completion_date.is_some(),
    )?;
    Ok(commit(store, record))
}

/// Update a work order.
pub fn update_work_order(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateWorkOrder,
) -> IncidentResult<WorkOrder> {
    let mut record: WorkOrder = load_target(store, &req.workorder_id)?;
    let mut patch = req.change_set;
    overlay(&mut patch.status, req.status);
    overlay_nullable(&mut patch.assigned_to_user, req.assigned_to_user);
    let finished = sets(&patch.actual_hours);
    let dated = sets(&patch.completion_date);

    apply_text("title", &mut record.title, patch.title)?;
    apply_enum("work_type", &mut record.work_type, patch.work_type)?;
    apply_enum("status", &mut record.status, patch.status)?;
    apply_ref::<User>(store, &mut record.created_by_user, patch.created_by_user)?;
    apply_opt_ref::<Incident>(store, &mut record.incident_id, patch.incident_id)?;
    apply_opt_ref::<ChangeRequest>(store, &mut record.change_id, patch.change_id)?;
    apply_opt_ref::<ProblemTicket>(store, &mut record.problem_id, patch.problem_id)?;
    apply_opt_ref::<User>(store, &mut record.assigned_to_user, patch.assigned_to_user)?;
    apply_opt_enum("priority", &mut record.priority, patch.priority)?;
    if let Some(hours) = patch.estimated_hours {
        check_hours("estimated_hours", hours)?;
        record.estimated_hours = hours;
    }
    if let Some(hours) = patch.actual_hours {
        check_hours("actual_hours", hours)?;
        record.actual_hours = hours;
    }
    apply(&mut record.scheduled_date, patch.scheduled_date);
    apply(&mut record.completion_date, patch.completion_date);
    work_order_rules(&record, finished, dated)?;
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List work orders matching every supplied filter.
pub fn discover_work_orders(store: &EntityStore, filter: &WorkOrderFilter) -> Vec<WorkOrder> {
    listing(store, |w: &WorkOrder| {
        id_is(&filter.workorder_id, w.workorder_id)
            && opt_id_is(&filter.incident_id, w.incident_id)
            && opt_id_is(&filter.change_id, w.change_id)
            && opt_id_is(&filter.problem_id, w.problem_id)
            && vocab_is(&filter.status, w.status)
            && opt_id_is(&filter.assigned_to_user, w.assigned_to_user)
    })
}
