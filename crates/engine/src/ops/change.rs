//! Change request and rollback request operations.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{id_is, opt_id_is, vocab_is};
use crate::lifecycle::{gate, CHANGE_APPROVED, CHANGE_EXECUTED, ROLLBACK_DECIDED};
use crate::patch::{apply, apply_enum, apply_opt_ref, apply_ref, apply_text, double_option, sets};
use crate::validate::{parse_enum, parse_opt_enum, require, require_opt, require_text};
use incidentdb_core::{
    ChangeId, ChangeRequest, ChangeStatus, Incident, IncidentResult, RawId, RollbackId,
    RollbackRequest, RollbackStatus, User,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_change_request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateChangeRequest {
    pub title: String,
    pub change_type: String,
    pub risk_level: String,
    pub requesting_user: RawId,
    #[serde(default)]
    pub incident_id: Option<RawId>,
    /// Default: `requested`.
    #[serde(default)]
    pub status: Option<String>,
    /// Not with status `requested`.
    #[serde(default)]
    pub approved_by_user: Option<RawId>,
    #[serde(default)]
    pub scheduled_start_time: Option<String>,
    #[serde(default)]
    pub scheduled_end_time: Option<String>,
    /// Only with status `completed`, `failed` or `rolled_back`.
    #[serde(default)]
    pub actual_start_time: Option<String>,
    /// Only with status `completed`, `failed` or `rolled_back`.
    #[serde(default)]
    pub actual_end_time: Option<String>,
}

/// Mutable change request fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChangeRequestPatch {
    pub title: Option<String>,
    pub change_type: Option<String>,
    pub risk_level: Option<String>,
    pub status: Option<String>,
    pub requesting_user: Option<RawId>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub incident_id: Option<Option<RawId>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub approved_by_user: Option<Option<RawId>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub scheduled_start_time: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub scheduled_end_time: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub actual_start_time: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub actual_end_time: Option<Option<String>>,
}

/// Arguments of `update_change_request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateChangeRequest {
    pub change_id: RawId,
    #[serde(default)]
    pub change_set: ChangeRequestPatch,
}

/// Filters of `discover_change_requests`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChangeRequestFilter {
    pub change_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub status: Option<String>,
    pub change_type: Option<String>,
    pub risk_level: Option<String>,
    pub requesting_user: Option<RawId>,
}

fn change_gates(
    status: ChangeStatus,
    approved: bool,
    started: bool,
    ended: bool,
) -> IncidentResult<()> {
    gate("approved_by_user", approved, status, CHANGE_APPROVED)?;
    gate("actual_start_time", started, status, CHANGE_EXECUTED)?;
    gate("actual_end_time", ended, status, CHANGE_EXECUTED)
}

/// Submit a change request.
pub fn create_change_request(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateChangeRequest,
) -> IncidentResult<ChangeId> {
    require_text("title", &req.title)?;
    let change_type = parse_enum("change_type", &req.change_type)?;
    let risk_level = parse_enum("risk_level", &req.risk_level)?;
    let status = parse_opt_enum("status", req.status.as_deref())?.unwrap_or(ChangeStatus::Requested);
    let requesting_user = require::<User>(store, &req.requesting_user)?;
    let incident_id = require_opt::<Incident>(store, req.incident_id.as_ref())?;
    let approved_by_user = require_opt::<User>(store, req.approved_by_user.as_ref())?;
    change_gates(
        status,
        approved_by_user.is_some(),
        req.actual_start_time.is_some(),
        req.actual_end_time.is_some(),
    )?;

    let record = ChangeRequest {
        change_id: store.table::<ChangeRequest>().next_id()?,
        incident_id,
        title: req.title,
        change_type,
        risk_level,
        status,
        requesting_user,
        approved_by_user,
        scheduled_start_time: req.scheduled_start_time,
        scheduled_end_time: req.scheduled_end_time,
        actual_start_time: req.actual_start_time,
        actual_end_time: req.actual_end_time,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update a change request.
pub fn update_change_request(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateChangeRequest,
) -> IncidentResult<ChangeRequest> {
    let mut record: ChangeRequest = load_target(store, &req.change_id)?;
    let patch = req.change_set;
    let approved = sets(&patch.approved_by_user);
    let started = sets(&patch.actual_start_time);
    let ended = sets(&patch.actual_end_time);

    apply_text("title", &mut record.title, patch.title)?;
    apply_enum("change_type", &mut record.change_type, patch.change_type)?;
    apply_enum("risk_level", &mut record.risk_level, patch.risk_level)?;
    apply_enum("status", &mut record.status, patch.status)?;
    apply_ref::<User>(store, &mut record.requesting_user, patch.requesting_user)?;
    apply_opt_ref::<Incident>(store, &mut record.incident_id, patch.incident_id)?;
    apply_opt_ref::<User>(store, &mut record.approved_by_user, patch.approved_by_user)?;
    change_gates(record.status, approved, started, ended)?;
    apply(&mut record.scheduled_start_time, patch.scheduled_start_time);
    apply(&mut record.scheduled_end_time, patch.scheduled_end_time);
    apply(&mut record.actual_start_time, patch.actual_start_time);
    apply(&mut record.actual_end_time, patch.actual_end_time);
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List change requests matching every supplied filter.
pub fn discover_change_requests(
    store: &EntityStore,
    filter: &ChangeRequestFilter,
) -> Vec<ChangeRequest> {
    listing(store, |c: &ChangeRequest| {
        id_is(&filter.change_id, c.change_id)
            && opt_id_is(&filter.incident_id, c.incident_id)
            && vocab_is(&filter.status, c.status)
            && vocab_is(&filter.change_type, c.change_type)
            && vocab_is(&filter.risk_level, c.risk_level)
            && id_is(&filter.requesting_user, c.requesting_user)
    })
}

/// Arguments of `create_rollback_request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateRollbackRequest {
    pub change_id: RawId,
    pub requesting_user: RawId,
    #[serde(default)]
    pub incident_id: Option<RawId>,
    /// Default: `requested`.
    #[serde(default)]
    pub status: Option<String>,
    /// Only with status `approved` or `failed`.
    #[serde(default)]
    pub approved_by_user: Option<RawId>,
    /// Only with status `approved` or `failed`.
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// Mutable rollback request fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RollbackRequestPatch {
    pub change_id: Option<RawId>,
    pub requesting_user: Option<RawId>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub incident_id: Option<Option<RawId>>,
    pub status: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub approved_by_user: Option<Option<RawId>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<String>>,
}

/// Arguments of `update_rollback_request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRollbackRequest {
    pub rollback_id: RawId,
    #[serde(default)]
    pub change_set: RollbackRequestPatch,
}

/// Filters of `discover_rollback_requests`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RollbackRequestFilter {
    pub rollback_id: Option<RawId>,
    pub change_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub status: Option<String>,
}

fn rollback_gates(status: RollbackStatus, approved: bool, completed: bool) -> IncidentResult<()> {
    gate("approved_by_user", approved, status, ROLLBACK_DECIDED)?;
    gate("completed_at", completed, status, ROLLBACK_DECIDED)
}

/// Request the rollback of a change.
pub fn create_rollback_request(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateRollbackRequest,
) -> IncidentResult<RollbackId> {
    let change_id = require::<ChangeRequest>(store, &req.change_id)?;
    let requesting_user = require::<User>(store, &req.requesting_user)?;
    let incident_id = require_opt::<Incident>(store, req.incident_id.as_ref())?;
    let approved_by_user = require_opt::<User>(store, req.approved_by_user.as_ref())?;
    let status =
        parse_opt_enum("status", req.status.as_deref())?.unwrap_or(RollbackStatus::Requested);
    rollback_gates(status, approved_by_user.is_some(), req.completed_at.is_some())?;

    let record = RollbackRequest {
        rollback_id: store.table::<RollbackRequest>().next_id()?,
        change_id,
        incident_id,
        requesting_user,
        status,
        approved_by_user,
        completed_at: req.completed_at,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update a rollback request.
pub fn update_rollback_request(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateRollbackRequest,
) -> IncidentResult<RollbackRequest> {
    let mut record: RollbackRequest = load_target(store, &req.rollback_id)?;
    let patch = req.change_set;
    let approved = sets(&patch.approved_by_user);
    let completed = sets(&patch.completed_at);

    apply_ref::<ChangeRequest>(store, &mut record.change_id, patch.change_id)?;
    apply_ref::<User>(store, &mut record.requesting_user, patch.requesting_user)?;
    apply_opt_ref::<Incident>(store, &mut record.incident_id, patch.incident_id)?;
    apply_enum("status", &mut record.status, patch.status)?;
    apply_opt_ref::<User>(store, &mut record.approved_by_user, patch.approved_by_user)?;
    rollback_gates(record.status, approved, completed)?;
    apply(&mut record.completed_at, patch.completed_at);
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List rollback requests matching every supplied filter.
pub fn discover_rollback_requests(
    store: &EntityStore,
    filter: &RollbackRequestFilter,
) -> Vec<RollbackRequest> {
    listing(store, |r: &RollbackRequest| {
        id_is(&filter.rollback_id, r.rollback_id)
            && id_is(&filter.change_id, r.change_id)
            && opt_id_is(&filter.incident_id, r.incident_id)
            && vocab_is(&filter.status, r.status)
    })
}
