//! Escalation operations.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{id_is, vocab_is};
use crate::lifecycle::{distinct_users, gate, ESCALATION_RESOLVED};
use crate::patch::{apply, apply_enum, apply_ref, apply_text, double_option, sets};
use crate::validate::{parse_enum, parse_opt_enum, require, require_text};
use incidentdb_core::{
    Escalation, EscalationId, EscalationStatus, Incident, IncidentResult, RawId, User,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_escalation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEscalation {
    pub incident_id: RawId,
    pub escalated_by_user: RawId,
    /// Must differ from `escalated_by_user`.
    pub escalated_to_user: RawId,
    pub escalation_level: String,
    pub escalated_at: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Default: `active`.
    #[serde(default)]
    pub status: Option<String>,
    /// Only with status `resolved`.
    #[serde(default)]
    pub resolved_at: Option<String>,
}

/// Mutable escalation fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EscalationPatch {
    pub escalated_by_user: Option<RawId>,
    pub escalated_to_user: Option<RawId>,
    pub escalation_level: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub reason: Option<Option<String>>,
    pub status: Option<String>,
    pub escalated_at: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<Option<String>>,
}

/// Arguments of `update_escalation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEscalation {
    pub escalation_id: RawId,
    #[serde(default)]
    pub change_set: EscalationPatch,
}

/// Filters of `discover_escalations`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EscalationFilter {
    pub escalation_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub status: Option<String>,
    pub escalation_level: Option<String>,
    pub escalated_to_user: Option<RawId>,
}

/// Escalate an incident from one user to another.
pub fn create_escalation(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateEscalation,
) -> IncidentResult<EscalationId> {
    let incident_id = require::<Incident>(store, &req.incident_id)?;
    let escalated_by_user = require::<User>(store, &req.escalated_by_user)?;
    let escalated_to_user = require::<User>(store, &req.escalated_to_user)?;
    distinct_users(escalated_by_user, escalated_to_user)?;
    let escalation_level = parse_enum("escalation_level", &req.escalation_level)?;
    let status =
        parse_opt_enum("status", req.status.as_deref())?.unwrap_or(EscalationStatus::Active);
    require_text("escalated_at", &req.escalated_at)?;
    gate("resolved_at", req.resolved_at.is_some(), status, ESCALATION_RESOLVED)?;

    let record = Escalation {
        escalation_id: store.table::<Escalation>().next_id()?,
        incident_id,
        escalated_by_user,
        escalated_to_user,
        escalation_level,
        reason: req.reason,
        status,
        escalated_at: req.escalated_at,
        resolved_at: req.resolved_at,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update an escalation.
pub fn update_escalation(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateEscalation,
) -> IncidentResult<Escalation> {
    let mut record: Escalation = load_target(store, &req.escalation_id)?;
    let patch = req.change_set;
    let resolving = sets(&patch.resolved_at);

    apply_ref::<User>(store, &mut record.escalated_by_user, patch.escalated_by_user)?;
    apply_ref::<User>(store, &mut record.escalated_to_user, patch.escalated_to_user)?;
    distinct_users(record.escalated_by_user, record.escalated_to_user)?;
    apply_enum("escalation_level", &mut record.escalation_level, patch.escalation_level)?;
    apply(&mut record.reason, patch.reason);
    apply_enum("status", &mut record.status, patch.status)?;
    apply_text("escalated_at", &mut record.escalated_at, patch.escalated_at)?;
    gate("resolved_at", resolving, record.status, ESCALATION_RESOLVED)?;
    apply(&mut record.resolved_at, patch.resolved_at);
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List escalations matching every supplied filter.
pub fn discover_escalations(store: &EntityStore, filter: &EscalationFilter) -> Vec<Escalation> {
    listing(store, |e: &Escalation| {
        id_is(&filter.escalation_id, e.escalation_id)
            && id_is(&filter.incident_id, e.incident_id)
            && vocab_is(&filter.status, e.status)
            && vocab_is(&filter.escalation_level, e.escalation_level)
            && id_is(&filter.escalated_to_user, e.escalated_to_user)
    })
}
