//! Workaround operations.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{id_is, vocab_is};
use crate::patch::{apply_enum, apply_ref, apply_text};
use crate::validate::{parse_enum, parse_opt_enum, require, require_text};
use incidentdb_core::{
    Incident, IncidentResult, RawId, User, Workaround, WorkaroundId, WorkaroundStatus,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_workaround`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateWorkaround {
    pub incident_id: RawId,
    pub implemented_by_user: RawId,
    pub effectiveness_level: String,
    pub implemented_at: String,
    /// Default: `active`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Mutable workaround fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkaroundPatch {
    pub implemented_by_user: Option<RawId>,
    pub effectiveness_level: Option<String>,
    pub implemented_at: Option<String>,
    pub status: Option<String>,
}

/// Arguments of `update_workaround`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateWorkaround {
    pub workaround_id: RawId,
    #[serde(default)]
    pub change_set: WorkaroundPatch,
}

/// Filters of `discover_workarounds`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkaroundFilter {
    pub workaround_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub status: Option<String>,
}

/// Record a workaround applied to an incident.
pub fn create_workaround(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateWorkaround,
) -> IncidentResult<WorkaroundId> {
    let incident_id = require::<Incident>(store, &req.incident_id)?;
    let implemented_by_user = require::<User>(store, &req.implemented_by_user)?;
    let effectiveness_level = parse_enum("effectiveness_level", &req.effectiveness_level)?;
    let status =
        parse_opt_enum("status", req.status.as_deref())?.unwrap_or(WorkaroundStatus::Active);
    require_text("implemented_at", &req.implemented_at)?;

    let record = Workaround {
        workaround_id: store.table::<Workaround>().next_id()?,
        incident_id,
        implemented_by_user,
        effectiveness_level,
        status,
        implemented_at: req.implemented_at,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update a workaround.
pub fn update_workaround(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateWorkaround,
) -> IncidentResult<Workaround> {
    let mut record: Workaround = load_target(store, &req.workaround_id)?;
    let patch = req.change_set;
    apply_ref::<User>(store, &mut record.implemented_by_user, patch.implemented_by_user)?;
    apply_enum(
        "effectiveness_level",
        &mut record.effectiveness_level,
        patch.effectiveness_level,
    )?;
    apply_text("implemented_at", &mut record.implemented_at, patch.implemented_at)?;
    apply_enum("status", &mut record.status, patch.status)?;
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List workarounds matching every supplied filter.
pub fn discover_workarounds(store: &EntityStore, filter: &WorkaroundFilter) -> Vec<Workaround> {
    listing(store, |w: &Workaround| {
        id_is(&filter.workaround_id, w.workaround_id)
            && id_is(&filter.incident_id, w.incident_id)
            && vocab_is(&filter.status, w.status)
    })
}
