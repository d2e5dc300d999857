//! Stakeholder communication operations.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{id_is, vocab_is};
use crate::lifecycle::{gate, COMMUNICATION_SENT};
use crate::patch::{apply, apply_enum, apply_opt_enum, apply_ref, double_option, sets};
use crate::validate::{parse_enum, parse_opt_enum, require};
use incidentdb_core::{
    Communication, CommunicationId, DeliveryStatus, Incident, IncidentResult, RawId, User,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_communication`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCommunication {
    pub incident_id: RawId,
    pub sender_id: RawId,
    pub recipient_id: RawId,
    pub communication_type: String,
    pub delivery_method: String,
    /// Default: `pending`.
    #[serde(default)]
    pub delivery_status: Option<String>,
    #[serde(default)]
    pub recipient_type: Option<String>,
    /// Only with delivery status `sent`.
    #[serde(default)]
    pub sent_at: Option<String>,
}

/// Mutable communication fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommunicationPatch {
    pub sender_id: Option<RawId>,
    pub recipient_id: Option<RawId>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub recipient_type: Option<Option<String>>,
    pub communication_type: Option<String>,
    pub delivery_method: Option<String>,
    pub delivery_status: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<Option<String>>,
}

/// Arguments of `update_communication`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCommunication {
    pub communication_id: RawId,
    #[serde(default)]
    pub change_set: CommunicationPatch,
}

/// Filters of `discover_communications`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommunicationFilter {
    pub communication_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub sender_id: Option<RawId>,
    pub recipient_id: Option<RawId>,
    pub delivery_status: Option<String>,
}

/// Record a message about an incident.
pub fn create_communication(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateCommunication,
) -> IncidentResult<CommunicationId> {
    let incident_id = require::<Incident>(store, &req.incident_id)?;
    let sender_id = require::<User>(store, &req.sender_id)?;
    let recipient_id = require::<User>(store, &req.recipient_id)?;
    let communication_type = parse_enum("communication_type", &req.communication_type)?;
    let delivery_method = parse_enum("delivery_method", &req.delivery_method)?;
    let delivery_status = parse_opt_enum("delivery_status", req.delivery_status.as_deref())?
        .unwrap_or(DeliveryStatus::Pending);
    let recipient_type = parse_opt_enum("recipient_type", req.recipient_type.as_deref())?;
    gate("sent_at", req.sent_at.is_some(), delivery_status, COMMUNICATION_SENT)?;

    let record = Communication {
        communication_id: store.table::<Communication>().next_id()?,
        incident_id,
        sender_id,
        recipient_id,
        recipient_type,
        communication_type,
        delivery_method,
        delivery_status,
        sent_at: req.sent_at,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update a communication, typically its delivery state.
pub fn update_communication(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateCommunication,
) -> IncidentResult<Communication> {
    let mut record: Communication = load_target(store, &req.communication_id)?;
    let patch = req.change_set;
    let sending = sets(&patch.sent_at);

    apply_ref::<User>(store, &mut record.sender_id, patch.sender_id)?;
    apply_ref::<User>(store, &mut record.recipient_id, patch.recipient_id)?;
    apply_opt_enum("recipient_type", &mut record.recipient_type, patch.recipient_type)?;
    apply_enum("communication_type", &mut record.communication_type, patch.communication_type)?;
    apply_enum("delivery_method", &mut record.delivery_method, patch.delivery_method)?;
    apply_enum("delivery_status", &mut record.delivery_status, patch.delivery_status)?;
    gate("sent_at", sending, record.delivery_status, COMMUNICATION_SENT)?;
    apply(&mut record.sent_at, patch.sent_at);
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List communications matching every supplied filter.
pub fn discover_communications(
    store: &EntityStore,
    filter: &CommunicationFilter,
) -> Vec<Communication> {
    listing(store, |c: &Communication| {
        id_is(&filter.communication_id, c.communication_id)
            && id_is(&filter.incident_id, c.incident_id)
            && id_is(&filter.sender_id, c.sender_id)
            && id_is(&filter.recipient_id, c.recipient_id)
            && vocab_is(&filter.delivery_status, c.delivery_status)
    })
}
