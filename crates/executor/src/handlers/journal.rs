//! Journal and human-transfer command handlers.

use incidentdb_core::TableName;
use incidentdb_engine::ops::journal;
use incidentdb_engine::OpContext;
use incidentdb_storage::EntityStore;

use super::{created, found};
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle CreateIncidentUpdate command.
pub fn create_incident_update(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: journal::CreateIncidentUpdate,
) -> Result<Output> {
    let id = convert_result(journal::create_incident_update(store, ctx, req))?;
    Ok(created(TableName::IncidentUpdates, id))
}

/// Handle DiscoverIncidentUpdates command.
pub fn discover_incident_updates(
    store: &EntityStore,
    filter: &journal::IncidentUpdateFilter,
) -> Result<Output> {
    Ok(found(journal::discover_incident_updates(store, filter)))
}

/// Handle CreateAuditLog command.
pub fn create_audit_log(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: journal::CreateAuditLog,
) -> Result<Output> {
    let id = convert_result(journal::create_audit_log(store, ctx, req))?;
    Ok(created(TableName::AuditLogs, id))
}

/// Handle DiscoverAuditLogs command.
pub fn discover_audit_logs(store: &EntityStore, filter: &journal::AuditLogFilter) -> Result<Output> {
    Ok(found(journal::discover_audit_logs(store, filter)))
}

/// Handle TransferToHuman command.
pub fn transfer_to_human(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: journal::TransferToHuman,
) -> Result<Output> {
    let id = convert_result(journal::transfer_to_human(store, ctx, req))?;
    Ok(Output::Transferred {
        transfer_id: id.to_string(),
    })
}
