//! Client, vendor and user command handlers.

use incidentdb_core::TableName;
use incidentdb_engine::ops::{party, user};
use incidentdb_engine::OpContext;
use incidentdb_storage::EntityStore;

use super::{created, found, updated};
use crate::convert::convert_result;
use crate::{Output, Result};

// =============================================================================
// Clients
// =============================================================================

/// Handle CreateClient command.
pub fn create_client(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: party::CreateClient,
) -> Result<Output> {
    let id = convert_result(party::create_client(store, ctx, req))?;
    Ok(created(TableName::Clients, id))
}

/// Handle UpdateClient command.
pub fn update_client(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: party::UpdateClient,
) -> Result<Output> {
    let record = convert_result(party::update_client(store, ctx, req))?;
    Ok(updated(record))
}

/// Handle DiscoverClients command.
pub fn discover_clients(store: &EntityStore, filter: &party::ClientFilter) -> Result<Output> {
    Ok(found(party::discover_clients(store, filter)))
}

// =============================================================================
// Vendors
// =============================================================================

/// Handle CreateVendor command.
pub fn create_vendor(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: party::CreateVendor,
) -> Result<Output> {
    let id = convert_result(party::create_vendor(store, ctx, req))?;
    Ok(created(TableName::Vendors, id))
}

/// Handle UpdateVendor command.
pub fn update_vendor(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: party::UpdateVendor,
) -> Result<Output> {
    let record = convert_result(party::update_vendor(store, ctx, req))?;
    Ok(updated(record))
}

/// Handle DiscoverVendors command.
pub fn discover_vendors(store: &EntityStore, filter: &party::VendorFilter) -> Result<Output> {
    Ok(found(party::discover_vendors(store, filter)))
}

// =============================================================================
// Users
// =============================================================================

/// Handle CreateUser command.
pub fn create_user(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: user::CreateUser,
) -> Result<Output> {
    let id = convert_result(user::create_user(store, ctx, req))?;
    Ok(created(TableName::Users, id))
}

/// Handle UpdateUser command.
pub fn update_user(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: user::UpdateUser,
) -> Result<Output> {
    let record = convert_result(user::update_user(store, ctx, req))?;
    Ok(updated(record))
}

/// Handle DiscoverUsers command.
pub fn discover_users(store: &EntityStore, filter: &user::UserFilter) -> Result<Output> {
    Ok(found(user::discover_users(store, filter)))
}
