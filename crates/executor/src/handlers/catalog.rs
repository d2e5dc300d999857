//! Product, component, subscription and SLA command handlers.

use incidentdb_core::TableName;
use incidentdb_engine::ops::{catalog, commercial};
use incidentdb_engine::OpContext;
use incidentdb_storage::EntityStore;

use super::{created, found, updated};
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle CreateProduct command.
pub fn create_product(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: catalog::CreateProduct,
) -> Result<Output> {
    let id = convert_result(catalog::create_product(store, ctx, req))?;
    Ok(created(TableName::Products, id))
}

/// Handle UpdateProduct command.
pub fn update_product(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: catalog::UpdateProduct,
) -> Result<Output> {
    Ok(updated(convert_result(catalog::update_product(store, ctx, req))?))
}

/// Handle DiscoverProducts command.
pub fn discover_products(store: &EntityStore, filter: &catalog::ProductFilter) -> Result<Output> {
    Ok(found(catalog::discover_products(store, filter)))
}

/// Handle CreateComponent command.
pub fn create_component(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: catalog::CreateComponent,
) -> Result<Output> {
    let id = convert_result(catalog::create_component(store, ctx, req))?;
    Ok(created(TableName::InfrastructureComponents, id))
}

/// Handle UpdateComponent command.
pub fn update_component(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: catalog::UpdateComponent,
) -> Result<Output> {
    Ok(updated(convert_result(catalog::update_component(store, ctx, req))?))
}

/// Handle DiscoverComponents command.
pub fn discover_components(
    store: &EntityStore,
    filter: &catalog::ComponentFilter,
) -> Result<Output> {
    Ok(found(catalog::discover_components(store, filter)))
}

/// Handle CreateSubscription command.
pub fn create_subscription(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: commercial::CreateSubscription,
) -> Result<Output> {
    let id = convert_result(commercial::create_subscription(store, ctx, req))?;
    Ok(created(TableName::Subscriptions, id))
}

/// Handle UpdateSubscription command.
pub fn update_subscription(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: commercial::UpdateSubscription,
) -> Result<Output> {
    Ok(updated(convert_result(commercial::update_subscription(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverSubscriptions command.
pub fn discover_subscriptions(
    store: &EntityStore,
    filter: &commercial::SubscriptionFilter,
) -> Result<Output> {
    Ok(found(commercial::discover_subscriptions(store, filter)))
}

/// Handle CreateSla command.
pub fn create_sla(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: commercial::CreateSla,
) -> Result<Output> {
    let id = convert_result(commercial::create_sla(store, ctx, req))?;
    Ok(created(TableName::ServiceLevelAgreements, id))
}

/// Handle UpdateSla command.
pub fn update_sla(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: commercial::UpdateSla,
) -> Result<Output> {
    Ok(updated(convert_result(commercial::update_sla(store, ctx, req))?))
}

/// Handle DiscoverSlas command.
pub fn discover_slas(store: &EntityStore, filter: &commercial::SlaFilter) -> Result<Output> {
    Ok(found(commercial::discover_slas(store, filter)))
}
