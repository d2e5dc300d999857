//! Product and infrastructure component operations.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{contains_ci, id_is, opt_id_is, vocab_is};
use crate::patch::{apply, apply_enum, apply_opt_ref, apply_text, double_option};
use crate::validate::{ensure_unique, parse_enum, parse_opt_enum, require_opt, require_text};
use incidentdb_core::{
    ComponentId, IncidentResult, InfrastructureComponent, OperationalStatus, Product, ProductId,
    ProductStatus, RawId, Vendor,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateProduct {
    /// Unique across products.
    pub product_name: String,
    pub product_type: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub support_vendor_id: Option<RawId>,
    /// Default: `active`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Mutable product fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductPatch {
    pub product_name: Option<String>,
    pub product_type: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub version: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub support_vendor_id: Option<Option<RawId>>,
    pub status: Option<String>,
}

/// Arguments of `update_product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProduct {
    pub product_id: RawId,
    #[serde(default)]
    pub change_set: ProductPatch,
}

/// Filters of `discover_products`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductFilter {
    pub product_id: Option<RawId>,
    pub product_name: Option<String>,
    pub product_type: Option<String>,
    pub support_vendor_id: Option<RawId>,
    pub status: Option<String>,
}

/// Add a product to the catalogue.
pub fn create_product(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateProduct,
) -> IncidentResult<ProductId> {
    require_text("product_name", &req.product_name)?;
    let product_type = parse_enum("product_type", &req.product_type)?;
    let status = parse_opt_enum("status", req.status.as_deref())?.unwrap_or(ProductStatus::Active);
    let support_vendor_id = require_opt::<Vendor>(store, req.support_vendor_id.as_ref())?;

    let table = store.table::<Product>();
    let record = Product {
        product_id: table.next_id()?,
        product_name: req.product_name,
        product_type,
        version: req.version,
        support_vendor_id,
        status,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    ensure_unique(table, &record)?;
    Ok(commit(store, record))
}

/// Update a product.
pub fn update_product(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateProduct,
) -> IncidentResult<Product> {
    let mut record: Product = load_target(store, &req.product_id)?;
    let patch = req.change_set;
    apply_text("product_name", &mut record.product_name, patch.product_name)?;
    apply_enum("product_type", &mut record.product_type, patch.product_type)?;
    apply(&mut record.version, patch.version);
    apply_opt_ref::<Vendor>(store, &mut record.support_vendor_id, patch.support_vendor_id)?;
    apply_enum("status", &mut record.status, patch.status)?;
    record.updated_at = ctx.now.clone();

    ensure_unique(store.table::<Product>(), &record)?;
    Ok(commit_update(store, record))
}

/// List products matching every supplied filter.
pub fn discover_products(store: &EntityStore, filter: &ProductFilter) -> Vec<Product> {
    listing(store, |p: &Product| {
        id_is(&filter.product_id, p.product_id)
            && contains_ci(&filter.product_name, &p.product_name)
            && vocab_is(&filter.product_type, p.product_type)
            && opt_id_is(&filter.support_vendor_id, p.support_vendor_id)
            && vocab_is(&filter.status, p.status)
    })
}

/// Arguments of `create_component`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateComponent {
    /// Unique across components.
    pub component_name: String,
    pub component_type: String,
    pub environment: String,
    #[serde(default)]
    pub product_id: Option<RawId>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub port_number: Option<u16>,
    /// Default: `operational`.
    #[serde(default)]
    pub operational_status: Option<String>,
}

/// Mutable component fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentPatch {
    pub component_name: Option<String>,
    pub component_type: Option<String>,
    pub environment: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Option<RawId>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub port_number: Option<Option<u16>>,
    pub operational_status: Option<String>,
}

/// Arguments of `update_component`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateComponent {
    pub component_id: RawId,
    #[serde(default)]
    pub change_set: ComponentPatch,
}

/// Filters of `discover_components`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentFilter {
    pub component_id: Option<RawId>,
    pub component_name: Option<String>,
    pub component_type: Option<String>,
    pub product_id: Option<RawId>,
    pub environment: Option<String>,
    pub operational_status: Option<String>,
}

/// Register an infrastructure component.
pub fn create_component(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateComponent,
) -> IncidentResult<ComponentId> {
    require_text("component_name", &req.component_name)?;
    let component_type = parse_enum("component_type", &req.component_type)?;
    let environment = parse_enum("environment", &req.environment)?;
    let operational_status = parse_opt_enum("operational_status", req.operational_status.as_deref())?
        .unwrap_or(OperationalStatus::Operational);
    let product_id = require_opt::<Product>(store, req.product_id.as_ref())?;

    let table = store.table::<InfrastructureComponent>();
    let record = InfrastructureComponent {
        component_id: table.next_id()?,
        component_name: req.component_name,
        component_type,
        product_id,
        environment,
        location: req.location,
        port_number: req.port_number,
        operational_status,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    ensure_unique(table, &record)?;
    Ok(commit(store, record))
}

/// Update an infrastructure component.
pub fn update_component(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateComponent,
) -> IncidentResult<InfrastructureComponent> {
    let mut record: InfrastructureComponent = load_target(store, &req.component_id)?;
    let patch = req.change_set;
    apply_text("component_name", &mut record.component_name, patch.component_name)?;
    apply_enum("component_type", &mut record.component_type, patch.component_type)?;
    apply_enum("environment", &mut record.environment, patch.environment)?;
    apply_opt_ref::<Product>(store, &mut record.product_id, patch.product_id)?;
    apply(&mut record.location, patch.location);
    apply(&mut record.port_number, patch.port_number);
    apply_enum(
        "operational_status",
        &mut record.operational_status,
        patch.operational_status,
    )?;
    record.updated_at = ctx.now.clone();

    ensure_unique(store.table::<InfrastructureComponent>(), &record)?;
    Ok(commit_update(store, record))
}

/// List components matching every supplied filter.
pub fn discover_components(
    store: &EntityStore,
    filter: &ComponentFilter,
) -> Vec<InfrastructureComponent> {
    listing(store, |c: &InfrastructureComponent| {
        id_is(&filter.component_id, c.component_id)
            && contains_ci(&filter.component_name, &c.component_name)
            && vocab_is(&filter.component_type, c.component_type)
            && opt_id_is(&filter.product_id, c.product_id)
            && vocab_is(&filter.environment, c.environment)
            && vocab_is(&filter.operational_status, c.operational_status)
    })
}
