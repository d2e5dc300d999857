//! Client and vendor operations.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{contains_ci, eq, eq_ci, id_is, vocab_is};
use crate::patch::{apply, apply_enum, apply_text, double_option, overlay};
use crate::validate::{ensure_unique, parse_enum, parse_opt_enum, require_text};
use incidentdb_core::{Client, ClientId, IncidentResult, PartyStatus, RawId, Vendor, VendorId};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_client`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateClient {
    pub client_name: String,
    /// Unique across clients.
    pub registration_number: String,
    /// Unique across clients.
    pub contact_email: String,
    pub client_type: String,
    /// Unique across clients when present.
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Default: `active`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Mutable client fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientPatch {
    pub client_name: Option<String>,
    pub registration_number: Option<String>,
    pub contact_email: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<Option<String>>,
    pub client_type: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub industry: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub country: Option<Option<String>>,
    pub status: Option<String>,
}

/// Arguments of `update_client`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateClient {
    pub client_id: RawId,
    #[serde(default)]
    pub change_set: ClientPatch,
    #[serde(default)]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Filters of `discover_clients`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientFilter {
    pub client_id: Option<RawId>,
    pub client_name: Option<String>,
    pub registration_number: Option<String>,
    pub contact_email: Option<String>,
    pub client_type: Option<String>,
    pub status: Option<String>,
}

/// Register a client.
pub fn create_client(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateClient,
) -> IncidentResult<ClientId> {
    require_text("client_name", &req.client_name)?;
    require_text("registration_number", &req.registration_number)?;
    require_text("contact_email", &req.contact_email)?;
    let client_type = parse_enum("client_type", &req.client_type)?;
    let status = parse_opt_enum("status", req.status.as_deref())?.unwrap_or(PartyStatus::Active);

    let table = store.table::<Client>();
    let record = Client {
        client_id: table.next_id()?,
        client_name: req.client_name,
        registration_number: req.registration_number,
        contact_email: req.contact_email,
        contact_phone: req.contact_phone,
        client_type,
        industry: req.industry,
        country: req.country,
        status,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    ensure_unique(table, &record)?;
    Ok(commit(store, record))
}

/// Update a client's details.
pub fn update_client(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateClient,
) -> IncidentResult<Client> {
    let mut record: Client = load_target(store, &req.client_id)?;
    let mut patch = req.change_set;
    overlay(&mut patch.registration_number, req.registration_number);
    overlay(&mut patch.contact_email, req.contact_email);
    overlay(&mut patch.status, req.status);

    apply_text("client_name", &mut record.client_name, patch.client_name)?;
    apply_text("registration_number", &mut record.registration_number, patch.registration_number)?;
    apply_text("contact_email", &mut record.contact_email, patch.contact_email)?;
    apply(&mut record.contact_phone, patch.contact_phone);
    apply_enum("client_type", &mut record.client_type, patch.client_type)?;
    apply(&mut record.industry, patch.industry);
    apply(&mut record.country, patch.country);
    apply_enum("status", &mut record.status, patch.status)?;
    record.updated_at = ctx.now.clone();

    ensure_unique(store.table::<Client>(), &record)?;
    Ok(commit_update(store, record))
}

/// List clients matching every supplied filter.
pub fn discover_clients(store: &EntityStore, filter: &ClientFilter) -> Vec<Client> {
    listing(store, |c: &Client| {
        id_is(&filter.client_id, c.client_id)
            && contains_ci(&filter.client_name, &c.client_name)
            && eq(&filter.registration_number, &c.registration_number)
            && eq_ci(&filter.contact_email, &c.contact_email)
            && vocab_is(&filter.client_type, c.client_type)
            && vocab_is(&filter.status, c.status)
    })
}

/// Arguments of `create_vendor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateVendor {
    /// Unique across vendors.
    pub vendor_name: String,
    /// Stored as `contact_email`; unique across vendors.
    pub vendor_email: String,
    /// Stored as `contact_phone`; unique across vendors.
    pub vendor_phone: String,
    pub vendor_type: String,
    /// Default: `active`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Mutable vendor fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VendorPatch {
    pub vendor_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub vendor_type: Option<String>,
    pub status: Option<String>,
}

/// Arguments of `update_vendor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateVendor {
    pub vendor_id: RawId,
    #[serde(default)]
    pub change_set: VendorPatch,
}

/// Filters of `discover_vendors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VendorFilter {
    pub vendor_id: Option<RawId>,
    pub vendor_name: Option<String>,
    pub vendor_email: Option<String>,
    pub vendor_phone: Option<String>,
    pub vendor_type: Option<String>,
    pub status: Option<String>,
}

/// Register a vendor.
pub fn create_vendor(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateVendor,
) -> IncidentResult<VendorId> {
    require_text("vendor_name", &req.vendor_name)?;
    require_text("vendor_email", &req.vendor_email)?;
    require_text("vendor_phone", &req.vendor_phone)?;
    let vendor_type = parse_enum("vendor_type", &req.vendor_type)?;
    let status = parse_opt_enum("status", req.status.as_deref())?.unwrap_or(PartyStatus::Active);

    let table = store.table::<Vendor>();
    let record = Vendor {
        vendor_id: table.next_id()?,
        vendor_name: req.vendor_name,
        vendor_type,
        contact_email: req.vendor_email,
        contact_phone: req.vendor_phone,
        status,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    ensure_unique(table, &record)?;
    Ok(commit(store, record))
}

/// Update a vendor's details.
pub fn update_vendor(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateVendor,
) -> IncidentResult<Vendor> {
    let mut record: Vendor = load_target(store, &req.vendor_id)?;
    let patch = req.change_set;
    apply_text("vendor_name", &mut record.vendor_name, patch.vendor_name)?;
    apply_text("contact_email", &mut record.contact_email, patch.contact_email)?;
    apply_text("contact_phone", &mut record.contact_phone, patch.contact_phone)?;
    apply_enum("vendor_type", &mut record.vendor_type, patch.vendor_type)?;
    apply_enum("status", &mut record.status, patch.status)?;
    record.updated_at = ctx.now.clone();

    ensure_unique(store.table::<Vendor>(), &record)?;
    Ok(commit_update(store, record))
}

/// List vendors matching every supplied filter.
pub fn discover_vendors(store: &EntityStore, filter: &VendorFilter) -> Vec<Vendor> {
    listing(store, |v: &Vendor| {
        id_is(&filter.vendor_id, v.vendor_id)
            && contains_ci(&filter.vendor_name, &v.vendor_name)
            && eq_ci(&filter.vendor_email, &v.contact_email)
            && eq(&filter.vendor_phone, &v.contact_phone)
            && vocab_is(&filter.vendor_type, v.vendor_type)
            && vocab_is(&filter.status, v.status)
    })
}
