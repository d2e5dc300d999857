//! Clients and vendors

use crate::entity::{Entity, UniqueKey};
use crate::ids::{ClientId, VendorId};
use crate::table::TableName;
use crate::vocab::{ClientType, PartyStatus, VendorType};
use serde::{Deserialize, Serialize};

/// An organisation receiving service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Identifier
    pub client_id: ClientId,
    /// Display name
    pub client_name: String,
    /// Company registration number (unique)
    pub registration_number: String,
    /// Primary contact email (unique)
    pub contact_email: String,
    /// Primary contact phone (unique when present)
    pub contact_phone: Option<String>,
    /// Size class
    pub client_type: ClientType,
    /// Industry sector
    pub industry: Option<String>,
    /// Country of registration
    pub country: Option<String>,
    /// Account status
    pub status: PartyStatus,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for Client {
    type Id = ClientId;
    const TABLE: TableName = TableName::Clients;

    fn id(&self) -> ClientId {
        self.client_id
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        let mut keys = vec![
            UniqueKey::new("registration_number", &self.registration_number),
            UniqueKey::new("contact_email", &self.contact_email),
        ];
        if let Some(phone) = &self.contact_phone {
            keys.push(UniqueKey::new("contact_phone", phone));
        }
        keys
    }
}

/// A third party supplying products or services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    /// Identifier
    pub vendor_id: VendorId,
    /// Display name (unique)
    pub vendor_name: String,
    /// Kind of provider
    pub vendor_type: VendorType,
    /// Contact email (unique)
    pub contact_email: String,
    /// Contact phone (unique)
    pub contact_phone: String,
    /// Account status
    pub status: PartyStatus,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for Vendor {
    type Id = VendorId;
    const TABLE: TableName = TableName::Vendors;

    fn id(&self) -> VendorId {
        self.vendor_id
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![
            UniqueKey::new("vendor_name", &self.vendor_name),
            UniqueKey::new("contact_email", &self.contact_email),
            UniqueKey::new("contact_phone", &self.contact_phone),
        ]
    }
}
