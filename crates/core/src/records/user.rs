//! Users

use crate::entity::{Entity, Reference, UniqueKey};
use crate::ids::{ClientId, UserId, VendorId};
use crate::table::TableName;
use crate::vocab::{UserRole, UserStatus};
use serde::{Deserialize, Serialize};

/// A person acting in the domain.
///
/// A `client_contact` may be bound to a client and a `vendor_contact` to a
/// vendor; no user is bound to both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identifier
    pub user_id: UserId,
    /// Full name
    pub name: String,
    /// Email address (unique, exact match)
    pub email: String,
    /// Role
    pub role: UserRole,
    /// Department
    pub department: Option<String>,
    /// Client this contact belongs to
    pub client_id: Option<ClientId>,
    /// Vendor this contact belongs to
    pub vendor_id: Option<VendorId>,
    /// IANA timezone name
    pub timezone: String,
    /// Employment status
    pub status: UserStatus,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for User {
    type Id = UserId;
    const TABLE: TableName = TableName::Users;

    fn id(&self) -> UserId {
        self.user_id
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = Vec::new();
        if let Some(c) = self.client_id {
            refs.push(Reference::new("client_id", TableName::Clients, c));
        }
        if let Some(v) = self.vendor_id {
            refs.push(Reference::new("vendor_id", TableName::Vendors, v));
        }
        refs
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("email", &self.email)]
    }
}
