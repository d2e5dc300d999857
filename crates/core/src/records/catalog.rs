//! Products and infrastructure components

use crate::entity::{Entity, Reference, UniqueKey};
use crate::ids::{ComponentId, ProductId, VendorId};
use crate::table::TableName;
use crate::vocab::{ComponentType, Environment, OperationalStatus, ProductStatus, ProductType};
use serde::{Deserialize, Serialize};

/// A product offered to clients, optionally supported by a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier
    pub product_id: ProductId,
    /// Display name (unique)
    pub product_name: String,
    /// Kind of product
    pub product_type: ProductType,
    /// Release version
    pub version: Option<String>,
    /// Vendor providing support
    pub support_vendor_id: Option<VendorId>,
    /// Support status
    pub status: ProductStatus,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for Product {
    type Id = ProductId;
    const TABLE: TableName = TableName::Products;

    fn id(&self) -> ProductId {
        self.product_id
    }

    fn references(&self) -> Vec<Reference> {
        self.support_vendor_id
            .map(|v| Reference::new("support_vendor_id", TableName::Vendors, v))
            .into_iter()
            .collect()
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("product_name", &self.product_name)]
    }
}

/// A deployed piece of infrastructure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureComponent {
    /// Identifier
    pub component_id: ComponentId,
    /// Display name (unique)
    pub component_name: String,
    /// Kind of component
    pub component_type: ComponentType,
    /// Product this component runs
    pub product_id: Option<ProductId>,
    /// Deployment environment
    pub environment: Environment,
    /// Physical or logical location
    pub location: Option<String>,
    /// Service port
    pub port_number: Option<u16>,
    /// Health
    pub operational_status: OperationalStatus,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for InfrastructureComponent {
    type Id = ComponentId;
    const TABLE: TableName = TableName::InfrastructureComponents;

    fn id(&self) -> ComponentId {
        self.component_id
    }

    fn references(&self) -> Vec<Reference> {
        self.product_id
            .map(|p| Reference::new("product_id", TableName::Products, p))
            .into_iter()
            .collect()
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("component_name", &self.component_name)]
    }
}
