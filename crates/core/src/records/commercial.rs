//! Subscriptions and service level agreements

use crate::entity::{Entity, Reference, UniqueKey};
use crate::ids::{ClientId, ProductId, SlaId, SubscriptionId};
use crate::table::TableName;
use crate::vocab::{Severity, SlaTier, SubscriptionStatus, SubscriptionType};
use serde::{Deserialize, Serialize};

/// A client's subscription to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Identifier
    pub subscription_id: SubscriptionId,
    /// Subscribing client
    pub client_id: ClientId,
    /// Subscribed product
    pub product_id: ProductId,
    /// Commercial shape
    pub subscription_type: SubscriptionType,
    /// Service tier
    pub sla_tier: SlaTier,
    /// Recovery time objective in hours
    pub rto_hours: Option<u32>,
    /// First day of service
    pub start_date: String,
    /// Last day of service; open-ended when absent
    pub end_date: Option<String>,
    /// Status
    pub status: SubscriptionStatus,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for Subscription {
    type Id = SubscriptionId;
    const TABLE: TableName = TableName::Subscriptions;

    fn id(&self) -> SubscriptionId {
        self.subscription_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("client_id", TableName::Clients, self.client_id),
            Reference::new("product_id", TableName::Products, self.product_id),
        ]
    }
}

/// Response and resolution targets for one severity of one subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLevelAgreement {
    /// Identifier
    pub sla_id: SlaId,
    /// Covered subscription
    pub subscription_id: SubscriptionId,
    /// Covered severity
    pub severity_level: Severity,
    /// Target time to first response
    pub response_time_minutes: u32,
    /// Target time to resolution
    pub resolution_time_hours: u32,
    /// Availability target in percent (0 to 100)
    pub availability_percentage: Option<f64>,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for ServiceLevelAgreement {
    type Id = SlaId;
    const TABLE: TableName = TableName::ServiceLevelAgreements;

    fn id(&self) -> SlaId {
        self.sla_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new(
            "subscription_id",
            TableName::Subscriptions,
            self.subscription_id,
        )]
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(
            "subscription_id+severity_level",
            format!("{}+{}", self.subscription_id, self.severity_level),
        )]
    }
}
