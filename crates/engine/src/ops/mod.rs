//! Operation contracts
//!
//! Every operation follows one of three shapes:
//!
//! - **create**: validate every constrained field, allocate `max + 1`, insert
//!   a full record stamped with the invocation time, return the new id.
//! - **update**: resolve the target, merge the patch (convenience arguments
//!   override `change_set`), validate the merged record, refresh
//!   `updated_at`, replace the record, return it.
//! - **discover**: return every record matching all supplied filters, in
//!   ascending id order. Never fails.
//!
//! Validation always finishes before the store is written, so a failed
//! create or update leaves the store untouched.
//!
//! | Module | Records |
//! |--------|---------|
//! | `party` | Client, Vendor |
//! | `catalog` | Product, InfrastructureComponent |
//! | `user` | User |
//! | `commercial` | Subscription, ServiceLevelAgreement |
//! | `incident` | Incident |
//! | `problem` | ProblemTicket |
//! | `change` | ChangeRequest, RollbackRequest |
//! | `work_order` | WorkOrder |
//! | `escalation` | Escalation |
//! | `communication` | Communication |
//! | `workaround` | Workaround |
//! | `analysis` | RootCauseAnalysis, PerformanceMetric |
//! | `knowledge` | IncidentReport, KnowledgeBaseArticle, PostIncidentReview |
//! | `journal` | IncidentUpdate, AuditLog, HumanTransfer |

pub mod analysis;
pub mod catalog;
pub mod change;
pub mod commercial;
pub mod communication;
pub mod escalation;
pub mod incident;
pub mod journal;
pub mod knowledge;
pub mod party;
pub mod problem;
pub mod user;
pub mod work_order;
pub mod workaround;

use crate::validate::require;
use incidentdb_core::{Entity, IncidentError, IncidentResult, RawId};
use incidentdb_storage::{EntityStore, HasTable};
use tracing::{debug, trace};

/// Insert a validated record and log the commit.
pub(crate) fn commit<E: Entity>(store: &mut EntityStore, record: E) -> E::Id
where
    EntityStore: HasTable<E>,
{
    let id = record.id();
    store.table_mut::<E>().insert(record);
    debug!(target: "incidentdb::ops", table = %E::TABLE, id = %id, "Committed");
    id
}

/// Insert an updated record and hand a copy back to the caller.
pub(crate) fn commit_update<E: Entity>(store: &mut EntityStore, record: E) -> E
where
    EntityStore: HasTable<E>,
{
    commit(store, record.clone());
    record
}

/// Resolve the target of an update and clone it for merging.
pub(crate) fn load_target<E: Entity>(store: &EntityStore, raw: &RawId) -> IncidentResult<E>
where
    EntityStore: HasTable<E>,
{
    let id = require::<E>(store, raw)?;
    store
        .table::<E>()
        .get(id)
        .cloned()
        .ok_or_else(|| IncidentError::not_found(E::TABLE, raw))
}

/// Collect matching records in id order.
pub(crate) fn listing<E: Entity>(store: &EntityStore, keep: impl Fn(&E) -> bool) -> Vec<E>
where
    EntityStore: HasTable<E>,
{
    let found: Vec<E> = store.table::<E>().iter().filter(|r| keep(r)).cloned().collect();
    trace!(target: "incidentdb::ops", table = %E::TABLE, matched = found.len(), "Discover");
    found
}

#[cfg(test)]
pub(crate) mod testing {
    //! Builders for a small consistent store shared by the operation tests.

    use super::*;
    use crate::context::OpContext;
    use incidentdb_core::*;

    pub const NOW: &str = "2025-10-01T00:00:00";

    pub fn ctx() -> OpContext {
        OpContext::new(NOW)
    }

    pub fn raw(id: u64) -> RawId {
        RawId::from(id)
    }

    /// One client, vendor, product, component, subscription, two users
    /// (1: incident manager, 2: technical support) and one open incident.
    pub fn seeded() -> EntityStore {
        let mut store = EntityStore::new();
        store.table_mut::<Client>().insert(Client {
            client_id: ClientId::new(1),
            client_name: "Globex".into(),
            registration_number: "REG-1".into(),
            contact_email: "it@globex.test".into(),
            contact_phone: None,
            client_type: ClientType::Enterprise,
            industry: None,
            country: None,
            status: PartyStatus::Active,
            created_at: NOW.into(),
            updated_at: NOW.into(),
        });
        store.table_mut::<Vendor>().insert(Vendor {
            vendor_id: VendorId::new(1),
            vendor_name: "Acme Cloud".into(),
            vendor_type: VendorType::CloudProvider,
            contact_email: "support@acme.test".into(),
            contact_phone: "555-0100".into(),
            status: PartyStatus::Active,
            created_at: NOW.into(),
            updated_at: NOW.into(),
        });
        store.table_mut::<Product>().insert(Product {
            product_id: ProductId::new(1),
            product_name: "Payments API".into(),
            product_type: ProductType::Application,
            version: Some("2.1".into()),
            support_vendor_id: Some(VendorId::new(1)),
            status: ProductStatus::Active,
            created_at: NOW.into(),
            updated_at: NOW.into(),
        });
        store.table_mut::<InfrastructureComponent>().insert(InfrastructureComponent {
            component_id: ComponentId::new(1),
            component_name: "pay-db-01".into(),
            component_type: ComponentType::Database,
            product_id: Some(ProductId::new(1)),
            environment: Environment::Production,
            location: None,
            port_number: Some(5432),
            operational_status: OperationalStatus::Operational,
            created_at: NOW.into(),
            updated_at: NOW.into(),
        });
        store.table_mut::<Subscription>().insert(Subscription {
            subscription_id: SubscriptionId::new(1),
            client_id: ClientId::new(1),
            product_id: ProductId::new(1),
            subscription_type: SubscriptionType::FullService,
            sla_tier: SlaTier::Premium,
            rto_hours: Some(4),
            start_date: "2025-01-01".into(),
            end_date: None,
            status: SubscriptionStatus::Active,
            created_at: NOW.into(),
            updated_at: NOW.into(),
        });
        for (id, name, role) in [
            (1, "Dana Manager", UserRole::IncidentManager),
            (2, "Sam Support", UserRole::TechnicalSupport),
        ] {
            store.table_mut::<User>().insert(User {
                user_id: UserId::new(id),
                name: name.into(),
                email: format!("user{}@globex.test", id),
                role,
                department: None,
                client_id: None,
                vendor_id: None,
                timezone: "UTC".into(),
                status: UserStatus::Active,
                created_at: NOW.into(),
                updated_at: NOW.into(),
            });
        }
        store.table_mut::<Incident>().insert(Incident {
            incident_id: IncidentId::new(1),
            title: "Payments failing".into(),
            category: IncidentCategory::ServiceOutage,
            severity: Severity::P1,
            impact_level: Level::High,
            urgency_level: Level::Critical,
            status: IncidentStatus::Open,
            client_id: ClientId::new(1),
            component_id: ComponentId::new(1),
            reporter_user_id: UserId::new(1),
            assigned_to_user_id: None,
            detection_timestamp: NOW.into(),
            resolution_timestamp: None,
            created_at: NOW.into(),
            updated_at: NOW.into(),
        });
        store
    }
}
