//! The entity store
//!
//! `EntityStore` owns one [`Table`] per entity type. Operations receive it by
//! reference; nothing in the store is shared or locked. Callers that need
//! concurrent access must serialize in front of it.
//!
//! Generic access goes through [`HasTable`]:
//!
//! ```
//! use incidentdb_core::{Client, ClientId};
//! use incidentdb_storage::EntityStore;
//!
//! let store = EntityStore::new();
//! assert_eq!(store.table::<Client>().next_id().unwrap(), ClientId::new(1));
//! ```
//!
//! Code that must touch every table implements [`TableVisitor`].

use crate::table::Table;
use incidentdb_core::records::*;
use incidentdb_core::{Entity, IncidentResult, TableName};
use std::collections::BTreeMap;

/// Access to the table of entity type `E`.
pub trait HasTable<E: Entity> {
    /// Borrow the table.
    fn get_table(&self) -> &Table<E>;

    /// Mutably borrow the table.
    fn get_table_mut(&mut self) -> &mut Table<E>;
}

/// Callback run once per table, in [`TableName::ALL`] order.
pub trait TableVisitor {
    /// Visit one table.
    fn visit<E: Entity>(&mut self, table: &Table<E>);
}

/// Mutable callback run once per table, stopping at the first error.
pub trait TableVisitorMut {
    /// Visit one table.
    fn visit<E: Entity>(&mut self, table: &mut Table<E>) -> IncidentResult<()>;
}

macro_rules! entity_store {
    ($($field:ident: $entity:ident),+ $(,)?) => {
        /// All entity tables.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct EntityStore {
            $($field: Table<$entity>,)+
        }

        $(
            impl HasTable<$entity> for EntityStore {
                fn get_table(&self) -> &Table<$entity> {
                    &self.$field
                }

                fn get_table_mut(&mut self) -> &mut Table<$entity> {
                    &mut self.$field
                }
            }
        )+

        impl EntityStore {
            /// Whether `table` holds a record with raw identifier `raw`.
            pub fn contains(&self, table: TableName, raw: u64) -> bool {
                $(
                    if table == <$entity as Entity>::TABLE {
                        return self.$field.contains_raw(raw);
                    }
                )+
                false
            }

            /// Number of records in `table`.
            pub fn count(&self, table: TableName) -> usize {
                $(
                    if table == <$entity as Entity>::TABLE {
                        return self.$field.len();
                    }
                )+
                0
            }

            /// Run `visitor` over every table.
            pub fn visit<V: TableVisitor>(&self, visitor: &mut V) {
                $(visitor.visit(&self.$field);)+
            }

            /// Run `visitor` over every table mutably.
            ///
            /// # Errors
            ///
            /// Returns the first error the visitor reports.
            pub fn visit_mut<V: TableVisitorMut>(&mut self, visitor: &mut V) -> IncidentResult<()> {
                $(visitor.visit(&mut self.$field)?;)+
                Ok(())
            }
        }
    };
}

entity_store!(
    clients: Client,
    vendors: Vendor,
    products: Product,
    infrastructure_components: InfrastructureComponent,
    users: User,
    subscriptions: Subscription,
    service_level_agreements: ServiceLevelAgreement,
    incidents: Incident,
    problem_tickets: ProblemTicket,
    change_requests: ChangeRequest,
    rollback_requests: RollbackRequest,
    work_orders: WorkOrder,
    incident_escalations: Escalation,
    communications: Communication,
    workarounds: Workaround,
    root_cause_analysis: RootCauseAnalysis,
    performance_metrics: PerformanceMetric,
    incident_reports: IncidentReport,
    knowledge_base_articles: KnowledgeBaseArticle,
    post_incident_reviews: PostIncidentReview,
    incident_updates: IncidentUpdate,
    audit_logs: AuditLog,
    human_transfers: HumanTransfer,
);

impl EntityStore {
    /// Create a store with every table empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the table of `E`.
    pub fn table<E: Entity>(&self) -> &Table<E>
    where
        Self: HasTable<E>,
    {
        <Self as HasTable<E>>::get_table(self)
    }

    /// Mutably borrow the table of `E`.
    pub fn table_mut<E: Entity>(&mut self) -> &mut Table<E>
    where
        Self: HasTable<E>,
    {
        <Self as HasTable<E>>::get_table_mut(self)
    }

    /// Record of type `E` with identifier `id`.
    pub fn get<E: Entity>(&self, id: E::Id) -> Option<&E>
    where
        Self: HasTable<E>,
    {
        self.table::<E>().get(id)
    }

    /// Record count per table.
    pub fn counts(&self) -> BTreeMap<TableName, usize> {
        TableName::ALL
            .iter()
            .map(|t| (*t, self.count(*t)))
            .collect()
    }

    /// Total number of records across all tables.
    pub fn total_records(&self) -> usize {
        TableName::ALL.iter().map(|t| self.count(*t)).sum()
    }
}
