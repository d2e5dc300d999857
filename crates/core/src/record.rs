//! Type-erased record
//!
//! `Record` carries any entity across API boundaries where the concrete
//! table is only known at run time (update results, discover listings).
//! It serializes as the bare record, with no variant tag.

use crate::records::*;
use crate::table::TableName;
use serde::Serialize;

macro_rules! records {
    ($($variant:ident),+ $(,)?) => {
        /// Any stored record.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum Record {
            $(
                #[allow(missing_docs)]
                $variant($variant),
            )+
        }

        impl Record {
            /// Table the record belongs to.
            pub fn table(&self) -> TableName {
                use crate::entity::Entity;
                match self {
                    $(Record::$variant(_) => <$variant as Entity>::TABLE,)+
                }
            }

            /// Raw identifier of the record.
            pub fn raw_id(&self) -> u64 {
                use crate::entity::Entity;
                use crate::ids::EntityId;
                match self {
                    $(Record::$variant(r) => r.id().raw(),)+
                }
            }
        }

        $(
            impl From<$variant> for Record {
                fn from(r: $variant) -> Self {
                    Record::$variant(r)
                }
            }
        )+
    };
}

records!(
    Client,
    Vendor,
    Product,
    InfrastructureComponent,
    User,
    Subscription,
    ServiceLevelAgreement,
    Incident,
    ProblemTicket,
    ChangeRequest,
    RollbackRequest,
    WorkOrder,
    Escalation,
    Communication,
    Workaround,
    RootCauseAnalysis,
    PerformanceMetric,
    IncidentReport,
    KnowledgeBaseArticle,
    PostIncidentReview,
    IncidentUpdate,
    AuditLog,
    HumanTransfer,
);

impl Record {
    /// The record as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        // Records contain only strings, numbers, nulls and JSON values.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
