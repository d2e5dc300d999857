//! Entity record types
//!
//! One struct per table. Field names match the persisted layout so that a
//! table file is simply a JSON map from identifier to record.
//!
//! | Module | Records |
//! |--------|---------|
//! | `party` | Client, Vendor |
//! | `catalog` | Product, InfrastructureComponent |
//! | `user` | User |
//! | `commercial` | Subscription, ServiceLevelAgreement |
//! | `incident` | Incident, ProblemTicket |
//! | `change` | ChangeRequest, RollbackRequest, WorkOrder |
//! | `response` | Escalation, Communication, Workaround |
//! | `analysis` | RootCauseAnalysis, PerformanceMetric |
//! | `knowledge` | IncidentReport, KnowledgeBaseArticle, PostIncidentReview |
//! | `journal` | IncidentUpdate, AuditLog, HumanTransfer |

mod analysis;
mod catalog;
mod change;
mod commercial;
mod incident;
mod journal;
mod knowledge;
mod party;
mod response;
mod user;

pub use analysis::{PerformanceMetric, RootCauseAnalysis};
pub use catalog::{InfrastructureComponent, Product};
pub use change::{ChangeRequest, RollbackRequest, WorkOrder};
pub use commercial::{ServiceLevelAgreement, Subscription};
pub use incident::{Incident, ProblemTicket};
pub use journal::{AuditLog, HumanTransfer, IncidentUpdate};
pub use knowledge::{IncidentReport, KnowledgeBaseArticle, PostIncidentReview};
pub use party::{Client, Vendor};
pub use response::{Communication, Escalation, Workaround};
pub use user::User;

use crate::entity::Reference;
use crate::ids::EntityId;
use crate::table::TableName;

fn optional_ref<I: EntityId>(
    refs: &mut Vec<Reference>,
    field: &'static str,
    table: TableName,
    id: Option<I>,
) {
    if let Some(id) = id {
        refs.push(Reference::new(field, table, id));
    }
}
