//! Command handlers organized by record family.
//!
//! Each submodule dispatches directly to the engine operations for its
//! family and shapes the result into an [`Output`]:
//!
//! | Module | Commands | Records |
//! |--------|----------|---------|
//! | `party` | 9 | Client, Vendor, User |
//! | `catalog` | 12 | Product, InfrastructureComponent, Subscription, SLA |
//! | `incident` | 29 | Incident, ProblemTicket, ChangeRequest, RollbackRequest, WorkOrder, Escalation, Communication, Workaround, RootCauseAnalysis, PerformanceMetric |
//! | `knowledge` | 9 | IncidentReport, KnowledgeBaseArticle, PostIncidentReview |
//! | `journal` | 5 | IncidentUpdate, AuditLog, HumanTransfer |

pub mod catalog;
pub mod incident;
pub mod journal;
pub mod knowledge;
pub mod party;

use std::fmt;

use crate::Output;
use incidentdb_core::{Record, TableName};

/// Output of a successful create.
///
/// Problem tickets report their id as `ticket_id`; every other table uses
/// its identifier field name.
pub(crate) fn created(table: TableName, id: impl fmt::Display) -> Output {
    let id_field = match table {
        TableName::ProblemTickets => "ticket_id",
        other => other.id_field(),
    };
    Output::Created {
        id_field,
        id: id.to_string(),
    }
}

/// Output of a successful update.
pub(crate) fn updated(record: impl Into<Record>) -> Output {
    Output::Updated(record.into())
}

/// Output of a discover.
pub(crate) fn found<E: Into<Record>>(records: Vec<E>) -> Output {
    Output::Found(records.into_iter().map(Into::into).collect())
}
