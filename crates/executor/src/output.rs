//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant on success. The JSON
//! shape each variant takes on the invocation boundary is built by
//! [`Output::to_json`].

use incidentdb_core::Record;
use incidentdb_engine::ops::analysis::MetricSummary;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Successful command result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Output {
    /// A record was created.
    Created {
        /// Name under which the id is reported (`client_id`, `ticket_id`, ...)
        id_field: &'static str,
        /// The new identifier
        id: String,
    },

    /// A performance metric was recorded.
    MetricRecorded(MetricSummary),

    /// A record was updated; carries the full merged record.
    Updated(Record),

    /// Discover result, in ascending id order.
    Found(Vec<Record>),

    /// The interaction was handed over to a human.
    Transferred {
        /// Identifier of the transfer record
        transfer_id: String,
    },
}

impl Output {
    /// The success value returned to an external caller.
    ///
    /// | Variant | JSON |
    /// |---------|------|
    /// | `Created` | `{"<id_field>": "<id>", "success": true}` |
    /// | `MetricRecorded` | `{"metric_id", "calculated_values", "success": true}` |
    /// | `Updated` | the record |
    /// | `Found` | array of records |
    /// | `Transferred` | `{"transfer_id": "<id>", "success": true}` |
    pub fn to_json(&self) -> Value {
        match self {
            Output::Created { id_field, id } => {
                let mut body = Map::new();
                body.insert((*id_field).to_string(), Value::String(id.clone()));
                body.insert("success".to_string(), Value::Bool(true));
                Value::Object(body)
            }
            Output::MetricRecorded(summary) => json!({
                "metric_id": summary.metric_id,
                "calculated_values": summary.calculated_values,
                "success": true,
            }),
            Output::Updated(record) => record.to_json(),
            Output::Found(records) => Value::Array(records.iter().map(Record::to_json).collect()),
            Output::Transferred { transfer_id } => json!({
                "transfer_id": transfer_id,
                "success": true,
            }),
        }
    }

    /// Identifier carried by a create-style output.
    pub fn created_id(&self) -> Option<&str> {
        match self {
            Output::Created { id, .. } => Some(id),
            Output::Transferred { transfer_id } => Some(transfer_id),
            _ => None,
        }
    }
}
