//! Root cause analyses and performance metrics

use crate::entity::{Entity, Reference};
use crate::ids::{AnalysisId, IncidentId, MetricId, UserId};
use crate::table::TableName;
use crate::vocab::{AnalysisMethod, AnalysisStatus, MetricType};
use serde::{Deserialize, Serialize};

/// Investigation into why an incident happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCauseAnalysis {
    /// Identifier
    pub analysis_id: AnalysisId,
    /// Analysed incident
    pub incident_id: IncidentId,
    /// Analyst
    pub conducted_by_user: UserId,
    /// Technique
    pub analysis_method: AnalysisMethod,
    /// Status
    pub status: AnalysisStatus,
    /// Completion time; only set once completed or reviewed
    pub completed_at: Option<String>,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for RootCauseAnalysis {
    type Id = AnalysisId;
    const TABLE: TableName = TableName::RootCauseAnalysis;

    fn id(&self) -> AnalysisId {
        self.analysis_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("incident_id", TableName::Incidents, self.incident_id),
            Reference::new("conducted_by_user", TableName::Users, self.conducted_by_user),
        ]
    }
}

/// A measured duration for an incident, in whole minutes.
///
/// Metrics are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    /// Identifier
    pub metric_id: MetricId,
    /// Measured incident
    pub incident_id: IncidentId,
    /// What was measured
    pub metric_type: MetricType,
    /// Measured value
    pub calculated_value_minutes: u64,
    /// Target value
    pub target_minutes: Option<u64>,
    /// Recording user
    pub recorded_by_user: UserId,
    /// Recording time
    pub recorded_at: String,
    /// Creation time
    pub created_at: String,
}

impl Entity for PerformanceMetric {
    type Id = MetricId;
    const TABLE: TableName = TableName::PerformanceMetrics;

    fn id(&self) -> MetricId {
        self.metric_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("incident_id", TableName::Incidents, self.incident_id),
            Reference::new("recorded_by_user", TableName::Users, self.recorded_by_user),
        ]
    }
}
