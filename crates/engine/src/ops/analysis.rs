//! Root cause analysis and performance metric operations.
//!
//! Metrics are measurements: they are recorded once and never updated.

use std::collections::BTreeMap;

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{id_is, vocab_is};
use crate::lifecycle::{gate, ANALYSIS_DONE};
use crate::patch::{apply, apply_enum, apply_ref, double_option, sets};
use crate::validate::{parse_enum, parse_opt_enum, require};
use incidentdb_core::{
    AnalysisId, AnalysisStatus, Incident, IncidentError, IncidentId, IncidentResult, MetricId,
    MetricType, PerformanceMetric, RawId, RootCauseAnalysis, User,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_root_cause_analysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateRootCauseAnalysis {
    pub incident_id: RawId,
    pub conducted_by_user: RawId,
    pub analysis_method: String,
    /// Default: `in_progress`.
    #[serde(default)]
    pub status: Option<String>,
    /// Only with status `completed` or `reviewed`.
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// Mutable analysis fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RootCauseAnalysisPatch {
    pub conducted_by_user: Option<RawId>,
    pub analysis_method: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<String>>,
}

/// Arguments of `update_root_cause_analysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRootCauseAnalysis {
    pub analysis_id: RawId,
    #[serde(default)]
    pub change_set: RootCauseAnalysisPatch,
}

/// Filters of `discover_root_cause_analyses`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RootCauseAnalysisFilter {
    pub analysis_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub status: Option<String>,
}

/// Start a root cause analysis.
pub fn create_root_cause_analysis(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateRootCauseAnalysis,
) -> IncidentResult<AnalysisId> {
    let incident_id = require::<Incident>(store, &req.incident_id)?;
    let conducted_by_user = require::<User>(store, &req.conducted_by_user)?;
    let analysis_method = parse_enum("analysis_method", &req.analysis_method)?;
    let status =
        parse_opt_enum("status", req.status.as_deref())?.unwrap_or(AnalysisStatus::InProgress);
    gate("completed_at", req.completed_at.is_some(), status, ANALYSIS_DONE)?;

    let record = RootCauseAnalysis {
        analysis_id: store.table::<RootCauseAnalysis>().next_id()?,
        incident_id,
        conducted_by_user,
        analysis_method,
        status,
        completed_at: req.completed_at,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update a root cause analysis.
pub fn update_root_cause_analysis(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateRootCauseAnalysis,
) -> IncidentResult<RootCauseAnalysis> {
    let mut record: RootCauseAnalysis = load_target(store, &req.analysis_id)?;
    let patch = req.change_set;
    let completing = sets(&patch.completed_at);

    apply_ref::<User>(store, &mut record.conducted_by_user, patch.conducted_by_user)?;
    apply_enum("analysis_method", &mut record.analysis_method, patch.analysis_method)?;
    apply_enum("status", &mut record.status, patch.status)?;
    gate("completed_at", completing, record.status, ANALYSIS_DONE)?;
    apply(&mut record.completed_at, patch.completed_at);
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List analyses matching every supplied filter.
pub fn discover_root_cause_analyses(
    store: &EntityStore,
    filter: &RootCauseAnalysisFilter,
) -> Vec<RootCauseAnalysis> {
    listing(store, |a: &RootCauseAnalysis| {
        id_is(&filter.analysis_id, a.analysis_id)
            && id_is(&filter.incident_id, a.incident_id)
            && vocab_is(&filter.status, a.status)
    })
}

/// Arguments of `create_performance_metric`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePerformanceMetric {
    pub incident_id: RawId,
    pub metric_type: String,
    /// Truncated to whole minutes.
    pub calculated_value_minutes: f64,
    pub recorded_by_user: RawId,
    /// Truncated to whole minutes.
    #[serde(default)]
    pub target_minutes: Option<f64>,
}

/// Filters of `discover_performance_metrics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceMetricFilter {
    pub metric_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub metric_type: Option<String>,
}

/// Result of recording a metric: the new id plus every value recorded for
/// the same incident, grouped by metric type in recording order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric_id: MetricId,
    pub calculated_values: BTreeMap<MetricType, Vec<u64>>,
}

fn whole_minutes(field: &str, value: f64) -> IncidentResult<u64> {
    if !value.is_finite() || value < 0.0 {
        return Err(IncidentError::validation(format!(
            "{} must be a non-negative number of minutes, got {}",
            field, value
        )));
    }
    Ok(value.trunc() as u64)
}

/// Values recorded for `incident_id`, grouped by metric type.
pub fn metric_values(store: &EntityStore, incident_id: IncidentId) -> BTreeMap<MetricType, Vec<u64>> {
    let mut values: BTreeMap<MetricType, Vec<u64>> = BTreeMap::new();
    for metric in store
        .table::<PerformanceMetric>()
        .iter()
        .filter(|m| m.incident_id == incident_id)
    {
        values
            .entry(metric.metric_type)
            .or_default()
            .push(metric.calculated_value_minutes);
    }
    values
}

/// Record a performance metric for an incident.
pub fn create_performance_metric(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreatePerformanceMetric,
) -> IncidentResult<MetricSummary> {
    let incident_id = require::<Incident>(store, &req.incident_id)?;
    let recorded_by_user = require::<User>(store, &req.recorded_by_user)?;
    let metric_type = parse_enum("metric_type", &req.metric_type)?;
    let calculated_value_minutes =
        whole_minutes("calculated_value_minutes", req.calculated_value_minutes)?;
    let target_minutes = req
        .target_minutes
        .map(|t| whole_minutes("target_minutes", t))
        .transpose()?;

    let record = PerformanceMetric {
        metric_id: store.table::<PerformanceMetric>().next_id()?,
        incident_id,
        metric_type,
        calculated_value_minutes,
        target_minutes,
        recorded_by_user,
        recorded_at: ctx.now.clone(),
        created_at: ctx.now.clone(),
    };
    let metric_id = commit(store, record);
    Ok(MetricSummary {
        metric_id,
        calculated_values: metric_values(store, incident_id),
    })
}

/// List metrics matching every supplied filter.
pub fn discover_performance_metrics(
    store: &EntityStore,
    filter: &PerformanceMetricFilter,
) -> Vec<PerformanceMetric> {
    listing(store, |m: &PerformanceMetric| {
        id_is(&filter.metric_id, m.metric_id)
            && id_is(&filter.incident_id, m.incident_id)
            && vocab_is(&filter.metric_type, m.metric_type)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::{ctx, raw, seeded};
    use incidentdb_core::{AnalysisMethod, ErrorKind};

    fn metric(kind: &str, minutes: f64) -> CreatePerformanceMetric {
        CreatePerformanceMetric {
            incident_id: raw(1),
            metric_type: kind.into(),
            calculated_value_minutes: minutes,
            recorded_by_user: raw(1),
            target_minutes: Some(30.0),
        }
    }

    #[test]
    fn analysis_lifecycle() {
        let mut store = seeded();
        let req = CreateRootCauseAnalysis {
            incident_id: raw(1),
            conducted_by_user: raw(2),
            analysis_method: "five_whys".into(),
            status: None,
            completed_at: Some("2025-10-03T00:00:00".into()),
        };
        assert!(create_root_cause_analysis(&mut store, &ctx(), req.clone()).is_err());

        let open = CreateRootCauseAnalysis {
            completed_at: None,
            ..req
        };
        let id = create_root_cause_analysis(&mut store, &ctx(), open).unwrap();
        let created = store.get::<RootCauseAnalysis>(id).unwrap();
        assert_eq!(created.status, AnalysisStatus::InProgress);
        assert_eq!(created.analysis_method, AnalysisMethod::FiveWhys);

        let done: UpdateRootCauseAnalysis = serde_json::from_str(
            r#"{"analysis_id": "1", "change_set": {"status": "reviewed", "completed_at": "2025-10-03T00:00:00"}}"#,
        )
        .unwrap();
        let updated = update_root_cause_analysis(&mut store, &ctx(), done).unwrap();
        assert_eq!(updated.status, AnalysisStatus::Reviewed);
    }

    #[test]
    fn metric_values_are_truncated_and_grouped() {
        let mut store = seeded();
        create_performance_metric(&mut store, &ctx(), metric("response_time", 12.9)).unwrap();
        create_performance_metric(&mut store, &ctx(), metric("resolution_time", 240.0)).unwrap();
        let summary =
            create_performance_metric(&mut store, &ctx(), metric("response_time", 7.2)).unwrap();
        assert_eq!(summary.metric_id, MetricId::new(3));
        assert_eq!(summary.calculated_values[&MetricType::ResponseTime], vec![12, 7]);
        assert_eq!(summary.calculated_values[&MetricType::ResolutionTime], vec![240]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["calculated_values"]["response_time"], serde_json::json!([12, 7]));
        assert_eq!(json["metric_id"], "3");
    }

    #[test]
    fn negative_or_non_finite_minutes_are_rejected() {
        let mut store = seeded();
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = create_performance_metric(&mut store, &ctx(), metric("detection_time", bad))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        }
        assert!(store.table::<PerformanceMetric>().is_empty());
    }

    #[test]
    fn discover_metrics_by_type() {
        let mut store = seeded();
        create_performance_metric(&mut store, &ctx(), metric("response_time", 5.0)).unwrap();
        create_performance_metric(&mut store, &ctx(), metric("escalation_time", 9.0)).unwrap();
        let filter = PerformanceMetricFilter {
            metric_type: Some("escalation_time".into()),
            ..Default::default()
        };
        let found = discover_performance_metrics(&store, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].calculated_value_minutes, 9);
    }
}
