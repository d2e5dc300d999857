//! Incident operations.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{contains_ci, id_is, opt_id_is, vocab_is};
use crate::lifecycle::{gate, INCIDENT_RESOLVED};
use crate::patch::{
    apply, apply_enum, apply_opt_ref, apply_ref, apply_text, double_option, overlay,
    overlay_nullable, sets,
};
use crate::validate::{parse_enum, parse_opt_enum, require, require_opt, require_text};
use incidentdb_core::{
    Client, Incident, IncidentId, IncidentResult, IncidentStatus, InfrastructureComponent, RawId,
    User,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_incident`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateIncident {
    pub title: String,
    pub category: String,
    pub severity: String,
    pub impact_level: String,
    pub urgency_level: String,
    pub client_id: RawId,
    pub component_id: RawId,
    pub reporter_user_id: RawId,
    pub detection_timestamp: String,
    /// Default: `open`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assigned_to_user_id: Option<RawId>,
    /// Only with status `resolved` or `closed`.
    #[serde(default)]
    pub resolution_timestamp: Option<String>,
}

/// Mutable incident fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncidentPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub severity: Option<String>,
    pub impact_level: Option<String>,
    pub urgency_level: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<RawId>,
    pub component_id: Option<RawId>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub assigned_to_user_id: Option<Option<RawId>>,
    pub detection_timestamp: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub resolution_timestamp: Option<Option<String>>,
}

/// Arguments of `update_incident`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateIncident {
    pub incident_id: RawId,
    #[serde(default)]
    pub change_set: IncidentPatch,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assigned_to_user_id: Option<RawId>,
    #[serde(default)]
    pub resolution_timestamp: Option<String>,
}

/// Filters of `discover_incidents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncidentFilter {
    pub incident_id: Option<RawId>,
    pub client_id: Option<RawId>,
    pub component_id: Option<RawId>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub assigned_to_user_id: Option<RawId>,
    pub reporter_user_id: Option<RawId>,
    pub title: Option<String>,
}

/// Open an incident.
pub fn create_incident(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateIncident,
) -> IncidentResult<IncidentId> {
    require_text("title", &req.title)?;
    let category = parse_enum("category", &req.category)?;
    let severity = parse_enum("severity", &req.severity)?;
    let impact_level = parse_enum("impact_level", &req.impact_level)?;
    let urgency_level = parse_enum("urgency_level", &req.urgency_level)?;
    let status = parse_opt_enum("status", req.status.as_deref())?.unwrap_or(IncidentStatus::Open);
    let client_id = require::<Client>(store, &req.client_id)?;
    let component_id = require::<InfrastructureComponent>(store, &req.component_id)?;
    let reporter_user_id = require::<User>(store, &req.reporter_user_id)?;
    let assigned_to_user_id = require_opt::<User>(store, req.assigned_to_user_id.as_ref())?;
    require_text("detection_timestamp", &req.detection_timestamp)?;
    gate(
        "resolution_timestamp",
        req.resolution_timestamp.is_some(),
        status,
        INCIDENT_RESOLVED,
    )?;

    let record = Incident {
        incident_id: store.table::<Incident>().next_id()?,
        title: req.title,
        category,
        severity,
        impact_level,
        urgency_level,
        status,
        client_id,
        component_id,
        reporter_user_id,
        assigned_to_user_id,
        detection_timestamp: req.detection_timestamp,
        resolution_timestamp: req.resolution_timestamp,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update an incident.
///
/// Resolving does not fill `resolution_timestamp`; callers supply it.
pub fn update_incident(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateIncident,
) -> IncidentResult<Incident> {
    let mut record: Incident = load_target(store, &req.incident_id)?;
    let mut patch = req.change_set;
    overlay(&mut patch.status, req.status);
    overlay_nullable(&mut patch.assigned_to_user_id, req.assigned_to_user_id);
    overlay_nullable(&mut patch.resolution_timestamp, req.resolution_timestamp);

    apply_text("title", &mut record.title, patch.title)?;
    apply_enum("category", &mut record.category, patch.category)?;
    apply_enum("severity", &mut record.severity, patch.severity)?;
    apply_enum("impact_level", &mut record.impact_level, patch.impact_level)?;
    apply_enum("urgency_level", &mut record.urgency_level, patch.urgency_level)?;
    apply_enum("status", &mut record.status, patch.status)?;
    apply_ref::<Client>(store, &mut record.client_id, patch.client_id)?;
    apply_ref::<InfrastructureComponent>(store, &mut record.component_id, patch.component_id)?;
    apply_opt_ref::<User>(store, &mut record.assigned_to_user_id, patch.assigned_to_user_id)?;
    apply_text(
        "detection_timestamp",
        &mut record.detection_timestamp,
        patch.detection_timestamp,
    )?;
    gate(
        "resolution_timestamp",
        sets(&patch.resolution_timestamp),
        record.status,
        INCIDENT_RESOLVED,
    )?;
    apply(&mut record.resolution_timestamp, patch.resolution_timestamp);
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List incidents matching every supplied filter.
pub fn discover_incidents(store: &EntityStore, filter: &IncidentFilter) -> Vec<Incident> {
    listing(store, |i: &Incident| {
        id_is(&filter.incident_id, i.incident_id)
            && id_is(&filter.client_id, i.client_id)
            && id_is(&filter.component_id, i.component_id)
            && vocab_is(&filter.severity, i.severity)
            && vocab_is(&filter.status, i.status)
            && opt_id_is(&filter.assigned_to_user_id, i.assigned_to_user_id)
            && id_is(&filter.reporter_user_id, i.reporter_user_id)
            && contains_ci(&filter.title, &i.title)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::{ctx, raw, seeded, NOW};
    use incidentdb_core::{ErrorKind, UserId};

    fn new_incident() -> CreateIncident {
        CreateIncident {
            title: "Checkout latency".into(),
            category: "performance_degradation".into(),
            severity: "P2".into(),
            impact_level: "medium".into(),
            urgency_level: "high".into(),
            client_id: raw(1),
            component_id: raw(1),
            reporter_user_id: raw(2),
            detection_timestamp: "2025-09-30T23:55:00".into(),
            status: None,
            assigned_to_user_id: None,
            resolution_timestamp: None,
        }
    }

    fn resolve(status: Option<&str>, at: Option<&str>) -> UpdateIncident {
        UpdateIncident {
            incident_id: raw(1),
            change_set: IncidentPatch::default(),
            status: status.map(str::to_string),
            assigned_to_user_id: None,
            resolution_timestamp: at.map(str::to_string),
        }
    }

    #[test]
    fn create_incident_defaults_to_open() {
        let mut store = seeded();
        let id = create_incident(&mut store, &ctx(), new_incident()).unwrap();
        assert_eq!(id, IncidentId::new(2));
        assert_eq!(store.get::<Incident>(id).unwrap().status, IncidentStatus::Open);
    }

    #[test]
    fn unknown_client_is_not_found_and_nothing_is_inserted() {
        let mut store = seeded();
        let mut req = new_incident();
        req.client_id = raw(999);
        let err = create_incident(&mut store, &ctx(), req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Client 999 not found");
        assert_eq!(store.table::<Incident>().len(), 1);
    }

    #[test]
    fn resolution_timestamp_requires_resolved_status() {
        let mut store = seeded();
        let mut req = new_incident();
        req.resolution_timestamp = Some("2025-10-01T02:00:00".into());
        let err = create_incident(&mut store, &ctx(), req.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);

        req.status = Some("closed".into());
        assert!(create_incident(&mut store, &ctx(), req).is_ok());
    }

    #[test]
    fn resolving_keeps_resolution_timestamp_when_not_supplied() {
        let mut store = seeded();
        let later = OpContext::new("2025-10-01T04:00:00");
        let incident = update_incident(&mut store, &later, resolve(Some("resolved"), None)).unwrap();
        assert_eq!(incident.status, IncidentStatus::Resolved);
        assert_eq!(incident.resolution_timestamp, None);
        assert_eq!(incident.created_at, NOW);
        assert_eq!(incident.updated_at, "2025-10-01T04:00:00");
    }

    #[test]
    fn timestamp_with_open_status_is_rejected_atomically() {
        let mut store = seeded();
        let before = store.clone();
        let err = update_incident(
            &mut store,
            &ctx(),
            resolve(Some("investigating"), Some("2025-10-01T03:00:00")),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert_eq!(store, before);
    }

    #[test]
    fn clearing_resolution_timestamp_is_always_allowed() {
        let mut store = seeded();
        update_incident(
            &mut store,
            &ctx(),
            resolve(Some("resolved"), Some("2025-10-01T03:00:00")),
        )
        .unwrap();
        let mut reopen = resolve(Some("open"), None);
        reopen.change_set.resolution_timestamp = Some(None);
        let incident = update_incident(&mut store, &ctx(), reopen).unwrap();
        assert_eq!(incident.status, IncidentStatus::Open);
        assert_eq!(incident.resolution_timestamp, None);
    }

    #[test]
    fn assign_via_convenience_argument() {
        let mut store = seeded();
        let mut req = resolve(None, None);
        req.assigned_to_user_id = Some(raw(2));
        let incident = update_incident(&mut store, &ctx(), req).unwrap();
        assert_eq!(incident.assigned_to_user_id, Some(UserId::new(2)));

        let mut bad = resolve(None, None);
        bad.assigned_to_user_id = Some(raw(50));
        assert_eq!(
            update_incident(&mut store, &ctx(), bad).unwrap_err().to_string(),
            "User 50 not found"
        );
    }

    #[test]
    fn discover_incidents_by_title_and_status() {
        let mut store = seeded();
        create_incident(&mut store, &ctx(), new_incident()).unwrap();
        let filter = IncidentFilter {
            title: Some("LATENCY".into()),
            status: Some("open".into()),
            ..Default::default()
        };
        let found = discover_incidents(&store, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].incident_id, IncidentId::new(2));

        let none = IncidentFilter {
            status: Some("reopened".into()),
            ..Default::default()
        };
        assert!(discover_incidents(&store, &none).is_empty());
    }
}
