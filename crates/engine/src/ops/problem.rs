//! Problem ticket operations.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{id_is, opt_vocab_is, vocab_is};
use crate::patch::{apply_enum, apply_opt_enum, apply_opt_ref, apply_ref, apply_text, double_option, overlay};
use crate::validate::{parse_opt_enum, require, require_opt, require_text};
use incidentdb_core::{
    Incident, IncidentResult, ProblemId, ProblemStatus, ProblemTicket, RawId, User,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_problem_ticket`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateProblemTicket {
    pub incident_id: RawId,
    pub title: String,
    pub issued_by_user: RawId,
    /// Default: `open`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assigned_to_user: Option<RawId>,
}

/// Mutable problem ticket fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProblemTicketPatch {
    pub incident_id: Option<RawId>,
    pub title: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<String>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub assigned_to_user: Option<Option<RawId>>,
}

/// Arguments of `update_problem_ticket`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProblemTicket {
    pub problem_id: RawId,
    #[serde(default)]
    pub change_set: ProblemTicketPatch,
    #[serde(default)]
    pub status: Option<String>,
}

/// Filters of `discover_problem_tickets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProblemTicketFilter {
    pub problem_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub issued_by_user: Option<RawId>,
}

/// Raise a problem ticket against an incident.
pub fn create_problem_ticket(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateProblemTicket,
) -> IncidentResult<ProblemId> {
    let incident_id = require::<Incident>(store, &req.incident_id)?;
    let issued_by_user = require::<User>(store, &req.issued_by_user)?;
    let assigned_to_user = require_opt::<User>(store, req.assigned_to_user.as_ref())?;
    require_text("title", &req.title)?;
    let status = parse_opt_enum("status", req.status.as_deref())?.unwrap_or(ProblemStatus::Open);
    let priority = parse_opt_enum("priority", req.priority.as_deref())?;

    let record = ProblemTicket {
        problem_id: store.table::<ProblemTicket>().next_id()?,
        incident_id,
        title: req.title,
        status,
        priority,
        issued_by_user,
        assigned_to_user,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update a problem ticket.
pub fn update_problem_ticket(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateProblemTicket,
) -> IncidentResult<ProblemTicket> {
    let mut record: ProblemTicket = load_target(store, &req.problem_id)?;
    let mut patch = req.change_set;
    overlay(&mut patch.status, req.status);

    apply_ref::<Incident>(store, &mut record.incident_id, patch.incident_id)?;
    apply_text("title", &mut record.title, patch.title)?;
    apply_enum("status", &mut record.status, patch.status)?;
    apply_opt_enum("priority", &mut record.priority, patch.priority)?;
    apply_opt_ref::<User>(store, &mut record.assigned_to_user, patch.assigned_to_user)?;
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List problem tickets matching every supplied filter.
pub fn discover_problem_tickets(
    store: &EntityStore,
    filter: &ProblemTicketFilter,
) -> Vec<ProblemTicket> {
    listing(store, |p: &ProblemTicket| {
        id_is(&filter.problem_id, p.problem_id)
            && id_is(&filter.incident_id, p.incident_id)
            && vocab_is(&filter.status, p.status)
            && opt_vocab_is(&filter.priority, p.priority)
            && id_is(&filter.issued_by_user, p.issued_by_user)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::{ctx, raw, seeded};
    use incidentdb_core::{ErrorKind, ProblemPriority};

    fn ticket() -> CreateProblemTicket {
        CreateProblemTicket {
            incident_id: raw(1),
            title: "Connection pool exhaustion".into(),
            issued_by_user: raw(1),
            status: None,
            priority: Some("high".into()),
            assigned_to_user: None,
        }
    }

    #[test]
    fn create_and_update_status() {
        let mut store = seeded();
        let id = create_problem_ticket(&mut store, &ctx(), ticket()).unwrap();
        assert_eq!(id, ProblemId::new(1));
        let created = store.get::<ProblemTicket>(id).unwrap();
        assert_eq!(created.status, ProblemStatus::Open);
        assert_eq!(created.priority, Some(ProblemPriority::High));

        let req = UpdateProblemTicket {
            problem_id: raw(1),
            change_set: ProblemTicketPatch {
                priority: Some(None),
                ..Default::default()
            },
            status: Some("investigating".into()),
        };
        let updated = update_problem_ticket(&mut store, &ctx(), req).unwrap();
        assert_eq!(updated.status, ProblemStatus::Investigating);
        assert_eq!(updated.priority, None);
    }

    #[test]
    fn unknown_incident_is_not_found() {
        let mut store = seeded();
        let mut req = ticket();
        req.incident_id = raw(4);
        let err = create_problem_ticket(&mut store, &ctx(), req).unwrap_err();
        assert_eq!(err.to_string(), "Incident 4 not found");
    }

    #[test]
    fn invalid_priority_is_rejected() {
        let mut store = seeded();
        let mut req = ticket();
        req.priority = Some("urgent".into());
        let err = create_problem_ticket(&mut store, &ctx(), req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEnum);
        assert!(store.table::<ProblemTicket>().is_empty());
    }

    #[test]
    fn discover_by_priority_skips_unprioritised() {
        let mut store = seeded();
        create_problem_ticket(&mut store, &ctx(), ticket()).unwrap();
        let mut plain = ticket();
        plain.priority = None;
        create_problem_ticket(&mut store, &ctx(), plain).unwrap();

        let filter = ProblemTicketFilter {
            priority: Some("high".into()),
            ..Default::default()
        };
        assert_eq!(discover_problem_tickets(&store, &filter).len(), 1);
        assert_eq!(
            discover_problem_tickets(&store, &ProblemTicketFilter::default()).len(),
            2
        );
    }
}
