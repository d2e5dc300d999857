//! Subscription and service level agreement operations.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{id_is, vocab_is};
use crate::patch::{apply, apply_enum, apply_ref, apply_text, double_option};
use crate::validate::{ensure_unique, parse_enum, parse_opt_enum, require, require_text};
use incidentdb_core::{
    Client, IncidentError, IncidentResult, Product, RawId, ServiceLevelAgreement, SlaId,
    Subscription, SubscriptionId, SubscriptionStatus,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};

/// Arguments of `create_subscription`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSubscription {
    pub client_id: RawId,
    pub product_id: RawId,
    pub subscription_type: String,
    pub sla_tier: String,
    pub start_date: String,
    /// Null for an open-ended subscription.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub rto_hours: Option<u32>,
    /// Default: `active`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Mutable subscription fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubscriptionPatch {
    pub client_id: Option<RawId>,
    pub product_id: Option<RawId>,
    pub subscription_type: Option<String>,
    pub sla_tier: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub rto_hours: Option<Option<u32>>,
    pub start_date: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<String>>,
    pub status: Option<String>,
}

/// Arguments of `update_subscription`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSubscription {
    pub subscription_id: RawId,
    #[serde(default)]
    pub change_set: SubscriptionPatch,
}

/// Filters of `discover_subscriptions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubscriptionFilter {
    pub subscription_id: Option<RawId>,
    pub client_id: Option<RawId>,
    pub product_id: Option<RawId>,
    pub sla_tier: Option<String>,
    pub status: Option<String>,
}

/// Subscribe a client to a product.
pub fn create_subscription(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateSubscription,
) -> IncidentResult<SubscriptionId> {
    let client_id = require::<Client>(store, &req.client_id)?;
    let product_id = require::<Product>(store, &req.product_id)?;
    let subscription_type = parse_enum("subscription_type", &req.subscription_type)?;
    let sla_tier = parse_enum("sla_tier", &req.sla_tier)?;
    let status =
        parse_opt_enum("status", req.status.as_deref())?.unwrap_or(SubscriptionStatus::Active);
    require_text("start_date", &req.start_date)?;

    let record = Subscription {
        subscription_id: store.table::<Subscription>().next_id()?,
        client_id,
        product_id,
        subscription_type,
        sla_tier,
        rto_hours: req.rto_hours,
        start_date: req.start_date,
        end_date: req.end_date,
        status,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update a subscription.
pub fn update_subscription(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateSubscription,
) -> IncidentResult<Subscription> {
    let mut record: Subscription = load_target(store, &req.subscription_id)?;
    let patch = req.change_set;
    apply_ref::<Client>(store, &mut record.client_id, patch.client_id)?;
    apply_ref::<Product>(store, &mut record.product_id, patch.product_id)?;
    apply_enum("subscription_type", &mut record.subscription_type, patch.subscription_type)?;
    apply_enum("sla_tier", &mut record.sla_tier, patch.sla_tier)?;
    apply(&mut record.rto_hours, patch.rto_hours);
    apply_text("start_date", &mut record.start_date, patch.start_date)?;
    apply(&mut record.end_date, patch.end_date);
    apply_enum("status", &mut record.status, patch.status)?;
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List subscriptions matching every supplied filter.
pub fn discover_subscriptions(store: &EntityStore, filter: &SubscriptionFilter) -> Vec<Subscription> {
    listing(store, |s: &Subscription| {
        id_is(&filter.subscription_id, s.subscription_id)
            && id_is(&filter.client_id, s.client_id)
            && id_is(&filter.product_id, s.product_id)
            && vocab_is(&filter.sla_tier, s.sla_tier)
            && vocab_is(&filter.status, s.status)
    })
}

/// Arguments of `create_sla`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSla {
    pub subscription_id: RawId,
    /// One SLA per severity per subscription.
    pub severity_level: String,
    pub response_time_minutes: u32,
    pub resolution_time_hours: u32,
    /// Percentage in `0..=100`.
    #[serde(default)]
    pub availability_percentage: Option<f64>,
}

/// Mutable SLA fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlaPatch {
    pub subscription_id: Option<RawId>,
    pub severity_level: Option<String>,
    pub response_time_minutes: Option<u32>,
    pub resolution_time_hours: Option<u32>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub availability_percentage: Option<Option<f64>>,
}

/// Arguments of `update_sla`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSla {
    pub sla_id: RawId,
    #[serde(default)]
    pub change_set: SlaPatch,
}

/// Filters of `discover_slas`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlaFilter {
    pub sla_id: Option<RawId>,
    pub subscription_id: Option<RawId>,
    pub severity_level: Option<String>,
}

fn check_availability(value: Option<f64>) -> IncidentResult<()> {
    match value {
        Some(pct) if !(0.0..=100.0).contains(&pct) => Err(IncidentError::validation(format!(
            "availability_percentage must be between 0 and 100, got {}",
            pct
        ))),
        _ => Ok(()),
    }
}

/// Reject the candidate when its subscription already holds the maximum
/// number of other agreements.
fn check_capacity(
    store: &EntityStore,
    ctx: &OpContext,
    candidate: &ServiceLevelAgreement,
) -> IncidentResult<()> {
    let held = store
        .table::<ServiceLevelAgreement>()
        .iter()
        .filter(|s| s.subscription_id == candidate.subscription_id && s.sla_id != candidate.sla_id)
        .count();
    if held >= ctx.max_slas_per_subscription {
        return Err(IncidentError::validation(format!(
            "Subscription {} already has {} SLAs (maximum {})",
            candidate.subscription_id, held, ctx.max_slas_per_subscription
        )));
    }
    Ok(())
}

/// Attach a service level agreement to a subscription.
pub fn create_sla(store: &mut EntityStore, ctx: &OpContext, req: CreateSla) -> IncidentResult<SlaId> {
    let subscription_id = require::<Subscription>(store, &req.subscription_id)?;
    let severity_level = parse_enum("severity_level", &req.severity_level)?;
    check_availability(req.availability_percentage)?;

    let table = store.table::<ServiceLevelAgreement>();
    let record = ServiceLevelAgreement {
        sla_id: table.next_id()?,
        subscription_id,
        severity_level,
        response_time_minutes: req.response_time_minutes,
        resolution_time_hours: req.resolution_time_hours,
        availability_percentage: req.availability_percentage,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    ensure_unique(table, &record)?;
    check_capacity(store, ctx, &record)?;
    Ok(commit(store, record))
}

/// Update a service level agreement.
pub fn update_sla(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateSla,
) -> IncidentResult<ServiceLevelAgreement> {
    let mut record: ServiceLevelAgreement = load_target(store, &req.sla_id)?;
    let patch = req.change_set;
    let moved = patch.subscription_id.is_some();
    apply_ref::<Subscription>(store, &mut record.subscription_id, patch.subscription_id)?;
    apply_enum("severity_level", &mut record.severity_level, patch.severity_level)?;
    apply(&mut record.response_time_minutes, patch.response_time_minutes);
    apply(&mut record.resolution_time_hours, patch.resolution_time_hours);
    if let Some(pct) = patch.availability_percentage {
        check_availability(pct)?;
        record.availability_percentage = pct;
    }
    record.updated_at = ctx.now.clone();

    ensure_unique(store.table::<ServiceLevelAgreement>(), &record)?;
    if moved {
        check_capacity(store, ctx, &record)?;
    }
    Ok(commit_update(store, record))
}

/// List agreements matching every supplied filter.
pub fn discover_slas(store: &EntityStore, filter: &SlaFilter) -> Vec<ServiceLevelAgreement> {
    listing(store, |s: &ServiceLevelAgreement| {
        id_is(&filter.sla_id, s.sla_id)
            && id_is(&filter.subscription_id, s.subscription_id)
            && vocab_is(&filter.severity_level, s.severity_level)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::{ctx, raw, seeded};
    use incidentdb_core::{ErrorKind, SlaTier};

    fn sla(severity: &str) -> CreateSla {
        CreateSla {
            subscription_id: raw(1),
            severity_level: severity.into(),
            response_time_minutes: 15,
            resolution_time_hours: 4,
            availability_percentage: Some(99.95),
        }
    }

    #[test]
    fn create_subscription_requires_client_and_product() {
        let mut store = seeded();
        let req = CreateSubscription {
            client_id: raw(1),
            product_id: raw(5),
            subscription_type: "trial".into(),
            sla_tier: "basic".into(),
            start_date: "2025-10-01".into(),
            end_date: None,
            rto_hours: None,
            status: None,
        };
        let err = create_subscription(&mut store, &ctx(), req.clone()).unwrap_err();
        assert_eq!(err.to_string(), "Product 5 not found");

        let ok = CreateSubscription {
            product_id: raw(1),
            ..req
        };
        let id = create_subscription(&mut store, &ctx(), ok).unwrap();
        assert_eq!(id, SubscriptionId::new(2));
        assert_eq!(
            store.get::<Subscription>(id).unwrap().status,
            SubscriptionStatus::Active
        );
    }

    #[test]
    fn update_subscription_tier_and_end_date() {
        let mut store = seeded();
        let req: UpdateSubscription = serde_json::from_str(
            r#"{"subscription_id": "1", "change_set": {"sla_tier": "standard", "end_date": "2026-01-01"}}"#,
        )
        .unwrap();
        let sub = update_subscription(&mut store, &ctx(), req).unwrap();
        assert_eq!(sub.sla_tier, SlaTier::Standard);
        assert_eq!(sub.end_date.as_deref(), Some("2026-01-01"));
    }

    #[test]
    fn one_sla_per_severity() {
        let mut store = seeded();
        create_sla(&mut store, &ctx(), sla("P2")).unwrap();
        let err = create_sla(&mut store, &ctx(), sla("P2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateConflict);
        assert_eq!(err.to_string(), "subscription_id+severity_level 1+P2 already exists");
    }

    #[test]
    fn subscription_holds_at_most_three_slas() {
        let mut store = seeded();
        for severity in ["P1", "P2", "P3"] {
            create_sla(&mut store, &ctx(), sla(severity)).unwrap();
        }
        let err = create_sla(&mut store, &ctx(), sla("P4")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert_eq!(store.table::<ServiceLevelAgreement>().len(), 3);
    }

    #[test]
    fn configured_capacity_is_honoured() {
        let mut store = seeded();
        let mut one = ctx();
        one.max_slas_per_subscription = 1;
        create_sla(&mut store, &one, sla("P1")).unwrap();
        assert!(create_sla(&mut store, &one, sla("P2")).is_err());
    }

    #[test]
    fn availability_out_of_range_is_rejected() {
        let mut store = seeded();
        let mut req = sla("P1");
        req.availability_percentage = Some(100.5);
        let err = create_sla(&mut store, &ctx(), req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    #[test]
    fn update_sla_to_taken_severity_conflicts() {
        let mut store = seeded();
        create_sla(&mut store, &ctx(), sla("P1")).unwrap();
        create_sla(&mut store, &ctx(), sla("P2")).unwrap();
        let req: UpdateSla =
            serde_json::from_str(r#"{"sla_id": "2", "change_set": {"severity_level": "P1"}}"#).unwrap();
        let err = update_sla(&mut store, &ctx(), req).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateConflict);

        let req: UpdateSla = serde_json::from_str(
            r#"{"sla_id": "2", "change_set": {"response_time_minutes": 30, "availability_percentage": null}}"#,
        )
        .unwrap();
        let updated = update_sla(&mut store, &ctx(), req).unwrap();
        assert_eq!(updated.response_time_minutes, 30);
        assert_eq!(updated.availability_percentage, None);
    }

    #[test]
    fn discover_slas_by_severity() {
        let mut store = seeded();
        create_sla(&mut store, &ctx(), sla("P1")).unwrap();
        create_sla(&mut store, &ctx(), sla("P3")).unwrap();
        let filter = SlaFilter {
            severity_level: Some("P3".into()),
            ..Default::default()
        };
        let found = discover_slas(&store, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sla_id, SlaId::new(2));
    }
}
