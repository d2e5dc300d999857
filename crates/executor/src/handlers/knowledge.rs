//! Report, knowledge base and review command handlers.

use incidentdb_core::TableName;
use incidentdb_engine::ops::knowledge;
use incidentdb_engine::OpContext;
use incidentdb_storage::EntityStore;

use super::{created, found, updated};
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle CreateIncidentReport command.
pub fn create_incident_report(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: knowledge::CreateIncidentReport,
) -> Result<Output> {
    let id = convert_result(knowledge::create_incident_report(store, ctx, req))?;
    Ok(created(TableName::IncidentReports, id))
}

/// Handle UpdateIncidentReport command.
pub fn update_incident_report(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: knowledge::UpdateIncidentReport,
) -> Result<Output> {
    Ok(updated(convert_result(knowledge::update_incident_report(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverIncidentReports command.
pub fn discover_incident_reports(
    store: &EntityStore,
    filter: &knowledge::IncidentReportFilter,
) -> Result<Output> {
    Ok(found(knowledge::discover_incident_reports(store, filter)))
}

/// Handle CreateKbArticle command.
pub fn create_kb_article(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: knowledge::CreateKbArticle,
) -> Result<Output> {
    let id = convert_result(knowledge::create_kb_article(store, ctx, req))?;
    Ok(created(TableName::KnowledgeBaseArticles, id))
}

/// Handle UpdateKbArticle command.
pub fn update_kb_article(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: knowledge::UpdateKbArticle,
) -> Result<Output> {
    Ok(updated(convert_result(knowledge::update_kb_article(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverKbArticles command.
pub fn discover_kb_articles(
    store: &EntityStore,
    filter: &knowledge::KbArticleFilter,
) -> Result<Output> {
    Ok(found(knowledge::discover_kb_articles(store, filter)))
}

/// Handle CreatePostIncidentReview command.
pub fn create_post_incident_review(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: knowledge::CreatePostIncidentReview,
) -> Result<Output> {
    let id = convert_result(knowledge::create_post_incident_review(store, ctx, req))?;
    Ok(created(TableName::PostIncidentReviews, id))
}

/// Handle UpdatePostIncidentReview command.
pub fn update_post_incident_review(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: knowledge::UpdatePostIncidentReview,
) -> Result<Output> {
    Ok(updated(convert_result(knowledge::update_post_incident_review(
        store, ctx, req,
    ))?))
}

/// Handle DiscoverPostIncidentReviews command.
pub fn discover_post_incident_reviews(
    store: &EntityStore,
    filter: &knowledge::PostIncidentReviewFilter,
) -> Result<Output> {
    Ok(found(knowledge::discover_post_incident_reviews(store, filter)))
}
