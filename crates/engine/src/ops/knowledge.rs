//! Incident reports, knowledge base articles and post-incident reviews.

use super::{commit, commit_update, listing, load_target};
use crate::context::OpContext;
use crate::discover::{contains_ci, id_is, opt_id_is, vocab_is};
use crate::lifecycle::{gate, REVIEW_DONE};
use crate::patch::{apply, apply_enum, apply_opt_ref, apply_ref, apply_text, double_option, sets};
use crate::validate::{parse_enum, parse_opt_enum, require, require_opt, require_text};
use incidentdb_core::{
    ArticleId, ArticleStatus, Incident, IncidentReport, IncidentResult, KnowledgeBaseArticle,
    PostIncidentReview, RawId, ReportId, ReportStatus, ReviewId, ReviewStatus, User, UserId,
};
use incidentdb_storage::EntityStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Arguments of `create_incident_report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateIncidentReport {
    pub incident_id: RawId,
    pub report_type: String,
    pub generated_by_user: RawId,
    /// Default: `completed`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Mutable report fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncidentReportPatch {
    pub report_type: Option<String>,
    pub generated_by_user: Option<RawId>,
    pub status: Option<String>,
}

/// Arguments of `update_incident_report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateIncidentReport {
    pub report_id: RawId,
    #[serde(default)]
    pub change_set: IncidentReportPatch,
}

/// Filters of `discover_incident_reports`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IncidentReportFilter {
    pub report_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub report_type: Option<String>,
    pub status: Option<String>,
}

/// Generate a report for an incident. `generated_at` is the invocation time.
pub fn create_incident_report(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateIncidentReport,
) -> IncidentResult<ReportId> {
    let incident_id = require::<Incident>(store, &req.incident_id)?;
    let generated_by_user = require::<User>(store, &req.generated_by_user)?;
    let report_type = parse_enum("report_type", &req.report_type)?;
    let status =
        parse_opt_enum("status", req.status.as_deref())?.unwrap_or(ReportStatus::Completed);

    let record = IncidentReport {
        report_id: store.table::<IncidentReport>().next_id()?,
        incident_id,
        report_type,
        generated_by_user,
        status,
        generated_at: ctx.now.clone(),
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update an incident report.
pub fn update_incident_report(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateIncidentReport,
) -> IncidentResult<IncidentReport> {
    let mut record: IncidentReport = load_target(store, &req.report_id)?;
    let patch = req.change_set;
    apply_enum("report_type", &mut record.report_type, patch.report_type)?;
    apply_ref::<User>(store, &mut record.generated_by_user, patch.generated_by_user)?;
    apply_enum("status", &mut record.status, patch.status)?;
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List reports matching every supplied filter.
pub fn discover_incident_reports(
    store: &EntityStore,
    filter: &IncidentReportFilter,
) -> Vec<IncidentReport> {
    listing(store, |r: &IncidentReport| {
        id_is(&filter.report_id, r.report_id)
            && id_is(&filter.incident_id, r.incident_id)
            && vocab_is(&filter.report_type, r.report_type)
            && vocab_is(&filter.status, r.status)
    })
}

/// Arguments of `create_kb_article`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateKbArticle {
    pub title: String,
    pub article_type: String,
    pub category: String,
    pub created_by_user: RawId,
    #[serde(default)]
    pub incident_id: Option<RawId>,
    #[serde(default)]
    pub reviewer_user: Option<RawId>,
    /// Default: `draft`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Mutable article fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KbArticlePatch {
    pub title: Option<String>,
    pub article_type: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub incident_id: Option<Option<RawId>>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub reviewer_user: Option<Option<RawId>>,
    pub status: Option<String>,
}

/// Arguments of `update_kb_article`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateKbArticle {
    pub article_id: RawId,
    #[serde(default)]
    pub change_set: KbArticlePatch,
}

/// Filters of `discover_kb_articles`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KbArticleFilter {
    pub article_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub title: Option<String>,
    pub article_type: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

/// Articles under review or published normally name a reviewer. Not enforced.
fn note_missing_reviewer(status: ArticleStatus, reviewer: Option<UserId>) {
    if reviewer.is_none()
        && matches!(status, ArticleStatus::UnderReview | ArticleStatus::Published)
    {
        debug!(target: "incidentdb::ops", status = %status, "Article has no reviewer");
    }
}

/// Write a knowledge base article.
pub fn create_kb_article(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreateKbArticle,
) -> IncidentResult<ArticleId> {
    require_text("title", &req.title)?;
    let article_type = parse_enum("article_type", &req.article_type)?;
    let category = parse_enum("category", &req.category)?;
    let status = parse_opt_enum("status", req.status.as_deref())?.unwrap_or(ArticleStatus::Draft);
    let created_by_user = require::<User>(store, &req.created_by_user)?;
    let incident_id = require_opt::<Incident>(store, req.incident_id.as_ref())?;
    let reviewer_user = require_opt::<User>(store, req.reviewer_user.as_ref())?;
    note_missing_reviewer(status, reviewer_user);

    let record = KnowledgeBaseArticle {
        article_id: store.table::<KnowledgeBaseArticle>().next_id()?,
        incident_id,
        title: req.title,
        article_type,
        category,
        created_by_user,
        reviewer_user,
        status,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update a knowledge base article.
pub fn update_kb_article(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdateKbArticle,
) -> IncidentResult<KnowledgeBaseArticle> {
    let mut record: KnowledgeBaseArticle = load_target(store, &req.article_id)?;
    let patch = req.change_set;
    apply_text("title", &mut record.title, patch.title)?;
    apply_enum("article_type", &mut record.article_type, patch.article_type)?;
    apply_enum("category", &mut record.category, patch.category)?;
    apply_opt_ref::<Incident>(store, &mut record.incident_id, patch.incident_id)?;
    apply_opt_ref::<User>(store, &mut record.reviewer_user, patch.reviewer_user)?;
    apply_enum("status", &mut record.status, patch.status)?;
    note_missing_reviewer(record.status, record.reviewer_user);
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List articles matching every supplied filter.
pub fn discover_kb_articles(
    store: &EntityStore,
    filter: &KbArticleFilter,
) -> Vec<KnowledgeBaseArticle> {
    listing(store, |a: &KnowledgeBaseArticle| {
        id_is(&filter.article_id, a.article_id)
            && opt_id_is(&filter.incident_id, a.incident_id)
            && contains_ci(&filter.title, &a.title)
            && vocab_is(&filter.article_type, a.article_type)
            && vocab_is(&filter.category, a.category)
            && vocab_is(&filter.status, a.status)
    })
}

/// Arguments of `create_post_incident_review`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostIncidentReview {
    pub incident_id: RawId,
    pub facilitator_user: RawId,
    pub scheduled_date: String,
    pub overall_rating: String,
    /// Default: `scheduled`.
    #[serde(default)]
    pub status: Option<String>,
    /// Only with status `completed`.
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// Mutable review fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostIncidentReviewPatch {
    pub facilitator_user: Option<RawId>,
    pub scheduled_date: Option<String>,
    pub overall_rating: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Option<String>>,
}

/// Arguments of `update_post_incident_review`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostIncidentReview {
    pub review_id: RawId,
    #[serde(default)]
    pub change_set: PostIncidentReviewPatch,
}

/// Filters of `discover_post_incident_reviews`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostIncidentReviewFilter {
    pub review_id: Option<RawId>,
    pub incident_id: Option<RawId>,
    pub status: Option<String>,
}

/// Schedule a post-incident review.
pub fn create_post_incident_review(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: CreatePostIncidentReview,
) -> IncidentResult<ReviewId> {
    let incident_id = require::<Incident>(store, &req.incident_id)?;
    let facilitator_user = require::<User>(store, &req.facilitator_user)?;
    require_text("scheduled_date", &req.scheduled_date)?;
    let overall_rating = parse_enum("overall_rating", &req.overall_rating)?;
    let status =
        parse_opt_enum("status", req.status.as_deref())?.unwrap_or(ReviewStatus::Scheduled);
    gate("completed_at", req.completed_at.is_some(), status, REVIEW_DONE)?;

    let record = PostIncidentReview {
        review_id: store.table::<PostIncidentReview>().next_id()?,
        incident_id,
        facilitator_user,
        scheduled_date: req.scheduled_date,
        overall_rating,
        status,
        completed_at: req.completed_at,
        created_at: ctx.now.clone(),
        updated_at: ctx.now.clone(),
    };
    Ok(commit(store, record))
}

/// Update a post-incident review.
pub fn update_post_incident_review(
    store: &mut EntityStore,
    ctx: &OpContext,
    req: UpdatePostIncidentReview,
) -> IncidentResult<PostIncidentReview> {
    let mut record: PostIncidentReview = load_target(store, &req.review_id)?;
    let patch = req.change_set;
    let completing = sets(&patch.completed_at);

    apply_ref::<User>(store, &mut record.facilitator_user, patch.facilitator_user)?;
    apply_text("scheduled_date", &mut record.scheduled_date, patch.scheduled_date)?;
    apply_enum("overall_rating", &mut record.overall_rating, patch.overall_rating)?;
    apply_enum("status", &mut record.status, patch.status)?;
    gate("completed_at", completing, record.status, REVIEW_DONE)?;
    apply(&mut record.completed_at, patch.completed_at);
    record.updated_at = ctx.now.clone();
    Ok(commit_update(store, record))
}

/// List reviews matching every supplied filter.
pub fn discover_post_incident_reviews(
    store: &EntityStore,
    filter: &PostIncidentReviewFilter,
) -> Vec<PostIncidentReview> {
    listing(store, |r: &PostIncidentReview| {
        id_is(&filter.review_id, r.review_id)
            && id_is(&filter.incident_id, r.incident_id)
            && vocab_is(&filter.status, r.status)
    })
}
