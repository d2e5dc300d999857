//! Incident reports, knowledge base articles and post-incident reviews

use super::optional_ref;
use crate::entity::{Entity, Reference};
use crate::ids::{ArticleId, IncidentId, ReportId, ReviewId, UserId};
use crate::table::TableName;
use crate::vocab::{
    ArticleCategory, ArticleStatus, ArticleType, ReportStatus, ReportType, ReviewRating,
    ReviewStatus,
};
use serde::{Deserialize, Serialize};

/// A generated report about an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    /// Identifier
    pub report_id: ReportId,
    /// Reported incident
    pub incident_id: IncidentId,
    /// Kind of report
    pub report_type: ReportType,
    /// Author
    pub generated_by_user: UserId,
    /// Status
    pub status: ReportStatus,
    /// Generation time
    pub generated_at: String,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for IncidentReport {
    type Id = ReportId;
    const TABLE: TableName = TableName::IncidentReports;

    fn id(&self) -> ReportId {
        self.report_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("incident_id", TableName::Incidents, self.incident_id),
            Reference::new("generated_by_user", TableName::Users, self.generated_by_user),
        ]
    }
}

/// Reusable knowledge, optionally derived from an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseArticle {
    /// Identifier
    pub article_id: ArticleId,
    /// Source incident
    pub incident_id: Option<IncidentId>,
    /// Title
    pub title: String,
    /// Kind of article
    pub article_type: ArticleType,
    /// Subject area
    pub category: ArticleCategory,
    /// Author
    pub created_by_user: UserId,
    /// Reviewer; conventionally set while under review or published
    pub reviewer_user: Option<UserId>,
    /// Publication status
    pub status: ArticleStatus,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for KnowledgeBaseArticle {
    type Id = ArticleId;
    const TABLE: TableName = TableName::KnowledgeBaseArticles;

    fn id(&self) -> ArticleId {
        self.article_id
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![Reference::new(
            "created_by_user",
            TableName::Users,
            self.created_by_user,
        )];
        optional_ref(&mut refs, "incident_id", TableName::Incidents, self.incident_id);
        optional_ref(&mut refs, "reviewer_user", TableName::Users, self.reviewer_user);
        refs
    }
}

/// A retrospective meeting about an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostIncidentReview {
    /// Identifier
    pub review_id: ReviewId,
    /// Reviewed incident
    pub incident_id: IncidentId,
    /// Facilitator
    pub facilitator_user: UserId,
    /// Planned date
    pub scheduled_date: String,
    /// Overall rating
    pub overall_rating: ReviewRating,
    /// Status
    pub status: ReviewStatus,
    /// Completion time; only set once completed
    pub completed_at: Option<String>,
    /// Creation time
    pub created_at: String,
    /// Last modification time
    #[serde(default)]
    pub updated_at: String,
}

impl Entity for PostIncidentReview {
    type Id = ReviewId;
    const TABLE: TableName = TableName::PostIncidentReviews;

    fn id(&self) -> ReviewId {
        self.review_id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("incident_id", TableName::Incidents, self.incident_id),
            Reference::new("facilitator_user", TableName::Users, self.facilitator_user),
        ]
    }
}
