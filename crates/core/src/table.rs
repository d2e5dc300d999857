//! Table names
//!
//! Discriminates between the entity tables of the store. The name doubles as
//! the file stem of the table in a snapshot directory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entity table.
///
/// Ordering follows declaration order, which is also the order in which the
/// store loads, saves and verifies tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    /// `clients`
    Clients,
    /// `vendors`
    Vendors,
    /// `products`
    Products,
    /// `infrastructure_components`
    InfrastructureComponents,
    /// `users`
    Users,
    /// `subscriptions`
    Subscriptions,
    /// `service_level_agreements`
    ServiceLevelAgreements,
    /// `incidents`
    Incidents,
    /// `problem_tickets`
    ProblemTickets,
    /// `change_requests`
    ChangeRequests,
    /// `rollback_requests`
    RollbackRequests,
    /// `work_orders`
    WorkOrders,
    /// `incident_escalations`
    IncidentEscalations,
    /// `communications`
    Communications,
    /// `workarounds`
    Workarounds,
    /// `root_cause_analysis`
    RootCauseAnalysis,
    /// `performance_metrics`
    PerformanceMetrics,
    /// `incident_reports`
    IncidentReports,
    /// `knowledge_base_articles`
    KnowledgeBaseArticles,
    /// `post_incident_reviews`
    PostIncidentReviews,
    /// `incident_updates`
    IncidentUpdates,
    /// `audit_logs`
    AuditLogs,
    /// `human_transfers`
    HumanTransfers,
}

impl TableName {
    /// Every table, in load order.
    pub const ALL: [TableName; 23] = [
        TableName::Clients,
        TableName::Vendors,
        TableName::Products,
        TableName::InfrastructureComponents,
        TableName::Users,
        TableName::Subscriptions,
        TableName::ServiceLevelAgreements,
        TableName::Incidents,
        TableName::ProblemTickets,
        TableName::ChangeRequests,
        TableName::RollbackRequests,
        TableName::WorkOrders,
        TableName::IncidentEscalations,
        TableName::Communications,
        TableName::Workarounds,
        TableName::RootCauseAnalysis,
        TableName::PerformanceMetrics,
        TableName::IncidentReports,
        TableName::KnowledgeBaseArticles,
        TableName::PostIncidentReviews,
        TableName::IncidentUpdates,
        TableName::AuditLogs,
        TableName::HumanTransfers,
    ];

    /// Table name as stored on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Clients => "clients",
            TableName::Vendors => "vendors",
            TableName::Products => "products",
            TableName::InfrastructureComponents => "infrastructure_components",
            TableName::Users => "users",
            TableName::Subscriptions => "subscriptions",
            TableName::ServiceLevelAgreements => "service_level_agreements",
            TableName::Incidents => "incidents",
            TableName::ProblemTickets => "problem_tickets",
            TableName::ChangeRequests => "change_requests",
            TableName::RollbackRequests => "rollback_requests",
            TableName::WorkOrders => "work_orders",
            TableName::IncidentEscalations => "incident_escalations",
            TableName::Communications => "communications",
            TableName::Workarounds => "workarounds",
            TableName::RootCauseAnalysis => "root_cause_analysis",
            TableName::PerformanceMetrics => "performance_metrics",
            TableName::IncidentReports => "incident_reports",
            TableName::KnowledgeBaseArticles => "knowledge_base_articles",
            TableName::PostIncidentReviews => "post_incident_reviews",
            TableName::IncidentUpdates => "incident_updates",
            TableName::AuditLogs => "audit_logs",
            TableName::HumanTransfers => "human_transfers",
        }
    }

    /// Name of the identifier field of records in this table.
    pub fn id_field(&self) -> &'static str {
        match self {
            TableName::Clients => "client_id",
            TableName::Vendors => "vendor_id",
            TableName::Products => "product_id",
            TableName::InfrastructureComponents => "component_id",
            TableName::Users => "user_id",
            TableName::Subscriptions => "subscription_id",
            TableName::ServiceLevelAgreements => "sla_id",
            TableName::Incidents => "incident_id",
            TableName::ProblemTickets => "problem_id",
            TableName::ChangeRequests => "change_id",
            TableName::RollbackRequests => "rollback_id",
            TableName::WorkOrders => "workorder_id",
            TableName::IncidentEscalations => "escalation_id",
            TableName::Communications => "communication_id",
            TableName::Workarounds => "workaround_id",
            TableName::RootCauseAnalysis => "analysis_id",
            TableName::PerformanceMetrics => "metric_id",
            TableName::IncidentReports => "report_id",
            TableName::KnowledgeBaseArticles => "article_id",
            TableName::PostIncidentReviews => "review_id",
            TableName::IncidentUpdates => "update_id",
            TableName::AuditLogs => "audit_id",
            TableName::HumanTransfers => "transfer_id",
        }
    }

    /// Human-readable name of one record, used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            TableName::Clients => "Client",
            TableName::Vendors => "Vendor",
            TableName::Products => "Product",
            TableName::InfrastructureComponents => "Component",
            TableName::Users => "User",
            TableName::Subscriptions => "Subscription",
            TableName::ServiceLevelAgreements => "SLA",
            TableName::Incidents => "Incident",
            TableName::ProblemTickets => "Problem ticket",
            TableName::ChangeRequests => "Change request",
            TableName::RollbackRequests => "Rollback request",
            TableName::WorkOrders => "Work order",
            TableName::IncidentEscalations => "Escalation",
            TableName::Communications => "Communication",
            TableName::Workarounds => "Workaround",
            TableName::RootCauseAnalysis => "Root cause analysis",
            TableName::PerformanceMetrics => "Performance metric",
            TableName::IncidentReports => "Incident report",
            TableName::KnowledgeBaseArticles => "Knowledge base article",
            TableName::PostIncidentReviews => "Post-incident review",
            TableName::IncidentUpdates => "Incident update",
            TableName::AuditLogs => "Audit log",
            TableName::HumanTransfers => "Human transfer",
        }
    }

    /// Look a table up by its on-disk name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
