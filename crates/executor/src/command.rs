//! Command enum defining every operation the executor can run.
//!
//! Commands are the "instruction set" of IncidentDB. Every operation that
//! can be performed on the store is represented as a variant of [`Command`].
//!
//! Commands are:
//! - **Self-contained**: all arguments are included in the variant
//! - **Serializable**: `{"name": "<operation>", "arguments": {...}}`
//! - **Typed**: every argument set is the engine's request struct, which
//!   rejects unknown fields
//!
//! # Command Categories
//!
//! | Category | Count | Description |
//! |----------|-------|-------------|
//! | Create | 22 | Insert a validated record, return its id |
//! | Update | 19 | Merge a change set into a record, return the record |
//! | Discover | 22 | List records matching every supplied filter |
//! | Transfer | 1 | Hand the interaction over to a human |
//!
//! Performance metrics, incident updates and audit entries have no update
//! operation: they are recorded once.

use incidentdb_engine::ops::{
    analysis, catalog, change, commercial, communication, escalation, incident, journal,
    knowledge, party, problem, user, work_order, workaround,
};
use serde::{Deserialize, Serialize};

macro_rules! commands {
    ($($(#[$doc:meta])* $variant:ident($req:ty) => $name:literal,)+) => {
        /// A command is a self-contained, serializable operation.
        ///
        /// Each variant maps to exactly one engine operation. The executor
        /// dispatches commands to the appropriate handler and returns an
        /// [`Output`](crate::Output).
        ///
        /// # Example
        ///
        /// ```ignore
        /// use incidentdb_executor::Command;
        ///
        /// let cmd: Command = serde_json::from_value(serde_json::json!({
        ///     "name": "discover_incidents",
        ///     "arguments": {"status": "open"}
        /// }))?;
        /// ```
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
        pub enum Command {
            $($(#[$doc])* $variant($req),)+
        }

        impl Command {
            /// Every operation name, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($name,)+];

            /// Operation name this command is invoked by.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Command::$variant(_) => $name,)+
                }
            }
        }
    };
}

commands! {
    // ==================== Clients & Vendors (6) ====================
    /// Returns: `Output::Created` (`client_id`)
    CreateClient(party::CreateClient) => "create_client",
    /// Returns: `Output::Updated`
    UpdateClient(party::UpdateClient) => "update_client",
    /// Returns: `Output::Found`
    DiscoverClients(party::ClientFilter) => "discover_clients",
    /// Returns: `Output::Created` (`vendor_id`)
    CreateVendor(party::CreateVendor) => "create_vendor",
    /// Returns: `Output::Updated`
    UpdateVendor(party::UpdateVendor) => "update_vendor",
    /// Returns: `Output::Found`
    DiscoverVendors(party::VendorFilter) => "discover_vendors",

    // ==================== Catalog (6) ====================
    /// Returns: `Output::Created` (`product_id`)
    CreateProduct(catalog::CreateProduct) => "create_product",
    /// Returns: `Output::Updated`
    UpdateProduct(catalog::UpdateProduct) => "update_product",
    /// Returns: `Output::Found`
    DiscoverProducts(catalog::ProductFilter) => "discover_products",
    /// Returns: `Output::Created` (`component_id`)
    CreateComponent(catalog::CreateComponent) => "create_component",
    /// Returns: `Output::Updated`
    UpdateComponent(catalog::UpdateComponent) => "update_component",
    /// Returns: `Output::Found`
    DiscoverComponents(catalog::ComponentFilter) => "discover_components",

    // ==================== Users (3) ====================
    /// Returns: `Output::Created` (`user_id`)
    CreateUser(user::CreateUser) => "create_user",
    /// Returns: `Output::Updated`
    UpdateUser(user::UpdateUser) => "update_user",
    /// Returns: `Output::Found`
    DiscoverUsers(user::UserFilter) => "discover_users",

    // ==================== Subscriptions & SLAs (6) ====================
    /// Returns: `Output::Created` (`subscription_id`)
    CreateSubscription(commercial::CreateSubscription) => "create_subscription",
    /// Returns: `Output::Updated`
    UpdateSubscription(commercial::UpdateSubscription) => "update_subscription",
    /// Returns: `Output::Found`
    DiscoverSubscriptions(commercial::SubscriptionFilter) => "discover_subscriptions",
    /// Returns: `Output::Created` (`sla_id`)
    CreateSla(commercial::CreateSla) => "create_sla",
    /// Returns: `Output::Updated`
    UpdateSla(commercial::UpdateSla) => "update_sla",
    /// Returns: `Output::Found`
    DiscoverSlas(commercial::SlaFilter) => "discover_slas",

    // ==================== Incidents (3) ====================
    /// Returns: `Output::Created` (`incident_id`)
    CreateIncident(incident::CreateIncident) => "create_incident",
    /// Returns: `Output::Updated`
    UpdateIncident(incident::UpdateIncident) => "update_incident",
    /// Returns: `Output::Found`
    DiscoverIncidents(incident::IncidentFilter) => "discover_incidents",

    // ==================== Problems & Changes (9) ====================
    /// Returns: `Output::Created` (`ticket_id`)
    CreateProblemTicket(problem::CreateProblemTicket) => "create_problem_ticket",
    /// Returns: `Output::Updated`
    UpdateProblemTicket(problem::UpdateProblemTicket) => "update_problem_ticket",
    /// Returns: `Output::Found`
    DiscoverProblemTickets(problem::ProblemTicketFilter) => "discover_problem_tickets",
    /// Returns: `Output::Created` (`change_id`)
    CreateChangeRequest(change::CreateChangeRequest) => "create_change_request",
    /// Returns: `Output::Updated`
    UpdateChangeRequest(change::UpdateChangeRequest) => "update_change_request",
    /// Returns: `Output::Found`
    DiscoverChangeRequests(change::ChangeRequestFilter) => "discover_change_requests",
    /// Returns: `Output::Created` (`rollback_id`)
    CreateRollbackRequest(change::CreateRollbackRequest) => "create_rollback_request",
    /// Returns: `Output::Updated`
    UpdateRollbackRequest(change::UpdateRollbackRequest) => "update_rollback_request",
    /// Returns: `Output::Found`
    DiscoverRollbackRequests(change::RollbackRequestFilter) => "discover_rollback_requests",

    // ==================== Response (15) ====================
    /// Returns: `Output::Created` (`workorder_id`)
    CreateWorkOrder(work_order::CreateWorkOrder) => "create_work_order",
    /// Returns: `Output::Updated`
    UpdateWorkOrder(work_order::UpdateWorkOrder) => "update_work_order",
    /// Returns: `Output::Found`
    DiscoverWorkOrders(work_order::WorkOrderFilter) => "discover_work_orders",
    /// Returns: `Output::Created` (`escalation_id`)
    CreateEscalation(escalation::CreateEscalation) => "create_escalation",
    /// Returns: `Output::Updated`
    UpdateEscalation(escalation::UpdateEscalation) => "update_escalation",
    /// Returns: `Output::Found`
    DiscoverEscalations(escalation::EscalationFilter) => "discover_escalations",
    /// Returns: `Output::Created` (`communication_id`)
    CreateCommunication(communication::CreateCommunication) => "create_communication",
    /// Returns: `Output::Updated`
    UpdateCommunication(communication::UpdateCommunication) => "update_communication",
    /// Returns: `Output::Found`
    DiscoverCommunications(communication::CommunicationFilter) => "discover_communications",
    /// Returns: `Output::Created` (`workaround_id`)
    CreateWorkaround(workaround::CreateWorkaround) => "create_workaround",
    /// Returns: `Output::Updated`
    UpdateWorkaround(workaround::UpdateWorkaround) => "update_workaround",
    /// Returns: `Output::Found`
    DiscoverWorkarounds(workaround::WorkaroundFilter) => "discover_workarounds",
    /// Returns: `Output::Created` (`analysis_id`)
    CreateRootCauseAnalysis(analysis::CreateRootCauseAnalysis) => "create_root_cause_analysis",
    /// Returns: `Output::Updated`
    UpdateRootCauseAnalysis(analysis::UpdateRootCauseAnalysis) => "update_root_cause_analysis",
    /// Returns: `Output::Found`
    DiscoverRootCauseAnalyses(analysis::RootCauseAnalysisFilter) => "discover_root_cause_analyses",

    // ==================== Metrics (2) ====================
    /// Returns: `Output::MetricRecorded`
    CreatePerformanceMetric(analysis::CreatePerformanceMetric) => "create_performance_metric",
    /// Returns: `Output::Found`
    DiscoverPerformanceMetrics(analysis::PerformanceMetricFilter) => "discover_performance_metrics",

    // ==================== Knowledge (9) ====================
    /// Returns: `Output::Created` (`report_id`)
    CreateIncidentReport(knowledge::CreateIncidentReport) => "create_incident_report",
    /// Returns: `Output::Updated`
    UpdateIncidentReport(knowledge::UpdateIncidentReport) => "update_incident_report",
    /// Returns: `Output::Found`
    DiscoverIncidentReports(knowledge::IncidentReportFilter) => "discover_incident_reports",
    /// Returns: `Output::Created` (`article_id`)
    CreateKbArticle(knowledge::CreateKbArticle) => "create_kb_article",
    /// Returns: `Output::Updated`
    UpdateKbArticle(knowledge::UpdateKbArticle) => "update_kb_article",
    /// Returns: `Output::Found`
    DiscoverKbArticles(knowledge::KbArticleFilter) => "discover_kb_articles",
    /// Returns: `Output::Created` (`review_id`)
    CreatePostIncidentReview(knowledge::CreatePostIncidentReview) => "create_post_incident_review",
    /// Returns: `Output::Updated`
    UpdatePostIncidentReview(knowledge::UpdatePostIncidentReview) => "update_post_incident_review",
    /// Returns: `Output::Found`
    DiscoverPostIncidentReviews(knowledge::PostIncidentReviewFilter) => "discover_post_incident_reviews",

    // ==================== Journals (5) ====================
    /// Returns: `Output::Created` (`update_id`)
    CreateIncidentUpdate(journal::CreateIncidentUpdate) => "create_incident_update",
    /// Returns: `Output::Found`
    DiscoverIncidentUpdates(journal::IncidentUpdateFilter) => "discover_incident_updates",
    /// Returns: `Output::Created` (`audit_id`)
    CreateAuditLog(journal::CreateAuditLog) => "create_audit_log",
    /// Returns: `Output::Found`
    DiscoverAuditLogs(journal::AuditLogFilter) => "discover_audit_logs",
    /// Returns: `Output::Transferred`
    TransferToHuman(journal::TransferToHuman) => "transfer_to_human",
}

impl Command {
    /// Whether the command only reads the store.
    pub fn is_read_only(&self) -> bool {
        self.name().starts_with("discover_")
    }

    /// Whether the command adds a record (`create_*` and `transfer_to_human`).
    pub fn is_create(&self) -> bool {
        let name = self.name();
        name.starts_with("create_") || name == "transfer_to_human"
    }

    /// Whether the command modifies an existing record.
    pub fn is_update(&self) -> bool {
        self.name().starts_with("update_")
    }
}
