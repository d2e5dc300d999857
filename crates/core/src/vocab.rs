//! Closed vocabularies
//!
//! Every status, type, level and category field in the domain is governed by
//! exactly one enum defined here. Values travel as their literal strings
//! (`"in_progress"`, `"P1"`); the declaration order below is the order in
//! which allowed values are listed in error messages.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string is not a member of a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue {
    /// The rejected input
    pub value: String,
    /// Every accepted value, in declaration order
    pub allowed: &'static [&'static str],
}

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not one of [{}]",
            self.value,
            self.allowed.join(", ")
        )
    }
}

impl std::error::Error for UnknownValue {}

/// A closed set of string values.
pub trait Vocabulary:
    Copy + Eq + fmt::Debug + fmt::Display + FromStr<Err = UnknownValue> + 'static
{
    /// Every value as text, in declaration order.
    const VALUES: &'static [&'static str];

    /// The literal text of this value.
    fn as_str(&self) -> &'static str;
}

macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl Vocabulary for $name {
            const VALUES: &'static [&'static str] = &[$($text),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownValue {
                        value: s.to_string(),
                        allowed: <$name as Vocabulary>::VALUES,
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

// ============================================================================
// Parties and catalog
// ============================================================================

vocabulary!(
    /// Status of a client or vendor.
    PartyStatus {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
);

vocabulary!(
    /// Size class of a client organisation.
    ClientType {
        Enterprise => "enterprise",
        MidMarket => "mid_market",
        SmallBusiness => "small_business",
        Startup => "startup",
    }
);

vocabulary!(
    /// Kind of service a vendor provides.
    VendorType {
        TechnologyProvider => "technology_provider",
        InfrastructureProvider => "infrastructure_provider",
        SecurityProvider => "security_provider",
        ConsultingServices => "consulting_services",
        MaintenanceServices => "maintenance_services",
        CloudProvider => "cloud_provider",
        PaymentProcessor => "payment_processor",
    }
);

vocabulary!(
    /// Kind of product offered to clients.
    ProductType {
        Application => "application",
        Database => "database",
        NetworkService => "network_service",
        SecurityService => "security_service",
        MonitoringTool => "monitoring_tool",
        InfrastructureService => "infrastructure_service",
    }
);

vocabulary!(
    /// Support status of a product.
    ProductStatus {
        Active => "active",
        Deprecated => "deprecated",
        Maintenance => "maintenance",
        EndOfLife => "end_of_life",
    }
);

vocabulary!(
    /// Kind of infrastructure component.
    ComponentType {
        Server => "server",
        Database => "database",
        NetworkDevice => "network_device",
        LoadBalancer => "load_balancer",
        Firewall => "firewall",
        Storage => "storage",
        ApplicationServer => "application_server",
    }
);

vocabulary!(
    /// Deployment environment of a component.
    Environment {
        Production => "production",
        Staging => "staging",
        Development => "development",
        Testing => "testing",
    }
);

vocabulary!(
    /// Health of a component.
    OperationalStatus {
        Operational => "operational",
        Degraded => "degraded",
        Offline => "offline",
        Maintenance => "maintenance",
    }
);

// ============================================================================
// People and commercial terms
// ============================================================================

vocabulary!(
    /// Role of a user. Only `client_contact` and `vendor_contact` may be
    /// bound to a client or vendor respectively.
    UserRole {
        SystemAdministrator => "system_administrator",
        IncidentManager => "incident_manager",
        TechnicalSupport => "technical_support",
        AccountManager => "account_manager",
        Executive => "executive",
        ClientContact => "client_contact",
        VendorContact => "vendor_contact",
    }
);

vocabulary!(
    /// Employment status of a user.
    UserStatus {
        Active => "active",
        Inactive => "inactive",
        OnLeave => "on_leave",
    }
);

vocabulary!(
    /// Commercial shape of a subscription.
    SubscriptionType {
        Trial => "trial",
        LimitedService => "limited_service",
        FullService => "full_service",
        Custom => "custom",
    }
);

vocabulary!(
    /// Service tier attached to a subscription.
    SlaTier {
        Basic => "basic",
        Standard => "standard",
        Premium => "premium",
    }
);

vocabulary!(
    /// Status of a subscription.
    SubscriptionStatus {
        Active => "active",
        Inactive => "inactive",
        Cancelled => "cancelled",
        Expired => "expired",
    }
);

vocabulary!(
    /// Incident severity, also the severity tier an SLA covers.
    Severity {
        P1 => "P1",
        P2 => "P2",
        P3 => "P3",
        P4 => "P4",
    }
);

vocabulary!(
    /// Impact or urgency of an incident.
    Level {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
);

// ============================================================================
// Incident family
// ============================================================================

vocabulary!(
    /// Category of an incident.
    IncidentCategory {
        ServiceOutage => "service_outage",
        PerformanceDegradation => "performance_degradation",
        SecurityIncident => "security_incident",
        DataLoss => "data_loss",
        ConfigurationError => "configuration_error",
        HardwareFailure => "hardware_failure",
    }
);

vocabulary!(
    /// Status of an incident.
    IncidentStatus {
        Open => "open",
        Investigating => "investigating",
        InProgress => "in_progress",
        Resolved => "resolved",
        Closed => "closed",
    }
);

vocabulary!(
    /// Status of a problem ticket.
    ProblemStatus {
        Open => "open",
        Investigating => "investigating",
        InProgress => "in_progress",
        Resolved => "resolved",
        Closed => "closed",
    }
);

vocabulary!(
    /// Priority of a problem ticket.
    ProblemPriority {
        Critical => "critical",
        High => "high",
        Normal => "normal",
        Low => "low",
    }
);

vocabulary!(
    /// Kind of change request.
    ChangeType {
        Normal => "normal",
        Standard => "standard",
        Upgrade => "upgrade",
        Emergency => "emergency",
    }
);

vocabulary!(
    /// Risk of a change request.
    RiskLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);

vocabulary!(
    /// Status of a change request.
    ChangeStatus {
        Requested => "requested",
        InProgress => "in_progress",
        Scheduled => "scheduled",
        RolledBack => "rolled_back",
        Completed => "completed",
        Failed => "failed",
        Approved => "approved",
    }
);

vocabulary!(
    /// Status of a rollback request.
    RollbackStatus {
        Requested => "requested",
        InProgress => "in_progress",
        Failed => "failed",
        Approved => "approved",
    }
);

vocabulary!(
    /// Kind of work in a work order.
    WorkType {
        HardwareReplacement => "hardware_replacement",
        SoftwareInstallation => "software_installation",
        ConfigurationUpdate => "configuration_update",
        Maintenance => "maintenance",
        SiteVisit => "site_visit",
    }
);

vocabulary!(
    /// Priority of a work order.
    WorkOrderPriority {
        Urgent => "urgent",
        High => "high",
        Normal => "normal",
        Low => "low",
    }
);

vocabulary!(
    /// Status of a work order.
    WorkOrderStatus {
        Created => "created",
        Assigned => "assigned",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
);

vocabulary!(
    /// Level an incident (or a conversation) is escalated to.
    EscalationLevel {
        Management => "management",
        Technical => "technical",
        Executive => "executive",
        Vendor => "vendor",
    }
);

vocabulary!(
    /// Status of an escalation.
    EscalationStatus {
        Active => "active",
        Resolved => "resolved",
        Cancelled => "cancelled",
    }
);

vocabulary!(
    /// Purpose of a communication.
    CommunicationType {
        StatusUpdate => "status_update",
        EscalationNotice => "escalation_notice",
        ResolutionNotice => "resolution_notice",
        WorkaroundNotice => "workaround_notice",
    }
);

vocabulary!(
    /// Audience of a communication.
    RecipientType {
        ClientContacts => "client_contacts",
        ExecutiveTeam => "executive_team",
        TechnicalTeam => "technical_team",
        AllStakeholders => "all_stakeholders",
    }
);

vocabulary!(
    /// Channel a communication is delivered through.
    DeliveryMethod {
        Email => "email",
        Sms => "sms",
        Phone => "phone",
        Chat => "chat",
        DashboardNotification => "dashboard_notification",
    }
);

vocabulary!(
    /// Delivery state of a communication.
    DeliveryStatus {
        Pending => "pending",
        Sent => "sent",
        Delivered => "delivered",
        Failed => "failed",
    }
);

vocabulary!(
    /// How well a workaround mitigates an incident.
    Effectiveness {
        FullMitigation => "full_mitigation",
        PartialMitigation => "partial_mitigation",
        MinimalImpact => "minimal_impact",
    }
);

vocabulary!(
    /// Status of a workaround.
    WorkaroundStatus {
        Active => "active",
        Inactive => "inactive",
        Replaced => "replaced",
    }
);

vocabulary!(
    /// Technique used for a root cause analysis.
    AnalysisMethod {
        FiveWhys => "five_whys",
        FishboneDiagram => "fishbone_diagram",
        FaultTreeAnalysis => "fault_tree_analysis",
        TimelineAnalysis => "timeline_analysis",
    }
);

vocabulary!(
    /// Status of a root cause analysis.
    AnalysisStatus {
        InProgress => "in_progress",
        Completed => "completed",
        Reviewed => "reviewed",
    }
);

vocabulary!(
    /// What a performance metric measures.
    MetricType {
        ResponseTime => "response_time",
        ResolutionTime => "resolution_time",
        DetectionTime => "detection_time",
        EscalationTime => "escalation_time",
    }
);

// ============================================================================
// Reporting and knowledge
// ============================================================================

vocabulary!(
    /// Kind of incident report.
    ReportType {
        ExecutiveSummary => "executive_summary",
        ComplianceReport => "compliance_report",
        TechnicalDetails => "technical_details",
        BusinessImpact => "business_impact",
        PostMortem => "post_mortem",
    }
);

vocabulary!(
    /// Status of an incident report.
    ReportStatus {
        Completed => "completed",
        Draft => "draft",
        Published => "published",
    }
);

vocabulary!(
    /// Kind of knowledge base article.
    ArticleType {
        Troubleshooting => "troubleshooting",
        ResolutionProcedure => "resolution_procedure",
        PreventionGuide => "prevention_guide",
        Faq => "faq",
    }
);

vocabulary!(
    /// Subject area of a knowledge base article.
    ArticleCategory {
        Technical => "technical",
        Process => "process",
        Communication => "communication",
        Escalation => "escalation",
    }
);

vocabulary!(
    /// Publication status of a knowledge base article.
    ArticleStatus {
        Draft => "draft",
        UnderReview => "under_review",
        Archived => "archived",
        Published => "published",
    }
);

vocabulary!(
    /// Overall rating given in a post-incident review.
    ReviewRating {
        Excellent => "excellent",
        Good => "good",
        Satisfactory => "satisfactory",
        NeedsImprovement => "needs_improvement",
        Poor => "poor",
    }
);

vocabulary!(
    /// Status of a post-incident review.
    ReviewStatus {
        Scheduled => "scheduled",
        Completed => "completed",
        Cancelled => "cancelled",
    }
);

// ============================================================================
// Journals
// ============================================================================

vocabulary!(
    /// Kind of change recorded in the incident journal.
    UpdateType {
        StatusChange => "status_change",
        AssignmentChange => "assignment_change",
        SeverityChange => "severity_change",
        DescriptionUpdate => "description_update",
    }
);

vocabulary!(
    /// Action recorded in the audit log.
    AuditAction {
        Create => "create",
        Update => "update",
        Delete => "delete",
        Approve => "approve",
        Escalate => "escalate",
        Resolve => "resolve",
    }
);

vocabulary!(
    /// Kind of entity an audit entry refers to.
    AuditEntityType {
        Client => "client",
        Vendor => "vendor",
        Product => "product",
        User => "user",
        InfrastructureComponent => "infrastructure_component",
        Subscription => "subscription",
        ServiceLevelAgreement => "service_level_agreement",
        Incident => "incident",
        ProblemTicket => "problem_ticket",
        ChangeRequest => "change_request",
        RollbackRequest => "rollback_request",
        WorkOrder => "work_order",
        Escalation => "escalation",
        Communication => "communication",
        Workaround => "workaround",
        RootCauseAnalysis => "root_cause_analysis",
        PerformanceMetric => "performance_metric",
        IncidentReport => "incident_report",
        KnowledgeBaseArticle => "knowledge_base_article",
        PostIncidentReview => "post_incident_review",
        IncidentUpdate => "incident_update",
    }
);
