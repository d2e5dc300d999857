//! Operation catalogue
//!
//! Each operation publishes a descriptor: its name, a description, and a
//! JSON parameter schema (`{"type": "object", "properties": {...},
//! "required": [...]}`). This is the whole contract an external dispatcher
//! sees. Enumerated parameters list their allowed values, taken from the
//! vocabularies themselves.
//!
//! The catalogue is built once, on first use.

use incidentdb_core::*;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Published contract of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDescriptor {
    /// Operation name, as used in `Command` and `invoke`
    pub name: &'static str,
    /// What the operation does
    pub description: &'static str,
    /// JSON schema of the arguments object
    pub parameters: Value,
}

impl OperationDescriptor {
    /// Names listed as required in the parameter schema.
    pub fn required(&self) -> Vec<&str> {
        self.parameters["required"]
            .as_array()
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Every parameter name in the schema.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters["properties"]
            .as_object()
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

static CATALOGUE: Lazy<Vec<OperationDescriptor>> = Lazy::new(build);

/// Every operation descriptor, in `Command` declaration order.
pub fn descriptors() -> &'static [OperationDescriptor] {
    &CATALOGUE
}

/// Look up one descriptor by operation name.
pub fn descriptor(name: &str) -> Option<&'static OperationDescriptor> {
    CATALOGUE.iter().find(|d| d.name == name)
}

// =============================================================================
// Schema builders
// =============================================================================

struct Param {
    name: &'static str,
    kind: &'static str,
    description: String,
    required: bool,
}

impl Param {
    fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

fn param(name: &'static str, kind: &'static str, description: impl Into<String>) -> Param {
    Param {
        name,
        kind,
        description: description.into(),
        required: true,
    }
}

fn text(name: &'static str, description: &str) -> Param {
    param(name, "string", description)
}

fn id(name: &'static str, what: &str) -> Param {
    param(name, "string", format!("ID of the {}", what))
}

fn number(name: &'static str, description: &str) -> Param {
    param(name, "number", description)
}

fn integer(name: &'static str, description: &str) -> Param {
    param(name, "integer", description)
}

fn choice<V: Vocabulary>(name: &'static str, description: &str) -> Param {
    param(
        name,
        "string",
        format!("{} ({})", description, V::VALUES.join(", ")),
    )
}

fn defaulted<V: Vocabulary>(name: &'static str, description: &str, default: V) -> Param {
    param(
        name,
        "string",
        format!(
            "{} ({}), defaults to '{}'",
            description,
            V::VALUES.join(", "),
            default
        ),
    )
    .optional()
}

fn change_set(fields: &[&str]) -> Param {
    param(
        "change_set",
        "object",
        format!(
            "Fields to change; only supplied fields are validated ({})",
            fields.join(", ")
        ),
    )
    .optional()
}

fn op(name: &'static str, description: &'static str, params: Vec<Param>) -> OperationDescriptor {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for p in params {
        if p.required {
            required.push(Value::String(p.name.to_string()));
        }
        properties.insert(
            p.name.to_string(),
            json!({"type": p.kind, "description": p.description}),
        );
    }
    OperationDescriptor {
        name,
        description,
        parameters: json!({
            "type": "object",
            "properties": properties,
            "required": required,
        }),
    }
}

/// Filters of a discover operation are all optional.
fn discover(name: &'static str, description: &'static str, filters: Vec<Param>) -> OperationDescriptor {
    op(name, description, filters.into_iter().map(Param::optional).collect())
}

// =============================================================================
// Catalogue
// =============================================================================

fn build() -> Vec<OperationDescriptor> {
    vec![
        // Clients & vendors
        op(
            "create_client",
            "Create a new client",
            vec![
                text("client_name", "Name of the client"),
                text("registration_number", "Unique registration number"),
                text("contact_email", "Unique contact email"),
                choice::<ClientType>("client_type", "Type of client"),
                text("contact_phone", "Unique contact phone").optional(),
                text("industry", "Industry").optional(),
                text("country", "Country").optional(),
                defaulted("status", "Client status", PartyStatus::Active),
            ],
        ),
        op(
            "update_client",
            "Update an existing client",
            vec![
                id("client_id", "client to update"),
                change_set(&[
                    "client_name",
                    "registration_number",
                    "contact_email",
                    "contact_phone",
                    "client_type",
                    "industry",
                    "country",
                    "status",
                ]),
                text("registration_number", "New registration number").optional(),
                text("contact_email", "New contact email").optional(),
                choice::<PartyStatus>("status", "New status").optional(),
            ],
        ),
        discover(
            "discover_clients",
            "Find clients matching every supplied filter",
            vec![
                id("client_id", "client"),
                text("client_name", "Substring of the client name, case-insensitive"),
                text("registration_number", "Registration number"),
                text("contact_email", "Contact email, case-insensitive"),
                choice::<ClientType>("client_type", "Type of client"),
                choice::<PartyStatus>("status", "Client status"),
            ],
        ),
        op(
            "create_vendor",
            "Create a new vendor",
            vec![
                text("vendor_name", "Unique vendor name"),
                text("vendor_email", "Unique contact email"),
                text("vendor_phone", "Unique contact phone"),
                choice::<VendorType>("vendor_type", "Type of vendor"),
                defaulted("status", "Vendor status", PartyStatus::Active),
            ],
        ),
        op(
            "update_vendor",
            "Update an existing vendor",
            vec![
                id("vendor_id", "vendor to update"),
                change_set(&["vendor_name", "contact_email", "contact_phone", "vendor_type", "status"]),
            ],
        ),
        discover(
            "discover_vendors",
            "Find vendors matching every supplied filter",
            vec![
                id("vendor_id", "vendor"),
                text("vendor_name", "Substring of the vendor name, case-insensitive"),
                text("vendor_email", "Contact email, case-insensitive"),
                text("vendor_phone", "Contact phone"),
                choice::<VendorType>("vendor_type", "Type of vendor"),
                choice::<PartyStatus>("status", "Vendor status"),
            ],
        ),
        // Catalog
        op(
            "create_product",
            "Add a product to the catalog",
            vec![
                text("product_name", "Unique product name"),
                choice::<ProductType>("product_type", "Type of product"),
                text("version", "Product version").optional(),
                id("support_vendor_id", "vendor supporting the product").optional(),
                defaulted("status", "Product status", ProductStatus::Active),
            ],
        ),
        op(
            "update_product",
            "Update an existing product",
            vec![
                id("product_id", "product to update"),
                change_set(&["product_name", "product_type", "version", "support_vendor_id", "status"]),
            ],
        ),
        discover(
            "discover_products",
            "Find products matching every supplied filter",
            vec![
                id("product_id", "product"),
                text("product_name", "Substring of the product name, case-insensitive"),
                choice::<ProductType>("product_type", "Type of product"),
                id("support_vendor_id", "supporting vendor"),
                choice::<ProductStatus>("status", "Product status"),
            ],
        ),
        op(
            "create_component",
            "Register an infrastructure component",
            vec![
                text("component_name", "Unique component name"),
                choice::<ComponentType>("component_type", "Type of component"),
                choice::<Environment>("environment", "Deployment environment"),
                id("product_id", "product the component serves").optional(),
                text("location", "Physical or logical location").optional(),
                integer("port_number", "Service port").optional(),
                defaulted(
                    "operational_status",
                    "Operational status",
                    OperationalStatus::Operational,
                ),
            ],
        ),
        op(
            "update_component",
            "Update an infrastructure component",
            vec![
                id("component_id", "component to update"),
                change_set(&[
                    "component_name",
                    "component_type",
                    "environment",
                    "product_id",
                    "location",
                    "port_number",
                    "operational_status",
                ]),
            ],
        ),
        discover(
            "discover_components",
            "Find infrastructure components matching every supplied filter",
            vec![
                id("component_id", "component"),
                text("component_name", "Substring of the component name, case-insensitive"),
                choice::<ComponentType>("component_type", "Type of component"),
                id("product_id", "product"),
                choice::<Environment>("environment", "Deployment environment"),
                choice::<OperationalStatus>("operational_status", "Operational status"),
            ],
        ),
        // Users
        op(
            "create_user",
            "Create a new user",
            vec![
                text("name", "Full name"),
                text("email", "Unique email address"),
                choice::<UserRole>("role", "Role"),
                text("department", "Department").optional(),
                id("client_id", "client; only for role client_contact").optional(),
                id("vendor_id", "vendor; only for role vendor_contact").optional(),
                text("timezone", "Timezone, defaults to 'UTC'").optional(),
                defaulted("status", "User status", UserStatus::Active),
            ],
        ),
        op(
            "update_user",
            "Update an existing user",
            vec![
                id("user_id", "user to update"),
                change_set(&[
                    "name",
                    "email",
                    "role",
                    "department",
                    "client_id",
                    "vendor_id",
                    "timezone",
                    "status",
                ]),
                choice::<UserRole>("role", "New role").optional(),
                choice::<UserStatus>("status", "New status").optional(),
            ],
        ),
        discover(
            "discover_users",
            "Find users matching every supplied filter",
            vec![
                id("user_id", "user"),
                text("name", "Substring of the name, case-insensitive"),
                text("email", "Email address, case-insensitive"),
                choice::<UserRole>("role", "Role"),
                id("client_id", "client"),
                id("vendor_id", "vendor"),
                choice::<UserStatus>("status", "User status"),
            ],
        ),
        // Subscriptions & SLAs
        op(
            "create_subscription",
            "Subscribe a client to a product",
            vec![
                id("client_id", "client"),
                id("product_id", "product"),
                choice::<SubscriptionType>("subscription_type", "Type of subscription"),
                choice::<SlaTier>("sla_tier", "SLA tier"),
                text("start_date", "Start date"),
                text("end_date", "End date").optional(),
                integer("rto_hours", "Recovery time objective in hours").optional(),
                defaulted("status", "Subscription status", SubscriptionStatus::Active),
            ],
        ),
        op(
            "update_subscription",
            "Update an existing subscription",
            vec![
                id("subscription_id", "subscription to update"),
                change_set(&[
                    "client_id",
                    "product_id",
                    "subscription_type",
                    "sla_tier",
                    "rto_hours",
                    "start_date",
                    "end_date",
                    "status",
                ]),
            ],
        ),
        discover(
            "discover_subscriptions",
            "Find subscriptions matching every supplied filter",
            vec![
                id("subscription_id", "subscription"),
                id("client_id", "client"),
                id("product_id", "product"),
                choice::<SlaTier>("sla_tier", "SLA tier"),
                choice::<SubscriptionStatus>("status", "Subscription status"),
            ],
        ),
        op(
            "create_sla",
            "Attach a service level agreement to a subscription",
            vec![
                id("subscription_id", "subscription"),
                choice::<Severity>("severity_level", "Severity the SLA covers"),
                integer("response_time_minutes", "Response time target in minutes"),
                integer("resolution_time_hours", "Resolution time target in hours"),
                number("availability_percentage", "Availability target, 0 to 100").optional(),
            ],
        ),
        op(
            "update_sla",
            "Update a service level agreement",
            vec![
                id("sla_id", "SLA to update"),
                change_set(&[
                    "subscription_id",
                    "severity_level",
                    "response_time_minutes",
                    "resolution_time_hours",
                    "availability_percentage",
                ]),
            ],
        ),
        discover(
            "discover_slas",
            "Find service level agreements matching every supplied filter",
            vec![
                id("sla_id", "SLA"),
                id("subscription_id", "subscription"),
                choice::<Severity>("severity_level", "Severity"),
            ],
        ),
        // Incidents
        op(
            "create_incident",
            "Open a new incident",
            vec![
                text("title", "Short title"),
                choice::<IncidentCategory>("category", "Incident category"),
                choice::<Severity>("severity", "Severity"),
                choice::<Level>("impact_level", "Impact"),
                choice::<Level>("urgency_level", "Urgency"),
                id("client_id", "affected client"),
                id("component_id", "affected component"),
                id("reporter_user_id", "reporting user"),
                text("detection_timestamp", "When the incident was detected"),
                defaulted("status", "Incident status", IncidentStatus::Open),
                id("assigned_to_user_id", "assigned user").optional(),
                text("resolution_timestamp", "Resolution time; only with status resolved or closed")
                    .optional(),
            ],
        ),
        op(
            "update_incident",
            "Update an existing incident",
            vec![
                id("incident_id", "incident to update"),
                change_set(&[
                    "title",
                    "category",
                    "severity",
                    "impact_level",
                    "urgency_level",
                    "status",
                    "client_id",
                    "component_id",
                    "assigned_to_user_id",
                    "detection_timestamp",
                    "resolution_timestamp",
                ]),
                choice::<IncidentStatus>("status", "New status").optional(),
                id("assigned_to_user_id", "user to assign").optional(),
                text("resolution_timestamp", "Resolution time; only with status resolved or closed")
                    .optional(),
            ],
        ),
        discover(
            "discover_incidents",
            "Find incidents matching every supplied filter",
            vec![
                id("incident_id", "incident"),
                id("client_id", "client"),
                id("component_id", "component"),
                choice::<Severity>("severity", "Severity"),
                choice::<IncidentStatus>("status", "Incident status"),
                id("assigned_to_user_id", "assigned user"),
                id("reporter_user_id", "reporting user"),
                text("title", "Substring of the title, case-insensitive"),
            ],
        ),
        // Problems & changes
        op(
            "create_problem_ticket",
            "Open a problem ticket for an incident",
            vec![
                id("incident_id", "incident"),
                text("title", "Short title"),
                id("issued_by_user", "user opening the ticket"),
                defaulted("status", "Ticket status", ProblemStatus::Open),
                choice::<ProblemPriority>("priority", "Priority").optional(),
                id("assigned_to_user", "assigned user").optional(),
            ],
        ),
        op(
            "update_problem_ticket",
            "Update a problem ticket",
            vec![
                id("problem_id", "ticket to update"),
                change_set(&["incident_id", "title", "status", "priority", "assigned_to_user"]),
                choice::<ProblemStatus>("status", "New status").optional(),
            ],
        ),
        discover(
            "discover_problem_tickets",
            "Find problem tickets matching every supplied filter",
            vec![
                id("problem_id", "ticket"),
                id("incident_id", "incident"),
                choice::<ProblemStatus>("status", "Ticket status"),
                choice::<ProblemPriority>("priority", "Priority"),
                id("issued_by_user", "issuing user"),
            ],
        ),
        op(
            "create_change_request",
            "Submit a change request",
            vec![
                text("title", "Short title"),
                choice::<ChangeType>("change_type", "Type of change"),
                choice::<RiskLevel>("risk_level", "Risk"),
                id("requesting_user", "requesting user"),
                id("incident_id", "related incident").optional(),
                defaulted("status", "Change status", ChangeStatus::Requested),
                id("approved_by_user", "approving user; only once approved").optional(),
                text("scheduled_start_time", "Planned start").optional(),
                text("scheduled_end_time", "Planned end").optional(),
                text("actual_start_time", "Actual start; only once executed").optional(),
                text("actual_end_time", "Actual end; only once executed").optional(),
            ],
        ),
        op(
            "update_change_request",
            "Update a change request",
            vec![
                id("change_id", "change request to update"),
                change_set(&[
                    "title",
                    "change_type",
                    "risk_level",
                    "status",
                    "requesting_user",
                    "incident_id",
                    "approved_by_user",
                    "scheduled_start_time",
                    "scheduled_end_time",
                    "actual_start_time",
                    "actual_end_time",
                ]),
            ],
        ),
        discover(
            "discover_change_requests",
            "Find change requests matching every supplied filter",
            vec![
                id("change_id", "change request"),
                id("incident_id", "incident"),
                choice::<ChangeStatus>("status", "Change status"),
                choice::<ChangeType>("change_type", "Type of change"),
                choice::<RiskLevel>("risk_level", "Risk"),
                id("requesting_user", "requesting user"),
            ],
        ),
        op(
            "create_rollback_request",
            "Request the rollback of a change",
            vec![
                id("change_id", "change to roll back"),
                id("requesting_user", "requesting user"),
                id("incident_id", "related incident").optional(),
                defaulted("status", "Rollback status", RollbackStatus::Requested),
                id("approved_by_user", "approving user; only once decided").optional(),
                text("completed_at", "Completion time; only once decided").optional(),
            ],
        ),
        op(
            "update_rollback_request",
            "Update a rollback request",
            vec![
                id("rollback_id", "rollback request to update"),
                change_set(&[
                    "change_id",
                    "requesting_user",
                    "incident_id",
                    "status",
                    "approved_by_user",
                    "completed_at",
                ]),
            ],
        ),
        discover(
            "discover_rollback_requests",
            "Find rollback requests matching every supplied filter",
            vec![
                id("rollback_id", "rollback request"),
                id("change_id", "change"),
                id("incident_id", "incident"),
                choice::<RollbackStatus>("status", "Rollback status"),
            ],
        ),
        // Response
        op(
            "create_work_order",
            "Create a work order",
            vec![
                text("title", "Short title"),
                choice::<WorkType>("work_type", "Type of work"),
                id("created_by_user", "creating user"),
                id("incident_id", "related incident").optional(),
                id("change_id", "related change").optional(),
                id("problem_id", "related problem ticket").optional(),
                id("assigned_to_user", "assignee; required unless status is created").optional(),
                defaulted("status", "Work order status", WorkOrderStatus::Created),
                choice::<WorkOrderPriority>("priority", "Priority").optional(),
                number("estimated_hours", "Estimated effort in hours").optional(),
                text("scheduled_date", "Scheduled date").optional(),
                number("actual_hours", "Actual effort; only once completed").optional(),
                text("completion_date", "Completion date; only once completed").optional(),
            ],
        ),
        op(
            "update_work_order",
            "Update a work order",
            vec![
                id("workorder_id", "work order to update"),
                change_set(&[
                    "title",
                    "work_type",
                    "status",
                    "created_by_user",
                    "incident_id",
                    "change_id",
                    "problem_id",
                    "assigned_to_user",
                    "priority",
                    "estimated_hours",
                    "scheduled_date",
                    "actual_hours",
                    "completion_date",
                ]),
                choice::<WorkOrderStatus>("status", "New status").optional(),
                id("assigned_to_user", "new assignee").optional(),
            ],
        ),
        discover(
            "discover_work_orders",
            "Find work orders matching every supplied filter",
            vec![
                id("workorder_id", "work order"),
                id("incident_id", "incident"),
                id("change_id", "change"),
                id("problem_id", "problem ticket"),
                choice::<WorkOrderStatus>("status", "Work order status"),
                id("assigned_to_user", "assignee"),
            ],
        ),
        op(
            "create_escalation",
            "Escalate an incident to another user",
            vec![
                id("incident_id", "incident"),
                id("escalated_by_user", "escalating user"),
                id("escalated_to_user", "user escalated to; must differ from the escalating user"),
                choice::<EscalationLevel>("escalation_level", "Escalation level"),
                text("escalated_at", "When the escalation happened"),
                text("reason", "Reason for escalating").optional(),
                defaulted("status", "Escalation status", EscalationStatus::Active),
                text("resolved_at", "Resolution time; only once resolved").optional(),
            ],
        ),
        op(
            "update_escalation",
            "Update an escalation",
            vec![
                id("escalation_id", "escalation to update"),
                change_set(&[
                    "escalated_by_user",
                    "escalated_to_user",
                    "escalation_level",
                    "reason",
                    "status",
                    "escalated_at",
                    "resolved_at",
                ]),
            ],
        ),
        discover(
            "discover_escalations",
            "Find escalations matching every supplied filter",
            vec![
                id("escalation_id", "escalation"),
                id("incident_id", "incident"),
                choice::<EscalationStatus>("status", "Escalation status"),
                choice::<EscalationLevel>("escalation_level", "Escalation level"),
                id("escalated_to_user", "user escalated to"),
            ],
        ),
        op(
            "create_communication",
            "Record a communication about an incident",
            vec![
                id("incident_id", "incident"),
                id("sender_id", "sending user"),
                id("recipient_id", "receiving user"),
                choice::<CommunicationType>("communication_type", "Type of communication"),
                choice::<DeliveryMethod>("delivery_method", "Delivery method"),
                defaulted("delivery_status", "Delivery status", DeliveryStatus::Pending),
                choice::<RecipientType>("recipient_type", "Audience").optional(),
                text("sent_at", "Send time; only once sent or delivered").optional(),
            ],
        ),
        op(
            "update_communication",
            "Update a communication",
            vec![
                id("communication_id", "communication to update"),
                change_set(&[
                    "sender_id",
                    "recipient_id",
                    "recipient_type",
                    "communication_type",
                    "delivery_method",
                    "delivery_status",
                    "sent_at",
                ]),
            ],
        ),
        discover(
            "discover_communications",
            "Find communications matching every supplied filter",
            vec![
                id("communication_id", "communication"),
                id("incident_id", "incident"),
                id("sender_id", "sending user"),
                id("recipient_id", "receiving user"),
                choice::<DeliveryStatus>("delivery_status", "Delivery status"),
            ],
        ),
        op(
            "create_workaround",
            "Record a workaround applied to an incident",
            vec![
                id("incident_id", "incident"),
                id("implemented_by_user", "implementing user"),
                choice::<Effectiveness>("effectiveness_level", "How well it mitigates"),
                text("implemented_at", "When it was applied"),
                defaulted("status", "Workaround status", WorkaroundStatus::Active),
            ],
        ),
        op(
            "update_workaround",
            "Update a workaround",
            vec![
                id("workaround_id", "workaround to update"),
                change_set(&["implemented_by_user", "effectiveness_level", "implemented_at", "status"]),
            ],
        ),
        discover(
            "discover_workarounds",
            "Find workarounds matching every supplied filter",
            vec![
                id("workaround_id", "workaround"),
                id("incident_id", "incident"),
                choice::<WorkaroundStatus>("status", "Workaround status"),
            ],
        ),
        op(
            "create_root_cause_analysis",
            "Start a root cause analysis",
            vec![
                id("incident_id", "incident"),
                id("conducted_by_user", "analyst"),
                choice::<AnalysisMethod>("analysis_method", "Method"),
                defaulted("status", "Analysis status", AnalysisStatus::InProgress),
                text("completed_at", "Completion time; only once completed or reviewed").optional(),
            ],
        ),
        op(
            "update_root_cause_analysis",
            "Update a root cause analysis",
            vec![
                id("analysis_id", "analysis to update"),
                change_set(&["conducted_by_user", "analysis_method", "status", "completed_at"]),
            ],
        ),
        discover(
            "discover_root_cause_analyses",
            "Find root cause analyses matching every supplied filter",
            vec![
                id("analysis_id", "analysis"),
                id("incident_id", "incident"),
                choice::<AnalysisStatus>("status", "Analysis status"),
            ],
        ),
        // Metrics
        op(
            "create_performance_metric",
            "Record a performance metric; returns every value recorded for the incident",
            vec![
                id("incident_id", "incident"),
                choice::<MetricType>("metric_type", "Metric"),
                number("calculated_value_minutes", "Measured value, truncated to whole minutes"),
                id("recorded_by_user", "recording user"),
                number("target_minutes", "Target, truncated to whole minutes").optional(),
            ],
        ),
        discover(
            "discover_performance_metrics",
            "Find performance metrics matching every supplied filter",
            vec![
                id("metric_id", "metric"),
                id("incident_id", "incident"),
                choice::<MetricType>("metric_type", "Metric"),
            ],
        ),
        // Knowledge
        op(
            "create_incident_report",
            "Generate a report for an incident",
            vec![
                id("incident_id", "incident"),
                choice::<ReportType>("report_type", "Type of report"),
                id("generated_by_user", "generating user"),
                defaulted("status", "Report status", ReportStatus::Completed),
            ],
        ),
        op(
            "update_incident_report",
            "Update an incident report",
            vec![
                id("report_id", "report to update"),
                change_set(&["report_type", "generated_by_user", "status"]),
            ],
        ),
        discover(
            "discover_incident_reports",
            "Find incident reports matching every supplied filter",
            vec![
                id("report_id", "report"),
                id("incident_id", "incident"),
                choice::<ReportType>("report_type", "Type of report"),
                choice::<ReportStatus>("status", "Report status"),
            ],
        ),
        op(
            "create_kb_article",
            "Write a knowledge base article",
            vec![
                text("title", "Title"),
                choice::<ArticleType>("article_type", "Type of article"),
                choice::<ArticleCategory>("category", "Category"),
                id("created_by_user", "author"),
                id("incident_id", "source incident").optional(),
                id("reviewer_user", "reviewer").optional(),
                defaulted("status", "Article status", ArticleStatus::Draft),
            ],
        ),
        op(
            "update_kb_article",
            "Update a knowledge base article",
            vec![
                id("article_id", "article to update"),
                change_set(&["title", "article_type", "category", "incident_id", "reviewer_user", "status"]),
            ],
        ),
        discover(
            "discover_kb_articles",
            "Find knowledge base articles matching every supplied filter",
            vec![
                id("article_id", "article"),
                id("incident_id", "incident"),
                text("title", "Substring of the title, case-insensitive"),
                choice::<ArticleType>("article_type", "Type of article"),
                choice::<ArticleCategory>("category", "Category"),
                choice::<ArticleStatus>("status", "Article status"),
            ],
        ),
        op(
            "create_post_incident_review",
            "Schedule a post-incident review",
            vec![
                id("incident_id", "incident"),
                id("facilitator_user", "facilitator"),
                text("scheduled_date", "Scheduled date"),
                choice::<ReviewRating>("overall_rating", "Overall rating"),
                defaulted("status", "Review status", ReviewStatus::Scheduled),
                text("completed_at", "Completion time; only once completed").optional(),
            ],
        ),
        op(
            "update_post_incident_review",
            "Update a post-incident review",
            vec![
                id("review_id", "review to update"),
                change_set(&["facilitator_user", "scheduled_date", "overall_rating", "status", "completed_at"]),
            ],
        ),
        discover(
            "discover_post_incident_reviews",
            "Find post-incident reviews matching every supplied filter",
            vec![
                id("review_id", "review"),
                id("incident_id", "incident"),
                choice::<ReviewStatus>("status", "Review status"),
            ],
        ),
        // Journals
        op(
            "create_incident_update",
            "Append an entry to an incident's change history",
            vec![
                id("incident_id", "incident"),
                choice::<UpdateType>("update_type", "Type of update"),
                param(
                    "update_details",
                    "object",
                    "field_changed (defaults to 'multiple_fields'), old_value, new_value",
                )
                .optional(),
                id("updated_by_user", "user making the update"),
                text("update_timestamp", "When the update happened"),
            ],
        ),
        discover(
            "discover_incident_updates",
            "Find incident updates matching every supplied filter",
            vec![
                id("update_id", "update"),
                id("incident_id", "incident"),
                choice::<UpdateType>("update_type", "Type of update"),
            ],
        ),
        op(
            "create_audit_log",
            "Append an audit entry",
            vec![
                choice::<AuditAction>("action_type", "Action performed"),
                choice::<AuditEntityType>("entity_type", "Kind of record acted on"),
                text("entity_id", "Identifier of the record acted on; recorded as given"),
                id("performed_by_user", "acting user"),
                param("action_details", "object", "Free-form details").optional(),
                text("timestamp", "When the action happened"),
            ],
        ),
        discover(
            "discover_audit_logs",
            "Find audit entries matching every supplied filter",
            vec![
                id("audit_id", "audit entry"),
                id("audit_by_user", "acting user"),
                choice::<AuditEntityType>("entity_type", "Kind of record acted on"),
                text("entity_id", "Identifier of the record acted on"),
                choice::<AuditAction>("action", "Action performed"),
            ],
        ),
        op(
            "transfer_to_human",
            "Transfer the interaction to a human agent",
            vec![
                text("reason", "Why a human is needed"),
                param("context", "object", "Context handed to the agent").optional(),
                choice::<EscalationLevel>("escalation_level", "Escalation level"),
            ],
        ),
    ]
}
