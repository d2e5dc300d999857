//! The Executor - single entry point to IncidentDB's operations.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate engine operation. It owns only the clock and the engine
//! settings; the store is passed in by the caller on every call, so the
//! caller alone decides how calls against one store are serialized.

use incidentdb_engine::{Clock, EngineConfig, OpContext, SystemClock};
use incidentdb_storage::EntityStore;
use serde_json::{json, Value};
use tracing::debug;

use crate::convert::convert_result;
use crate::handlers::{catalog, incident, journal, knowledge, party};
use crate::{Command, Error, Output, Result};

/// The command executor - single entry point for all operations.
///
/// # Thread Safety
///
/// Executor is `Send + Sync`. It holds no store state; see
/// [`SharedIncidentDb`](crate::SharedIncidentDb) for sharing one store
/// between threads.
///
/// # Example
///
/// ```ignore
/// use incidentdb_executor::{Command, Executor};
/// use incidentdb_storage::EntityStore;
///
/// let executor = Executor::new();
/// let mut store = EntityStore::new();
/// let reply = executor.invoke(&mut store, "discover_clients", serde_json::json!({}));
/// ```
pub struct Executor {
    clock: Box<dyn Clock>,
    config: EngineConfig,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    /// Executor on the system clock with default settings.
    pub fn new() -> Self {
        Self {
            clock: Box::new(SystemClock),
            config: EngineConfig::default(),
        }
    }

    /// Executor configured by `config`, including its clock.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` if the config does not validate.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        convert_result(config.validate())?;
        let clock = convert_result(config.clock())?;
        Ok(Self { clock, config })
    }

    /// Executor with an explicit clock; the config's `fixed_timestamp` is
    /// ignored.
    pub fn with_clock(clock: Box<dyn Clock>, config: EngineConfig) -> Self {
        Self { clock, config }
    }

    /// Engine settings in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Context for one operation: a single clock reading plus the limits.
    pub fn context(&self) -> OpContext {
        OpContext::with_config(self.clock.now(), &self.config)
    }

    /// Execute a single command.
    ///
    /// A command that fails leaves `store` untouched.
    pub fn execute(&self, store: &mut EntityStore, cmd: Command) -> Result<Output> {
        let operation = cmd.name();
        let result = self.dispatch(store, cmd);
        if let Err(e) = &result {
            debug!(
                target: "incidentdb::ops",
                operation,
                kind = %e.kind(),
                error = %e,
                "Rejected"
            );
        }
        result
    }

    fn dispatch(&self, store: &mut EntityStore, cmd: Command) -> Result<Output> {
        if cmd.is_read_only() {
            return Self::discover(store, cmd);
        }
        let ctx = self.context();
        let ctx = &ctx;
        match cmd {
            // Clients, vendors & users
            Command::CreateClient(req) => party::create_client(store, ctx, req),
            Command::UpdateClient(req) => party::update_client(store, ctx, req),
            Command::CreateVendor(req) => party::create_vendor(store, ctx, req),
            Command::UpdateVendor(req) => party::update_vendor(store, ctx, req),
            Command::CreateUser(req) => party::create_user(store, ctx, req),
            Command::UpdateUser(req) => party::update_user(store, ctx, req),

            // Catalog & commercial terms
            Command::CreateProduct(req) => catalog::create_product(store, ctx, req),
            Command::UpdateProduct(req) => catalog::update_product(store, ctx, req),
            Command::CreateComponent(req) => catalog::create_component(store, ctx, req),
            Command::UpdateComponent(req) => catalog::update_component(store, ctx, req),
            Command::CreateSubscription(req) => catalog::create_subscription(store, ctx, req),
            Command::UpdateSubscription(req) => catalog::update_subscription(store, ctx, req),
            Command::CreateSla(req) => catalog::create_sla(store, ctx, req),
            Command::UpdateSla(req) => catalog::update_sla(store, ctx, req),

            // Incident response
            Command::CreateIncident(req) => incident::create_incident(store, ctx, req),
            Command::UpdateIncident(req) => incident::update_incident(store, ctx, req),
            Command::CreateProblemTicket(req) => incident::create_problem_ticket(store, ctx, req),
            Command::UpdateProblemTicket(req) => incident::update_problem_ticket(store, ctx, req),
            Command::CreateChangeRequest(req) => incident::create_change_request(store, ctx, req),
            Command::UpdateChangeRequest(req) => incident::update_change_request(store, ctx, req),
            Command::CreateRollbackRequest(req) => {
                incident::create_rollback_request(store, ctx, req)
            }
            Command::UpdateRollbackRequest(req) => {
                incident::update_rollback_request(store, ctx, req)
            }
            Command::CreateWorkOrder(req) => incident::create_work_order(store, ctx, req),
            Command::UpdateWorkOrder(req) => incident::update_work_order(store, ctx, req),
            Command::CreateEscalation(req) => incident::create_escalation(store, ctx, req),
            Command::UpdateEscalation(req) => incident::update_escalation(store, ctx, req),
            Command::CreateCommunication(req) => incident::create_communication(store, ctx, req),
            Command::UpdateCommunication(req) => incident::update_communication(store, ctx, req),
            Command::CreateWorkaround(req) => incident::create_workaround(store, ctx, req),
            Command::UpdateWorkaround(req) => incident::update_workaround(store, ctx, req),
            Command::CreateRootCauseAnalysis(req) => {
                incident::create_root_cause_analysis(store, ctx, req)
            }
            Command::UpdateRootCauseAnalysis(req) => {
                incident::update_root_cause_analysis(store, ctx, req)
            }
            Command::CreatePerformanceMetric(req) => {
                incident::create_performance_metric(store, ctx, req)
            }

            // Knowledge
            Command::CreateIncidentReport(req) => knowledge::create_incident_report(store, ctx, req),
            Command::UpdateIncidentReport(req) => knowledge::update_incident_report(store, ctx, req),
            Command::CreateKbArticle(req) => knowledge::create_kb_article(store, ctx, req),
            Command::UpdateKbArticle(req) => knowledge::update_kb_article(store, ctx, req),
            Command::CreatePostIncidentReview(req) => {
                knowledge::create_post_incident_review(store, ctx, req)
            }
            Command::UpdatePostIncidentReview(req) => {
                knowledge::update_post_incident_review(store, ctx, req)
            }

            // Journals
            Command::CreateIncidentUpdate(req) => journal::create_incident_update(store, ctx, req),
            Command::CreateAuditLog(req) => journal::create_audit_log(store, ctx, req),
            Command::TransferToHuman(req) => journal::transfer_to_human(store, ctx, req),

            other => Self::discover(store, other),
        }
    }

    /// Run a read-only command.
    fn discover(store: &EntityStore, cmd: Command) -> Result<Output> {
        match cmd {
            Command::DiscoverClients(f) => party::discover_clients(store, &f),
            Command::DiscoverVendors(f) => party::discover_vendors(store, &f),
            Command::DiscoverUsers(f) => party::discover_users(store, &f),
            Command::DiscoverProducts(f) => catalog::discover_products(store, &f),
            Command::DiscoverComponents(f) => catalog::discover_components(store, &f),
            Command::DiscoverSubscriptions(f) => catalog::discover_subscriptions(store, &f),
            Command::DiscoverSlas(f) => catalog::discover_slas(store, &f),
            Command::DiscoverIncidents(f) => incident::discover_incidents(store, &f),
            Command::DiscoverProblemTickets(f) => incident::discover_problem_tickets(store, &f),
            Command::DiscoverChangeRequests(f) => incident::discover_change_requests(store, &f),
            Command::DiscoverRollbackRequests(f) => {
                incident::discover_rollback_requests(store, &f)
            }
            Command::DiscoverWorkOrders(f) => incident::discover_work_orders(store, &f),
            Command::DiscoverEscalations(f) => incident::discover_escalations(store, &f),
            Command::DiscoverCommunications(f) => incident::discover_communications(store, &f),
            Command::DiscoverWorkarounds(f) => incident::discover_workarounds(store, &f),
            Command::DiscoverRootCauseAnalyses(f) => {
                incident::discover_root_cause_analyses(store, &f)
            }
            Command::DiscoverPerformanceMetrics(f) => {
                incident::discover_performance_metrics(store, &f)
            }
            Command::DiscoverIncidentReports(f) => knowledge::discover_incident_reports(store, &f),
            Command::DiscoverKbArticles(f) => knowledge::discover_kb_articles(store, &f),
            Command::DiscoverPostIncidentReviews(f) => {
                knowledge::discover_post_incident_reviews(store, &f)
            }
            Command::DiscoverIncidentUpdates(f) => journal::discover_incident_updates(store, &f),
            Command::DiscoverAuditLogs(f) => journal::discover_audit_logs(store, &f),
            other => Err(Error::Internal {
                reason: format!("{} is not a discover operation", other.name()),
            }),
        }
    }

    /// Execute multiple commands sequentially.
    ///
    /// Returns all results in the same order as the input commands.
    /// Execution continues even if some commands fail; each command sees
    /// the effects of the successful ones before it.
    pub fn execute_many(&self, store: &mut EntityStore, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(store, cmd)).collect()
    }

    /// Build a command from an operation name and its JSON arguments.
    ///
    /// Missing or `null` arguments are read as an empty object.
    ///
    /// # Errors
    ///
    /// - `UnknownOperation` if no operation has this name
    /// - `InvalidArguments` if the arguments do not fit the operation
    pub fn parse(name: &str, arguments: Value) -> Result<Command> {
        if !Command::NAMES.contains(&name) {
            return Err(Error::UnknownOperation {
                name: name.to_string(),
            });
        }
        let arguments = match arguments {
            Value::Null => json!({}),
            Value::Object(map) => Value::Object(map),
            other => {
                return Err(Error::InvalidArguments {
                    operation: name.to_string(),
                    reason: format!("expected an object, got {}", other),
                })
            }
        };
        serde_json::from_value(json!({"name": name, "arguments": arguments})).map_err(|e| {
            Error::InvalidArguments {
                operation: name.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Invoke an operation by name and return its JSON reply.
    ///
    /// The reply is the success value of [`Output::to_json`], or the error
    /// envelope `{"error": "<message>", "halt": true}`.
    pub fn invoke(&self, store: &mut EntityStore, name: &str, arguments: Value) -> Value {
        match Self::parse(name, arguments).and_then(|cmd| self.execute(store, cmd)) {
            Ok(output) => output.to_json(),
            Err(e) => e.to_json(),
        }
    }
}
