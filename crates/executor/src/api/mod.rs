//! High-level wrapper owning a store and its executor.
//!
//! [`IncidentDb`] pairs one [`EntityStore`] with one [`Executor`], loads and
//! saves snapshot directories, and exposes typed shortcuts over the
//! [`Command`]/[`Output`] interface.
//!
//! # Example
//!
//! ```text
//! use incidentdb_executor::IncidentDb;
//!
//! let mut db = IncidentDb::open("/path/to/data")?;
//! let reply = db.invoke("discover_incidents", serde_json::json!({"status": "open"}));
//! db.save("/path/to/data")?;
//! ```

mod shared;

pub use shared::SharedIncidentDb;

use std::path::Path;

use incidentdb_core::{Entity, Record};
use incidentdb_engine::{EngineConfig, CONFIG_FILE_NAME};
use incidentdb_storage::{load_dir, save_dir, verify, EntityStore, HasTable};
use serde_json::Value;
use tracing::info;

use crate::catalogue::{descriptors, OperationDescriptor};
use crate::convert::convert_result;
use crate::{Command, Error, Executor, Output, Result};

/// A store and the executor that drives it.
///
/// All mutation goes through [`execute`](Self::execute) or
/// [`invoke`](Self::invoke); [`store`](Self::store) is read-only.
pub struct IncidentDb {
    store: EntityStore,
    executor: Executor,
}

impl IncidentDb {
    /// Empty store, system clock, default settings.
    pub fn in_memory() -> Self {
        Self {
            store: EntityStore::new(),
            executor: Executor::new(),
        }
    }

    /// Empty store configured by `config`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` if the config does not validate.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            store: EntityStore::new(),
            executor: Executor::with_config(config)?,
        })
    }

    /// Wrap an existing store.
    pub fn from_store(store: EntityStore, executor: Executor) -> Self {
        Self { store, executor }
    }

    /// Open the snapshot directory `dir`.
    ///
    /// Reads `incidentdb.toml` (writing a commented default first if it is
    /// missing), loads every table file, and when `verify_on_load` is set
    /// refuses a store that breaks referential integrity or uniqueness.
    ///
    /// # Errors
    ///
    /// - `Io` if the directory or a file cannot be read
    /// - `ValidationFailure` if the config is invalid
    /// - `Serialization` if a table file is malformed
    /// - `Corruption` if the loaded data violates the store invariants
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| Error::Io {
            reason: format!("Failed to create data directory '{}': {}", dir.display(), e),
        })?;
        let config_path = dir.join(CONFIG_FILE_NAME);
        convert_result(EngineConfig::write_default_if_missing(&config_path))?;
        let config = convert_result(EngineConfig::from_file(&config_path))?;

        let store = convert_result(load_dir(dir))?;
        if config.verify_on_load {
            let violations = verify(&store);
            if let Some(first) = violations.first() {
                return Err(Error::Corruption {
                    reason: format!(
                        "{} violation(s) in '{}', first: {}",
                        violations.len(),
                        dir.display(),
                        first
                    ),
                });
            }
        }

        info!(
            target: "incidentdb::snapshot",
            dir = %dir.display(),
            records = store.total_records(),
            verified = config.verify_on_load,
            "Opened store"
        );
        Ok(Self {
            store,
            executor: Executor::with_config(config)?,
        })
    }

    /// Write every table into `dir`.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        convert_result(save_dir(&self.store, dir.as_ref()))
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Read-only view of the store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Give up the wrapper and keep the store.
    pub fn into_store(self) -> EntityStore {
        self.store
    }

    /// Record of type `E` with identifier `id`.
    pub fn get<E: Entity>(&self, id: E::Id) -> Option<&E>
    where
        EntityStore: HasTable<E>,
    {
        self.store.get::<E>(id)
    }

    /// Execute one command.
    pub fn execute(&mut self, cmd: Command) -> Result<Output> {
        self.executor.execute(&mut self.store, cmd)
    }

    /// Execute commands in order; each result is independent.
    pub fn execute_many(&mut self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        self.executor.execute_many(&mut self.store, cmds)
    }

    /// Invoke an operation by name and return its JSON reply.
    pub fn invoke(&mut self, name: &str, arguments: Value) -> Value {
        self.executor.invoke(&mut self.store, name, arguments)
    }

    /// Every operation descriptor.
    pub fn descriptors(&self) -> &'static [OperationDescriptor] {
        descriptors()
    }

    // =========================================================================
    // Typed shortcuts
    // =========================================================================

    /// Run a create command and return the new id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArguments` without touching the store if `cmd` is not
    /// a create.
    pub fn create(&mut self, cmd: Command) -> Result<String> {
        let name = cmd.name();
        if !cmd.is_create() {
            return Err(wrong_family(name, "create"));
        }
        match self.execute(cmd)? {
            Output::Created { id, .. } | Output::Transferred { transfer_id: id } => Ok(id),
            Output::MetricRecorded(summary) => Ok(summary.metric_id.to_string()),
            _ => Err(Error::Internal {
                reason: format!("Unexpected output for {}", name),
            }),
        }
    }

    /// Run an update command and return the updated record.
    ///
    /// Returns `InvalidArguments` without touching the store if `cmd` is not
    /// an update.
    pub fn update(&mut self, cmd: Command) -> Result<Record> {
        let name = cmd.name();
        if !cmd.is_update() {
            return Err(wrong_family(name, "update"));
        }
        match self.execute(cmd)? {
            Output::Updated(record) => Ok(record),
            _ => Err(Error::Internal {
                reason: format!("Unexpected output for {}", name),
            }),
        }
    }

    /// Run a discover command and return the matching records.
    pub fn discover(&mut self, cmd: Command) -> Result<Vec<Record>> {
        let name = cmd.name();
        if !cmd.is_read_only() {
            return Err(wrong_family(name, "discover"));
        }
        match self.execute(cmd)? {
            Output::Found(records) => Ok(records),
            _ => Err(Error::Internal {
                reason: format!("Unexpected output for {}", name),
            }),
        }
    }
}

fn wrong_family(operation: &str, expected: &str) -> Error {
    Error::InvalidArguments {
        operation: operation.to_string(),
        reason: format!("not a {} operation", expected),
    }
}
