//! Serialized handle for concurrent callers.
//!
//! Id allocation and uniqueness checks read the store and then write it, so
//! two callers interleaving on one store could both claim the same id. The
//! shared handle puts one mutex in front of the whole [`IncidentDb`]: every
//! call runs to completion before the next one starts.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use super::IncidentDb;
use crate::{Command, Output, Result};

/// Cloneable, thread-safe handle to one [`IncidentDb`].
#[derive(Clone)]
pub struct SharedIncidentDb {
    inner: Arc<Mutex<IncidentDb>>,
}

impl SharedIncidentDb {
    /// Share `db` between threads.
    pub fn new(db: IncidentDb) -> Self {
        Self {
            inner: Arc::new(Mutex::new(db)),
        }
    }

    /// Execute one command under the lock.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        self.inner.lock().execute(cmd)
    }

    /// Invoke an operation by name under the lock.
    pub fn invoke(&self, name: &str, arguments: Value) -> Value {
        self.inner.lock().invoke(name, arguments)
    }

    /// Save a snapshot under the lock.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        self.inner.lock().save(dir)
    }

    /// Run `f` with exclusive access to the database.
    ///
    /// Several operations run inside one call see no interleaving from
    /// other handles.
    pub fn with<R>(&self, f: impl FnOnce(&mut IncidentDb) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<IncidentDb> for SharedIncidentDb {
    fn from(db: IncidentDb) -> Self {
        Self::new(db)
    }
}
