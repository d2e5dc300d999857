//! Engine configuration via `incidentdb.toml`
//!
//! The config file lives in the data directory next to the table files. On
//! first open a commented default is written. To change settings, edit the
//! file and reopen.

use crate::clock::{Clock, FixedClock, SystemClock};
use incidentdb_core::{IncidentError, IncidentResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name placed in the data directory.
pub const CONFIG_FILE_NAME: &str = "incidentdb.toml";

/// Default cap on SLAs per subscription (one per severity tier in practice).
pub const DEFAULT_MAX_SLAS_PER_SUBSCRIPTION: usize = 3;

/// Engine configuration loaded from `incidentdb.toml`.
///
/// # Example
///
/// ```toml
/// # fixed_timestamp = "2025-10-01T00:00:00"
/// verify_on_load = true
/// max_slas_per_subscription = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// When set, every operation uses this time instead of the system clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_timestamp: Option<String>,
    /// Run the integrity verifier after loading a snapshot.
    #[serde(default = "default_verify_on_load")]
    pub verify_on_load: bool,
    /// Maximum number of SLAs attached to one subscription.
    #[serde(default = "default_max_slas")]
    pub max_slas_per_subscription: usize,
}

fn default_verify_on_load() -> bool {
    true
}

fn default_max_slas() -> usize {
    DEFAULT_MAX_SLAS_PER_SUBSCRIPTION
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_timestamp: None,
            verify_on_load: default_verify_on_load(),
            max_slas_per_subscription: default_max_slas(),
        }
    }
}

impl EngineConfig {
    /// Config with a frozen clock, as used by deterministic tests.
    pub fn fixed(timestamp: &str) -> Self {
        Self {
            fixed_timestamp: Some(timestamp.to_string()),
            ..Self::default()
        }
    }

    /// Check every setting.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` for a malformed `fixed_timestamp` or a
    /// zero `max_slas_per_subscription`.
    pub fn validate(&self) -> IncidentResult<()> {
        if let Some(ts) = &self.fixed_timestamp {
            FixedClock::new(ts)?;
        }
        if self.max_slas_per_subscription == 0 {
            return Err(IncidentError::validation(
                "max_slas_per_subscription in incidentdb.toml must be at least 1",
            ));
        }
        Ok(())
    }

    /// Build the clock this config describes.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` for a malformed `fixed_timestamp`.
    pub fn clock(&self) -> IncidentResult<Box<dyn Clock>> {
        match &self.fixed_timestamp {
            Some(ts) => Ok(Box::new(FixedClock::new(ts)?)),
            None => Ok(Box::new(SystemClock)),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# IncidentDB engine configuration
#
# Freeze the invocation time used for created_at / updated_at.
# Format: YYYY-MM-DDTHH:MM:SS (UTC). Unset = system clock.
# fixed_timestamp = "2025-10-01T00:00:00"

# Verify referential integrity and uniqueness after loading table files.
# A store that fails verification is refused.
verify_on_load = true

# Maximum number of SLAs per subscription (at most one per severity).
max_slas_per_subscription = 3
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> IncidentResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IncidentError::Io {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| {
            IncidentError::validation(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> IncidentResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| IncidentError::Io {
                reason: format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> IncidentResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| IncidentError::Serialization {
            reason: format!("Failed to serialize config: {}", e),
        })?;
        std::fs::write(path, content).map_err(|e| IncidentError::Io {
            reason: format!("Failed to write config file '{}': {}", path.display(), e),
        })
    }
}
