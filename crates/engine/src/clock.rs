//! Invocation time
//!
//! Every operation reads the clock once and stamps all `created_at` /
//! `updated_at` values it writes with that single reading.

use chrono::{NaiveDateTime, Utc};
use incidentdb_core::{IncidentError, IncidentResult};

/// Format of every timestamp the store writes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Source of the invocation time.
pub trait Clock: Send + Sync {
    /// Current time formatted with [`TIMESTAMP_FORMAT`].
    fn now(&self) -> String;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Utc::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(String);

impl FixedClock {
    /// Freeze the clock at `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` if `timestamp` is not in
    /// `YYYY-MM-DDTHH:MM:SS` form.
    pub fn new(timestamp: &str) -> IncidentResult<Self> {
        NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|e| {
            IncidentError::validation(format!(
                "Invalid fixed timestamp '{}': {} (expected YYYY-MM-DDTHH:MM:SS)",
                timestamp, e
            ))
        })?;
        Ok(FixedClock(timestamp.to_string()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_uses_second_precision() {
        let now = SystemClock.now();
        assert_eq!(now.len(), 19);
        assert!(NaiveDateTime::parse_from_str(&now, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn fixed_clock_is_constant() {
        let clock = FixedClock::new("2025-10-01T00:00:00").unwrap();
        assert_eq!(clock.now(), "2025-10-01T00:00:00");
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn fixed_clock_rejects_other_formats() {
        assert!(FixedClock::new("2025-10-01").is_err());
        assert!(FixedClock::new("2025-10-01 00:00:00").is_err());
        assert!(FixedClock::new("2025-10-01T00:00:00Z").is_err());
    }
}
