//! Per-invocation context handed to every operation.

use crate::config::{EngineConfig, DEFAULT_MAX_SLAS_PER_SUBSCRIPTION};

/// What an operation knows besides the store and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpContext {
    /// Invocation time; every timestamp written by the operation uses it.
    pub now: String,
    /// Maximum number of SLAs per subscription.
    pub max_slas_per_subscription: usize,
}

impl OpContext {
    /// Context at time `now` with default limits.
    pub fn new(now: impl Into<String>) -> Self {
        Self {
            now: now.into(),
            max_slas_per_subscription: DEFAULT_MAX_SLAS_PER_SUBSCRIPTION,
        }
    }

    /// Context at time `now` with limits from `config`.
    pub fn with_config(now: impl Into<String>, config: &EngineConfig) -> Self {
        Self {
            now: now.into(),
            max_slas_per_subscription: config.max_slas_per_subscription,
        }
    }
}
