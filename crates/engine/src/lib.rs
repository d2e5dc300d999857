//! Operation engine for IncidentDB
//!
//! This crate holds every create, update and discover operation over the
//! entity store, plus the rules they share:
//! - Field validation: enumerations, foreign keys, uniqueness (`validate`)
//! - Lifecycle gates and composite rules (`lifecycle`)
//! - Partial updates (`patch`)
//! - Discovery filter matching (`discover`)
//! - Invocation time (`clock`) and engine settings (`config`)
//!
//! Operations are plain functions over `&mut EntityStore`. They validate
//! everything first and write once, so a failing call never leaves a partial
//! effect behind.

#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod context;
pub mod discover;
pub mod lifecycle;
pub mod ops;
pub mod patch;
pub mod validate;

pub use clock::{Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use config::{EngineConfig, CONFIG_FILE_NAME, DEFAULT_MAX_SLAS_PER_SUBSCRIPTION};
pub use context::OpContext;
