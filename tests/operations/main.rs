//! Operation-level integration tests
//!
//! Drives the public `incidentdb` API the way an external caller does:
//! operation names plus JSON arguments, replies as JSON envelopes.
//!
//! - scenarios: the reference create/update walkthroughs
//! - properties: store invariants under random operation sequences
//! - lifecycle: status gates and composite rules
//! - discovery: filtering and result shape
//! - snapshot: save/open round trips and refusal of broken data
//! - concurrency: the shared handle under parallel callers

mod common;

mod concurrency;
mod discovery;
mod lifecycle;
mod properties;
mod scenarios;
mod snapshot;
