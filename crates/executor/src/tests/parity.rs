//! Parity tests: the catalogue, the `Command` enum and the dispatcher agree.
//!
//! An external caller only sees descriptors, so every descriptor must name
//! a command, every command must be described, and the required parameters
//! a descriptor publishes must be exactly what the command needs.

use super::executor;
use crate::{descriptors, Command};
use incidentdb_storage::EntityStore;
use serde_json::{json, Map, Value};

#[test]
fn every_command_is_described_once() {
    let described: Vec<&str> = descriptors().iter().map(|d| d.name).collect();
    assert_eq!(described, Command::NAMES);
    assert_eq!(Command::NAMES.len(), 64);
}

#[test]
fn command_serializes_under_its_name() {
    let cmd = Command::DiscoverRootCauseAnalyses(Default::default());
    let value = serde_json::to_value(&cmd).unwrap();
    assert_eq!(value["name"], "discover_root_cause_analyses");
    assert_eq!(cmd.name(), "discover_root_cause_analyses");
}

#[test]
fn every_name_round_trips_through_command() {
    // A discover needs no arguments, so it deserializes from an empty object.
    for name in Command::NAMES.iter().filter(|n| n.starts_with("discover_")) {
        let cmd: Command =
            serde_json::from_value(json!({"name": name, "arguments": {}})).unwrap();
        assert_eq!(cmd.name(), *name);
        assert!(cmd.is_read_only());
    }
}

/// Dummy value of the right JSON type for a described parameter.
fn sample(kind: &str) -> Value {
    match kind {
        "number" => json!(1.5),
        "integer" => json!(1),
        "object" => json!({}),
        _ => json!("1"),
    }
}

#[test]
fn required_parameters_are_sufficient_to_parse() {
    for d in descriptors() {
        let mut args = Map::new();
        for name in d.required() {
            let kind = d.parameters["properties"][name]["type"].as_str().unwrap();
            args.insert(name.to_string(), sample(kind));
        }
        let parsed = crate::Executor::parse(d.name, Value::Object(args));
        assert!(parsed.is_ok(), "{}: {:?}", d.name, parsed.err());
    }
}

#[test]
fn every_required_parameter_is_really_required() {
    for d in descriptors() {
        let required = d.required();
        for skipped in &required {
            let mut args = Map::new();
            for name in required.iter().filter(|n| *n != skipped) {
                let kind = d.parameters["properties"][*name]["type"].as_str().unwrap();
                args.insert(name.to_string(), sample(kind));
            }
            assert!(
                crate::Executor::parse(d.name, Value::Object(args)).is_err(),
                "{} parsed without {}",
                d.name,
                skipped
            );
        }
    }
}

#[test]
fn every_described_parameter_is_accepted() {
    for d in descriptors() {
        let mut args = Map::new();
        for name in d.parameter_names() {
            let kind = d.parameters["properties"][name]["type"].as_str().unwrap();
            args.insert(name.to_string(), sample(kind));
        }
        let parsed = crate::Executor::parse(d.name, Value::Object(args));
        assert!(parsed.is_ok(), "{}: {:?}", d.name, parsed.err());
    }
}

#[test]
fn discovers_on_an_empty_store_return_empty_lists() {
    let executor = executor();
    let mut store = EntityStore::new();
    for name in Command::NAMES.iter().filter(|n| n.starts_with("discover_")) {
        assert_eq!(executor.invoke(&mut store, name, json!({})), json!([]), "{}", name);
    }
}
