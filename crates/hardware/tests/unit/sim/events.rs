//! JSON-lines export of observations.

use std::fs;

use identify_core::Simulator;
use identify_core::common::{Component, SimError};
use identify_core::config::{Config, SourceConfig};
use serde_json::Value;

use crate::common::harness::TestContext;

#[test]
fn test_one_line_per_observation() {
    let (sim, _) = TestContext::new()
        .with_words(&[0x4CE4_1421, 0x4CE3_3182])
        .run_ok();
    let mut out = Vec::new();
    sim.observer().write_json_lines(&mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0]["time"], 27_000);
    assert_eq!(lines[0]["word"], 0x4CE4_1421);
    assert_eq!(lines[0]["decode"]["branch_condition"], "Ctr");
    assert_eq!(lines[0]["control"]["enable"], true);
    assert_eq!(lines[1]["decode"]["condreg_op"], "Crxor");
    assert_eq!(lines[1]["stall_fetch"], false);
}

#[test]
fn test_export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    let (sim, _) = TestContext::new()
        .with_words(&[0x4CE4_1421, 0x4CE3_3182])
        .run_ok();

    assert_eq!(sim.observer().export(&path).unwrap(), 2);
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("events.jsonl");
    let (sim, _) = TestContext::new().with_words(&[0x4CE4_1421]).run_ok();

    let err = sim.observer().export(&path).unwrap_err();
    assert!(matches!(err, SimError::EventsWrite { .. }));
    assert_eq!(err.component(), Component::Events);
    assert!(err.to_string().contains("events.jsonl"));
}

#[test]
fn test_records_dropped_unless_kept() {
    let mut config = Config::default();
    config.trace.enabled = false;
    config.stimulus.cycles = 3;
    config.stimulus.source = SourceConfig::Fixed {
        words: vec![0x4CE4_1421, 0x4CE3_3182, 0x4F84_0000],
    };
    assert!(!config.general.keep_observations);

    let mut sim = Simulator::new(&config);
    let stats = sim.run().unwrap();
    assert_eq!(stats.observations, 3);
    assert!(sim.observer().records().is_empty());
}
