mod common;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::{record, Backend, ErrorCounter, MockProbe};
use metadata_gate::{GateConfig, MetadataReachabilityGate, ProbeErrorKind, Verdict};
use serde_json::json;

const INSTANCE_DOC: &str = "{\"instanceId\":\"i-1\"}";

fn gate(probe: MockProbe) -> MetadataReachabilityGate<MockProbe> {
    MetadataReachabilityGate::new(GateConfig::default(), probe)
}

#[test]
fn test_scenario_metadata_available_passes_record() {
    let gate = gate(MockProbe::always(Backend::Body(INSTANCE_DOC)));
    let errors = ErrorCounter::default();

    let out = errors.run(|| gate.evaluate("oms.nagios", 1_500_000_000, record(json!({"msg": "ok"}))));

    assert_eq!(out, Some(record(json!({"msg": "ok"}))));
    assert_eq!(errors.count(), 0);
}

#[test]
fn test_scenario_connection_refused_drops_record() {
    let gate = gate(MockProbe::always(Backend::ConnectionRefused));
    let errors = ErrorCounter::default();

    let out = errors.run(|| gate.evaluate("oms.nagios", 0, record(json!({"msg": "x"}))));

    assert_eq!(out, None);
    assert_eq!(errors.count(), 1);
}

#[test]
fn test_scenario_empty_body_drops_record() {
    let gate = gate(MockProbe::always(Backend::Body("")));
    let errors = ErrorCounter::default();

    let out = errors.run(|| gate.evaluate("oms.nagios", 0, record(json!({"msg": "y"}))));

    assert_eq!(out, None);
    assert_eq!(errors.count(), 1);
    assert_eq!(gate.verdict("oms.nagios"), Verdict::Drop(ProbeErrorKind::EmptyBody));
}

#[test]
fn test_scenario_timeout_returns_within_bound() {
    let bound = Duration::from_millis(100);
    let config = GateConfig::new("2017-08-01", bound).unwrap();
    let gate = MetadataReachabilityGate::new(config, MockProbe::always(Backend::Timeout(bound)));
    let errors = ErrorCounter::default();

    let started = Instant::now();
    let out = errors.run(|| gate.evaluate("oms.nagios", 0, record(json!({"msg": "z"}))));

    assert_eq!(out, None);
    assert!(started.elapsed() < bound + Duration::from_secs(1));
    assert_eq!(errors.count(), 1);
}

#[test]
fn test_pass_preserves_every_field() {
    let gate = gate(MockProbe::always(Backend::Body(INSTANCE_DOC)));
    let input = record(json!({
        "host": "vm-01",
        "severity": 3,
        "ratio": 0.25,
        "tags": ["a", "b"],
        "detail": {"service": "http", "state": null},
        "ok": false
    }));

    assert_eq!(gate.evaluate("t", 42, input.clone()), Some(input));
}

#[test]
fn test_same_outcome_same_decision() {
    let input = record(json!({"msg": "again"}));

    let passing = gate(MockProbe::always(Backend::Body(INSTANCE_DOC)));
    let first = passing.evaluate("t", 1, input.clone());
    let second = passing.evaluate("t", 1, input.clone());
    assert_eq!(first, second);
    assert_eq!(first, Some(input.clone()));

    let failing = gate(MockProbe::always(Backend::ConnectionRefused));
    assert_eq!(failing.evaluate("t", 1, input.clone()), None);
    assert_eq!(failing.evaluate("t", 1, input), None);
}

#[test]
fn test_earlier_failure_does_not_leak_into_later_record() {
    let probe = MockProbe::scripted(vec![Backend::ConnectionRefused], Backend::Body(INSTANCE_DOC));
    let gate = gate(probe);

    assert_eq!(gate.evaluate("t", 1, record(json!({"id": "a"}))), None);
    assert_eq!(
        gate.evaluate("t", 2, record(json!({"id": "b"}))),
        Some(record(json!({"id": "b"})))
    );
}

#[test]
fn test_probe_runs_once_per_record() {
    let probe = Arc::new(MockProbe::always(Backend::Body(INSTANCE_DOC)));
    let gate = MetadataReachabilityGate::new(GateConfig::default(), Arc::clone(&probe));

    for i in 0..5 {
        gate.evaluate("t", i, record(json!({ "seq": i })));
    }
    let (passed, stats) = gate.filter_batch("t", (0..3).map(|i| (i, record(json!({ "seq": i })))));

    assert_eq!(probe.calls(), 8);
    assert_eq!(passed.len(), 3);
    assert_eq!(stats.pass_rate(), 100.0);
}

#[test]
fn test_concurrent_workers_share_one_gate() {
    let probe = MockProbe::always(Backend::Body(INSTANCE_DOC));
    let gate = Arc::new(gate(probe));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let gate = Arc::clone(&gate);
            thread::spawn(move || {
                (0..10)
                    .filter(|i| {
                        gate.evaluate("t", *i, record(json!({ "worker": worker, "seq": i })))
                            .is_some()
                    })
                    .count()
            })
        })
        .collect();

    let passed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(passed, 40);
}
