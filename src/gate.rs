use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, error};

use crate::config::GateConfig;
use crate::error::{ProbeErrorKind, Result};
use crate::metrics::GateMetrics;
use crate::probe::{MetadataProbe, ProbeOutcome, ReqwestMetadataProbe};
use crate::record::{Record, Verdict};

/// Pipeline stage that forwards a record only when the instance metadata
/// endpoint answers with a non-empty document.
///
/// Every call probes the endpoint once. Nothing is remembered between calls,
/// so a failure for one record has no bearing on the next. Any probe failure
/// drops the record and logs one error; `evaluate` itself never fails.
///
/// The default probe uses `reqwest::blocking`, which panics when built, called or
/// dropped on a tokio runtime thread. Async hosts use
/// [`AsyncMetadataGate`](crate::async_gate::AsyncMetadataGate), or own this gate
/// inside `tokio::task::spawn_blocking`.
pub struct MetadataReachabilityGate<P = ReqwestMetadataProbe> {
    config: GateConfig,
    probe: P,
}

impl MetadataReachabilityGate<ReqwestMetadataProbe> {
    /// Gate against the real endpoint with the default API version and timeout
    pub fn with_defaults() -> Result<Self> {
        Self::from_config(GateConfig::default())
    }

    pub fn from_config(config: GateConfig) -> Result<Self> {
        let probe = ReqwestMetadataProbe::new(&config)?;
        Ok(Self::new(config, probe))
    }
}

impl<P: MetadataProbe> MetadataReachabilityGate<P> {
    pub fn new(config: GateConfig, probe: P) -> Self {
        Self { config, probe }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Probe once and decide pass or drop
    pub fn verdict(&self, tag: &str) -> Verdict {
        let started = Instant::now();
        let outcome = self.probe.probe();
        GateMetrics::record_probe_duration(started.elapsed().as_secs_f64());
        resolve_outcome(tag, outcome)
    }

    /// Returns the record untouched on pass, `None` on drop
    pub fn evaluate(&self, tag: &str, timestamp: i64, record: Record) -> Option<Record> {
        let verdict = self.verdict(tag);
        debug!(tag = %tag, timestamp, passed = verdict.is_pass(), "record evaluated");
        verdict.apply(record)
    }

    /// Evaluate a batch of `(timestamp, record)` pairs, one probe per record
    pub fn filter_batch<I>(&self, tag: &str, records: I) -> (Vec<(i64, Record)>, GateBatchStats)
    where
        I: IntoIterator<Item = (i64, Record)>,
    {
        let mut stats = GateBatchStats::default();
        let mut passed = Vec::new();

        for (timestamp, record) in records {
            let verdict = self.verdict(tag);
            stats.observe(verdict);
            if let Some(record) = verdict.apply(record) {
                passed.push((timestamp, record));
            }
        }

        debug!(
            tag = %tag,
            total = stats.total_records,
            passed = stats.passed_count,
            dropped = stats.dropped_count,
            "batch evaluated"
        );
        (passed, stats)
    }
}

/// Turn a probe outcome into a verdict, logging and counting failures
pub(crate) fn resolve_outcome(tag: &str, outcome: ProbeOutcome) -> Verdict {
    match outcome {
        Ok(_) => {
            GateMetrics::record_passed();
            Verdict::Pass
        }
        Err(e) => {
            let kind = e.kind();
            error!(tag = %tag, kind = %kind, "Error probing instance metadata: {}", e);
            GateMetrics::record_dropped(kind);
            Verdict::Drop(kind)
        }
    }
}

/// Statistics for a batch of gate evaluations
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GateBatchStats {
    pub total_records: usize,
    pub passed_count: usize,
    pub dropped_count: usize,
    pub drops_by_reason: HashMap<ProbeErrorKind, usize>,
}

impl GateBatchStats {
    fn observe(&mut self, verdict: Verdict) {
        self.total_records += 1;
        match verdict {
            Verdict::Pass => self.passed_count += 1,
            Verdict::Drop(kind) => {
                self.dropped_count += 1;
                *self.drops_by_reason.entry(kind).or_insert(0) += 1;
            }
        }
    }

    /// Pass rate as percentage
    pub fn pass_rate(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        self.passed_count as f64 / self.total_records as f64 * 100.0
    }
}
