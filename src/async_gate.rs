use std::future::Future;
use std::time::Instant;
use tracing::debug;

use crate::config::GateConfig;
use crate::error::{ProbeError, Result};
use crate::gate::resolve_outcome;
use crate::metrics::GateMetrics;
use crate::probe::{AsyncMetadataProbe, ReqwestAsyncProbe};
use crate::record::{Record, Verdict};

/// Async flavour of [`crate::gate::MetadataReachabilityGate`] for hosts that
/// drive records from a tokio runtime and need to abort in-flight probes on
/// shutdown.
pub struct AsyncMetadataGate<P = ReqwestAsyncProbe> {
    config: GateConfig,
    probe: P,
}

impl AsyncMetadataGate<ReqwestAsyncProbe> {
    pub fn with_defaults() -> Result<Self> {
        Self::from_config(GateConfig::default())
    }

    pub fn from_config(config: GateConfig) -> Result<Self> {
        let probe = ReqwestAsyncProbe::new(&config)?;
        Ok(Self::new(config, probe))
    }
}

impl<P: AsyncMetadataProbe> AsyncMetadataGate<P> {
    pub fn new(config: GateConfig, probe: P) -> Self {
        Self { config, probe }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub async fn verdict(&self, tag: &str) -> Verdict {
        let started = Instant::now();
        let outcome = self.probe.probe().await;
        GateMetrics::record_probe_duration(started.elapsed().as_secs_f64());
        resolve_outcome(tag, outcome)
    }

    pub async fn evaluate(&self, tag: &str, timestamp: i64, record: Record) -> Option<Record> {
        let verdict = self.verdict(tag).await;
        debug!(tag = %tag, timestamp, passed = verdict.is_pass(), "record evaluated");
        verdict.apply(record)
    }

    /// Like [`evaluate`](Self::evaluate), but gives up as soon as `shutdown`
    /// resolves. The in-flight request is aborted and the record dropped.
    pub async fn evaluate_until<F>(
        &self,
        tag: &str,
        timestamp: i64,
        record: Record,
        shutdown: F,
    ) -> Option<Record>
    where
        F: Future<Output = ()>,
    {
        let verdict = tokio::select! {
            biased;
            _ = shutdown => resolve_outcome(tag, Err(ProbeError::Cancelled)),
            verdict = self.verdict(tag) => verdict,
        };
        debug!(tag = %tag, timestamp, passed = verdict.is_pass(), "record evaluated");
        verdict.apply(record)
    }
}
