//! Gate Metrics
//!
//! Pass/drop counts and probe latency for the metadata reachability gate.

use crate::error::ProbeErrorKind;
use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct GateMetrics;

impl GateMetrics {
    pub fn record_passed() {
        ::metrics::counter!(phase_metric!(counter, "gate", "records_passed")).increment(1);
    }

    pub fn record_dropped(reason: ProbeErrorKind) {
        ::metrics::counter!(
            phase_metric!(counter, "gate", "records_dropped"),
            "reason" => reason.as_str()
        )
        .increment(1);
    }

    pub fn record_probe_duration(duration_secs: f64) {
        ::metrics::histogram!(phase_metric!(histogram, "gate", "probe_duration_seconds"))
            .record(duration_secs);
    }
}

impl PhaseMetrics for GateMetrics {
    fn register_metrics() {
        use ::metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "gate", "records_passed"));
        let _ = counter!(phase_metric!(counter, "gate", "records_dropped"));
        let _ = histogram!(phase_metric!(histogram, "gate", "probe_duration_seconds"));
    }

    fn phase_name() -> &'static str {
        "gate"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "gate", "records_passed"),
                metric_type: MetricType::Counter,
                help: "Records forwarded because the metadata endpoint answered",
            },
            MetricDoc {
                name: phase_metric!(counter, "gate", "records_dropped"),
                metric_type: MetricType::Counter,
                help: "Records dropped because the metadata probe failed",
            },
            MetricDoc {
                name: phase_metric!(histogram, "gate", "probe_duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Wall time of a single metadata probe in seconds",
            },
        ]
    }
}
