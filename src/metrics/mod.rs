//! Metrics for the metadata gate
//!
//! Metrics are emitted through the `metrics` facade. Installing a recorder or
//! exporter is the host's business; without one every call is a no-op.

pub mod gate;

pub use gate::GateMetrics;

use tracing::debug;

/// Trait for a stage-specific metrics collection
pub trait PhaseMetrics {
    /// Register all metrics so they show up before the first record arrives
    fn register_metrics();

    fn phase_name() -> &'static str;

    /// Documentation for every metric in this phase
    fn metrics_documentation() -> Vec<MetricDoc>;
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Build a metric name following `mdgate_{phase}_{name}[_total]`
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("mdgate_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("mdgate_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;

/// Register a phase's metrics and hand their help text to the installed recorder
pub fn register_phase<T: PhaseMetrics>() -> usize {
    T::register_metrics();
    let docs = T::metrics_documentation();
    for doc in &docs {
        match doc.metric_type {
            MetricType::Counter => ::metrics::describe_counter!(doc.name, doc.help),
            MetricType::Histogram => ::metrics::describe_histogram!(doc.name, doc.help),
        }
    }
    debug!("Registered {} metrics for phase '{}'", docs.len(), T::phase_name());
    docs.len()
}

pub fn register_all_metrics() -> usize {
    register_phase::<GateMetrics>()
}
