//! Log pipeline stage that forwards records only while the cloud instance
//! metadata endpoint (`169.254.169.254`) answers.
//!
//! ```no_run
//! use metadata_gate::{MetadataReachabilityGate, Record};
//!
//! let gate = MetadataReachabilityGate::with_defaults()?;
//! let mut record = Record::new();
//! record.insert("msg".to_string(), "ok".into());
//! if let Some(record) = gate.evaluate("nagios.log", 1_700_000_000, record) {
//!     println!("{}", serde_json::Value::Object(record));
//! }
//! # Ok::<(), metadata_gate::GateError>(())
//! ```

pub mod async_gate;
pub mod config;
pub mod constants;
pub mod error;
pub mod gate;
pub mod logging;
pub mod metrics;
pub mod probe;
pub mod record;

pub use async_gate::AsyncMetadataGate;
pub use config::GateConfig;
pub use error::{GateError, ProbeError, ProbeErrorKind};
pub use gate::{GateBatchStats, MetadataReachabilityGate};
pub use probe::{
    AsyncMetadataProbe, MetadataDocument, MetadataProbe, ProbeOutcome, ReqwestAsyncProbe,
    ReqwestMetadataProbe,
};
pub use record::{Record, Verdict};
