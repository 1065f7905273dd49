use serde_json::{Map, Value};

use crate::error::ProbeErrorKind;

/// One ingested log line. The gate never looks inside it.
pub type Record = Map<String, Value>;

/// Pass/drop decision for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Probe succeeded, forward the record unchanged
    Pass,
    /// Probe failed, produce no output for this record
    Drop(ProbeErrorKind),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    /// Apply the decision to a record
    pub fn apply(self, record: Record) -> Option<Record> {
        match self {
            Verdict::Pass => Some(record),
            Verdict::Drop(_) => None,
        }
    }
}
