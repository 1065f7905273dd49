//! Instance metadata probes.
//!
//! A probe performs exactly one request per call and never caches. The
//! blocking flavour backs [`crate::gate::MetadataReachabilityGate`]; the async
//! flavour backs [`crate::async_gate::AsyncMetadataGate`].

pub mod async_probe;
pub mod blocking;

pub use async_probe::{AsyncMetadataProbe, ReqwestAsyncProbe};
pub use blocking::ReqwestMetadataProbe;

use crate::error::ProbeError;

/// Body returned by a successful probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDocument {
    pub body: String,
}

impl MetadataDocument {
    /// Any non-empty body counts as a document, whatever its content
    pub fn from_body(body: String) -> Result<Self, ProbeError> {
        if body.is_empty() {
            return Err(ProbeError::EmptyBody);
        }
        Ok(Self { body })
    }
}

/// Result of a single network attempt
pub type ProbeOutcome = Result<MetadataDocument, ProbeError>;

/// Synchronous metadata reachability check
pub trait MetadataProbe: Send + Sync {
    fn probe(&self) -> ProbeOutcome;
}

impl<P: MetadataProbe + ?Sized> MetadataProbe for std::sync::Arc<P> {
    fn probe(&self) -> ProbeOutcome {
        (**self).probe()
    }
}

impl<P: MetadataProbe + ?Sized> MetadataProbe for Box<P> {
    fn probe(&self) -> ProbeOutcome {
        (**self).probe()
    }
}

/// Map an HTTP status and body to an outcome
pub(crate) fn classify_response(status: u16, body: String) -> ProbeOutcome {
    if !(200..300).contains(&status) {
        return Err(ProbeError::Status(status));
    }
    MetadataDocument::from_body(body)
}
