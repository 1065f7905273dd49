use std::time::Duration;
use thiserror::Error;

/// Errors raised while building a gate. Evaluating a record never fails;
/// probe failures are expressed as [`ProbeError`] and turned into drops.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("HTTP client construction failed: {0}")]
    Client(#[from] reqwest::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GateError>;

/// Why a single metadata probe did not produce a usable document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("metadata endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("metadata request timed out after {0:?}")]
    Timeout(Duration),

    #[error("metadata endpoint returned status {0}")]
    Status(u16),

    #[error("metadata endpoint returned an empty body")]
    EmptyBody,

    #[error("metadata probe cancelled")]
    Cancelled,

    #[error("unexpected metadata probe failure: {0}")]
    Unexpected(String),
}

/// Stable, low-cardinality label for a probe failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeErrorKind {
    Unreachable,
    Timeout,
    Status,
    EmptyBody,
    Cancelled,
    Unexpected,
}

impl ProbeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeErrorKind::Unreachable => "unreachable",
            ProbeErrorKind::Timeout => "timeout",
            ProbeErrorKind::Status => "status",
            ProbeErrorKind::EmptyBody => "empty_body",
            ProbeErrorKind::Cancelled => "cancelled",
            ProbeErrorKind::Unexpected => "unexpected",
        }
    }
}

impl std::fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProbeError {
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::Unreachable(_) => ProbeErrorKind::Unreachable,
            ProbeError::Timeout(_) => ProbeErrorKind::Timeout,
            ProbeError::Status(_) => ProbeErrorKind::Status,
            ProbeError::EmptyBody => ProbeErrorKind::EmptyBody,
            ProbeError::Cancelled => ProbeErrorKind::Cancelled,
            ProbeError::Unexpected(_) => ProbeErrorKind::Unexpected,
        }
    }

    /// Classify a reqwest failure. `timeout` is the configured bound, reported
    /// back in the error since reqwest does not carry it.
    pub fn from_reqwest(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout(timeout)
        } else if let Some(status) = err.status() {
            ProbeError::Status(status.as_u16())
        } else if err.is_connect() || err.is_request() {
            ProbeError::Unreachable(err.to_string())
        } else {
            ProbeError::Unexpected(err.to_string())
        }
    }
}
