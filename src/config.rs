use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants::{self, DEFAULT_API_VERSION, DEFAULT_PROBE_TIMEOUT_MS, METADATA_ENDPOINT};
use crate::error::{GateError, Result};

/// Immutable probe configuration, fixed once at startup.
///
/// Loaded from a TOML table such as:
///
/// ```toml
/// api_version = "2017-08-01"
/// timeout_ms = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    #[serde(default = "default_api_version")]
    api_version: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl GateConfig {
    /// Sub-millisecond timeouts round up to the next whole millisecond
    pub fn new(api_version: impl Into<String>, timeout: Duration) -> Result<Self> {
        let timeout_ms = u64::try_from(timeout.as_nanos().div_ceil(1_000_000)).map_err(|_| {
            GateError::Config(format!("timeout {:?} does not fit in milliseconds", timeout))
        })?;
        let config = Self {
            api_version: api_version.into(),
            timeout_ms,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GateConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GateError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.api_version.trim().is_empty() {
            return Err(GateError::Config("api_version must not be empty".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(GateError::Config(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn probe_url(&self) -> String {
        constants::probe_url(METADATA_ENDPOINT, &self.api_version)
    }
}
