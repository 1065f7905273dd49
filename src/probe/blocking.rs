use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use super::{classify_response, MetadataProbe, ProbeOutcome};
use crate::config::GateConfig;
use crate::constants::{self, METADATA_ENDPOINT, METADATA_HEADER_NAME, METADATA_HEADER_VALUE};
use crate::error::{ProbeError, Result};

/// Blocking probe against the instance metadata endpoint.
///
/// The request is bounded by the configured timeout, covering connect and body read.
/// Proxies are bypassed since the endpoint is link-local.
pub struct ReqwestMetadataProbe {
    client: Client,
    url: String,
    timeout: Duration,
}

impl ReqwestMetadataProbe {
    pub fn new(config: &GateConfig) -> Result<Self> {
        Self::with_endpoint(config, METADATA_ENDPOINT)
    }

    pub(crate) fn with_endpoint(config: &GateConfig, endpoint: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .no_proxy()
            .build()?;
        Ok(Self {
            client,
            url: constants::probe_url(endpoint, config.api_version()),
            timeout: config.timeout(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MetadataProbe for ReqwestMetadataProbe {
    fn probe(&self) -> ProbeOutcome {
        debug!(url = %self.url, "probing instance metadata");
        let resp = self
            .client
            .get(&self.url)
            .header(METADATA_HEADER_NAME, METADATA_HEADER_VALUE)
            .send()
            .map_err(|e| ProbeError::from_reqwest(&e, self.timeout))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| ProbeError::from_reqwest(&e, self.timeout))?;
        classify_response(status, body)
    }
}
