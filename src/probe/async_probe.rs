use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::{classify_response, ProbeOutcome};
use crate::config::GateConfig;
use crate::constants::{self, METADATA_ENDPOINT, METADATA_HEADER_NAME, METADATA_HEADER_VALUE};
use crate::error::{ProbeError, Result};

/// Async metadata reachability check. Dropping the returned future aborts
/// the request.
#[async_trait]
pub trait AsyncMetadataProbe: Send + Sync {
    async fn probe(&self) -> ProbeOutcome;
}

#[async_trait]
impl<P: AsyncMetadataProbe + ?Sized> AsyncMetadataProbe for std::sync::Arc<P> {
    async fn probe(&self) -> ProbeOutcome {
        (**self).probe().await
    }
}

pub struct ReqwestAsyncProbe {
    client: Client,
    url: String,
    timeout: Duration,
}

impl ReqwestAsyncProbe {
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

#[async_trait]
impl AsyncMetadataProbe for ReqwestAsyncProbe {
    async fn probe(&self) -> ProbeOutcome {
        debug!(url = %self.url, "probing instance metadata");
        let resp = self
            .client
            .get(&self.url)
            .header(METADATA_HEADER_NAME, METADATA_HEADER_VALUE)
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(&e, self.timeout))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ProbeError::from_reqwest(&e, self.timeout))?;
        classify_response(status, body)
    }
}
