//! Fixed values for the instance metadata probe.
//!
//! The endpoint is the link-local address cloud hypervisors expose to guests
//! and is not configurable. Only the API version is.

/// Instance metadata document endpoint
pub const METADATA_ENDPOINT: &str = "http://169.254.169.254/metadata/instance";

/// Query parameter carrying the API version
pub const API_VERSION_PARAM: &str = "api-version";

/// API version used when no configuration is supplied
pub const DEFAULT_API_VERSION: &str = "2017-08-01";

/// Header the metadata service requires on every request
pub const METADATA_HEADER_NAME: &str = "Metadata";
pub const METADATA_HEADER_VALUE: &str = "true";

/// Upper bound on a single probe, in milliseconds
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Build the full probe URL for an endpoint and API version
pub fn probe_url(endpoint: &str, api_version: &str) -> String {
    format!("{}?{}={}", endpoint, API_VERSION_PARAM, api_version)
}
