// Transport configuration for building the portal's reqwest::Client.
//
// The portal has a fixed calling convention: every endpoint is a POST with
// the payload encoded as query parameters, the header set never varies, and
// redirects must not be followed (the frontend answers some failures with a
// redirect to an HTML login page instead of a JSON body).

use std::time::Duration;

use reqwest::header::{ACCEPT, CONNECTION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::Error;

/// Request timeout applied to every portal call. The portal can sit on a
/// request for minutes while it wakes a stove over its radio link.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(500);

/// Transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the portal's fixed header set.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("stufa/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(Error::CreateClient)
    }
}
