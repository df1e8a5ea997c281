use std::time::Duration;

use langpack::{Response, Transport, TransportError};
use tracing::debug;

/// Sent with every request so mirror operators can identify the client.
pub const USER_AGENT: &str = concat!("langpack/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `Transport` over HTTP(S).
///
/// Any status the server answers with is returned as a [`Response`]; only
/// failures to complete the exchange become errors.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Network {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        let network = |e: reqwest::Error| TransportError::Network {
            url: url.to_owned(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network)?;

        debug!(%url, status, bytes = body.len(), "received response");
        Ok(Response::new(status, body.to_vec()))
    }
}
