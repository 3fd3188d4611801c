use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// A fully built `repository_dispatch` POST, ready to go on the wire
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

/// The HTTP status and raw body text of a received response
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

/// Trait defining the outbound HTTP operation required by the library
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver the request as an HTTP POST and return the response
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received (DNS failure, refused
    /// connection, timeout) or if the response body could not be read
    async fn send(&self, request: &WireRequest) -> Result<WireResponse>;
}

/// Implementation of the transport using a reqwest client
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh `reqwest::Client`
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Creates a transport over an existing client, e.g. one carrying a
    /// caller-configured timeout or proxy
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn send(&self, request: &WireRequest) -> Result<WireResponse> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .json(&request.body)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        debug!(status = status, body_length = body.len(), "Response received");
        Ok(WireResponse { status, body })
    }
}
