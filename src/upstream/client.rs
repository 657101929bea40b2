//! Credential injection and passthrough forwarding.
//!
//! # Responsibilities
//! - POST the inbound JSON payload, re-serialized unchanged, to the upstream
//! - Attach the server-held credential and the fixed protocol-version header
//! - Buffer the whole upstream response and classify it as a [`ForwardOutcome`]
//!
//! No retries and no timeout beyond the transport default: a slow upstream
//! holds the caller's connection open until it answers or fails.

use std::error::Error as StdError;

use axum::http::{
    header::{HeaderValue, InvalidHeaderValue, CONTENT_TYPE},
    StatusCode,
};
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;

use crate::config::{ApiKey, UpstreamConfig};
use crate::error::RelayError;

/// Header carrying the upstream credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the upstream protocol version.
pub const VERSION_HEADER: &str = "anthropic-version";

/// Protocol version sent on every upstream call.
pub const API_VERSION: &str = "2023-06-01";

/// Result of a single forwarding attempt.
#[derive(Debug)]
pub enum ForwardOutcome {
    /// Upstream answered 2xx with a JSON body.
    Success { status: StatusCode, body: Value },
    /// Upstream answered non-2xx; body kept as raw text.
    UpstreamError { status: StatusCode, body: String },
    /// The call never produced a usable response.
    TransportError { message: String },
}

#[derive(Debug, Error)]
enum ForwardError {
    #[error("invalid credential header value")]
    Credential(#[from] InvalidHeaderValue),

    #[error("{}", error_chain(.0))]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON in upstream response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Render an error together with its sources, e.g.
/// `error sending request for url (...): client error (Connect): tcp connect error`.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Client for the fixed upstream endpoint.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    url: Url,
}

impl UpstreamClient {
    /// Build a client for the configured upstream.
    pub fn new(config: &UpstreamConfig) -> Result<Self, RelayError> {
        let url = Url::parse(&config.url)?;
        let http = Client::builder()
            .user_agent(concat!("claude-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, url })
    }

    /// The endpoint requests are sent to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Forward `payload` with `api_key` injected. Exactly one outbound call
    /// is made per invocation; failures are folded into the outcome.
    pub async fn forward(&self, api_key: &ApiKey, payload: &Value) -> ForwardOutcome {
        match self.try_forward(api_key, payload).await {
            Ok(outcome) => outcome,
            Err(e) => ForwardOutcome::TransportError {
                message: e.to_string(),
            },
        }
    }

    async fn try_forward(
        &self,
        api_key: &ApiKey,
        payload: &Value,
    ) -> Result<ForwardOutcome, ForwardError> {
        let mut credential = HeaderValue::from_str(api_key.expose())?;
        credential.set_sensitive(true);

        let response = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, credential)
            .header(VERSION_HEADER, API_VERSION)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are not guaranteed to be JSON.
            let body = response.text().await?;
            return Ok(ForwardOutcome::UpstreamError { status, body });
        }

        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)?;
        Ok(ForwardOutcome::Success { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Leaf;

    impl fmt::Display for Leaf {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl StdError for Leaf {}

    #[derive(Debug)]
    struct Outer(Leaf);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("error sending request")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain_includes_sources() {
        assert_eq!(error_chain(&Outer(Leaf)), "error sending request: connection refused");
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let config = UpstreamConfig { url: "::not a url::".into() };
        assert!(matches!(UpstreamClient::new(&config), Err(RelayError::UpstreamUrl(_))));
    }

    #[tokio::test]
    async fn test_invalid_credential_is_a_transport_error() {
        let client = UpstreamClient::new(&UpstreamConfig::default()).unwrap();
        let key = ApiKey::new("bad\nkey").unwrap();

        match client.forward(&key, &serde_json::json!({})).await {
            ForwardOutcome::TransportError { message } => {
                assert_eq!(message, "invalid credential header value");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
