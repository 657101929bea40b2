//! Startup errors.
//!
//! Request-time failures never surface here; they are mapped to HTTP
//! responses by the handlers and the process keeps serving.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid upstream url: {0}")]
    UpstreamUrl(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
