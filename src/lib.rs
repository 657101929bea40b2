//! Claude relay library.
//!
//! A minimal HTTP relay that admits callers from an allow-listed frontend
//! origin, injects a server-held API key, and forwards JSON bodies verbatim
//! to the Anthropic Messages API.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod upstream;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
