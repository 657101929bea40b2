//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! validated JSON payload + ApiKey
//!     → client.rs (inject headers, POST, buffer response)
//!     → ForwardOutcome { Success | UpstreamError | TransportError }
//!     → http::response maps the outcome to the caller's response
//! ```

pub mod client;

pub use client::{ForwardOutcome, UpstreamClient, API_KEY_HEADER, API_VERSION, VERSION_HEADER};
