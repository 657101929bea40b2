//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, body limit)
//!     → security::cors (origin gate, preflight)
//!     → handlers.rs (status, relay, fallback)
//!     → upstream::client (forward)
//!     → response.rs (map outcome to status + JSON)
//!     → Send to client
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer, X_REQUEST_ID};
