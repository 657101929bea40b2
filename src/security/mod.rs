//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (origin allow-list, preflight, CORS headers)
//!     → body limit (tower-http, configured in http::server)
//!     → Pass to handlers
//! ```

pub mod cors;

pub use cors::{OriginDecision, OriginGate};
