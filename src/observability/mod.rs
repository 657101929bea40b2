//! Observability subsystem.
//!
//! Logging only: every request runs inside a span carrying its method, URI
//! and `x-request-id`, and handlers emit structured events into it.

pub mod logging;
