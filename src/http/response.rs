//! Response envelopes.
//!
//! # Responsibilities
//! - Map each [`ForwardOutcome`] tag to the caller's response
//! - Build the uniform JSON error envelopes
//! - Render ISO8601 timestamps
//!
//! Upstream bodies are never rewritten on success; error bodies are wrapped
//! so the caller always receives JSON.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::upstream::ForwardOutcome;

pub const MISSING_KEY_MESSAGE: &str = "Server configuration error: Claude API key missing.";
pub const TRANSPORT_ERROR_MESSAGE: &str = "Internal server error from Claude proxy";

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// JSON error body. Absent fields are omitted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            message: None,
            timestamp: None,
        }
    }

    /// `{error, details}` for a non-2xx upstream answer.
    pub fn upstream(status: StatusCode, details: String) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown Status");
        Self {
            details: Some(details),
            ..Self::new(format!("Claude API responded with error: {}", reason))
        }
    }

    /// `{error, message, timestamp}` for a local or network failure.
    pub fn transport(message: String) -> Self {
        Self {
            message: Some(message),
            timestamp: Some(iso_timestamp()),
            ..Self::new(TRANSPORT_ERROR_MESSAGE)
        }
    }

    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for ForwardOutcome {
    fn into_response(self) -> Response {
        match self {
            ForwardOutcome::Success { status, body } => (status, Json(body)).into_response(),
            ForwardOutcome::UpstreamError { status, body } => {
                ErrorBody::upstream(status, body).with_status(status)
            }
            ForwardOutcome::TransportError { message } => {
                ErrorBody::transport(message).with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Missing credential, reported before any upstream call.
pub fn missing_credential() -> Response {
    ErrorBody::new(MISSING_KEY_MESSAGE).with_status(StatusCode::INTERNAL_SERVER_ERROR)
}
