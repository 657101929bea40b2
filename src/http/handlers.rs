//! Route handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::http::response::{iso_timestamp, missing_credential, ErrorBody};
use crate::http::server::AppState;
use crate::upstream::ForwardOutcome;

pub const STATUS_MESSAGE: &str = "Claude relay is running";

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// `GET /` liveness signal. Independent of credential configuration.
pub async fn get_status() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: STATUS_MESSAGE,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: iso_timestamp(),
    })
}

/// `POST /api/claude`: inject the credential and forward the body verbatim.
pub async fn relay(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::warn!(
                status = %rejection.status(),
                reason = %rejection.body_text(),
                "Rejected inbound body"
            );
            return ErrorBody::new(rejection.body_text()).with_status(rejection.status());
        }
    };

    tracing::info!("Received Claude API request");

    let Some(api_key) = state.config.api_key.as_ref() else {
        tracing::error!("Claude API key not configured in environment variables");
        return missing_credential();
    };

    let outcome = state.upstream.forward(api_key, &payload).await;

    match &outcome {
        ForwardOutcome::Success { status, .. } => {
            tracing::info!(status = %status, "Claude API response forwarded");
        }
        ForwardOutcome::UpstreamError { status, body } => {
            tracing::error!(status = %status, body = %body, "Claude API responded with error");
        }
        ForwardOutcome::TransportError { message } => {
            tracing::error!(
                error = %message,
                upstream = %state.upstream.url(),
                "Relay call failed"
            );
        }
    }

    outcome.into_response()
}

/// Fallback for unknown paths.
pub async fn not_found() -> Response {
    ErrorBody::new("Not found").with_status(StatusCode::NOT_FOUND)
}
