//! Origin gate middleware.
//! Admits requests without an `Origin` header or with an allow-listed one,
//! answers preflights, and decorates responses with CORS headers.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{
            HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_REQUEST_HEADERS, CONTENT_LENGTH, ORIGIN, VARY,
        },
        Method, Request, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Methods advertised to allowed origins on preflight.
pub const ALLOWED_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";

/// Body of the rejection sent to disallowed origins.
pub const REJECTION_MESSAGE: &str = "Not allowed by CORS";

/// Verdict for a single request's `Origin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginDecision {
    /// No `Origin` header: curl, server-to-server, mobile clients.
    NoOrigin,
    Allowed,
    Rejected,
}

/// Immutable origin allow-list, built once at startup.
#[derive(Debug, Clone)]
pub struct OriginGate {
    allowed: Arc<HashSet<String>>,
}

impl OriginGate {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Arc::new(origins.into_iter().map(Into::into).collect()),
        }
    }

    /// Exact string match; no normalisation of the caller's value. An empty
    /// header counts as absent.
    pub fn check(&self, origin: Option<&str>) -> OriginDecision {
        match origin.filter(|origin| !origin.is_empty()) {
            None => OriginDecision::NoOrigin,
            Some(origin) if self.allowed.contains(origin) => OriginDecision::Allowed,
            Some(_) => OriginDecision::Rejected,
        }
    }

    /// Allow-list rendered for diagnostics, sorted for stable output.
    pub fn describe(&self) -> String {
        let mut origins: Vec<&str> = self.allowed.iter().map(String::as_str).collect();
        origins.sort_unstable();
        origins.join(", ")
    }
}

pub async fn cors_middleware(
    State(gate): State<OriginGate>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .filter(|value| !value.is_empty())
        .cloned();

    // Non-UTF-8 origins can never equal an allow-list entry.
    let origin_str = origin
        .as_ref()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    if gate.check(origin_str.as_deref()) == OriginDecision::Rejected {
        tracing::warn!(
            origin = origin_str.as_deref().unwrap_or_default(),
            allowed = %gate.describe(),
            "CORS: blocking request from unauthorized origin"
        );
        return (StatusCode::FORBIDDEN, REJECTION_MESSAGE).into_response();
    }

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        let headers = response.headers_mut();
        apply_origin_headers(headers, origin);
        apply_preflight_headers(headers, request.headers());
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        return response;
    }

    let mut response = next.run(request).await;
    apply_origin_headers(response.headers_mut(), origin);
    response
}

fn apply_origin_headers(headers: &mut HeaderMap, origin: Option<HeaderValue>) {
    headers.append(VARY, HeaderValue::from_static("Origin"));
    if let Some(origin) = origin {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
    }
}

fn apply_preflight_headers(headers: &mut HeaderMap, request_headers: &HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
    if let Some(requested) = request_headers.get(ACCESS_CONTROL_REQUEST_HEADERS) {
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
        headers.append(VARY, HeaderValue::from_static("Access-Control-Request-Headers"));
    }
}
