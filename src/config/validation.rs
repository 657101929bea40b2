//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that allow-list entries are exact browser origins
//! - Check that the upstream URL is an absolute http(s) URL
//!
//! Returns all validation errors, not just the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid allowed origin `{origin}`: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("invalid upstream url `{url}`: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for origin in &config.cors.allowed_origins {
        if let Err(reason) = check_origin(origin) {
            errors.push(ValidationError::InvalidOrigin {
                origin: origin.clone(),
                reason,
            });
        }
    }

    if let Err(reason) = check_upstream_url(&config.upstream.url) {
        errors.push(ValidationError::InvalidUpstreamUrl {
            url: config.upstream.url.clone(),
            reason,
        });
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An allow-list entry must be byte-identical to what a browser sends in
/// `Origin`, otherwise the exact-match gate can never admit it.
fn check_origin(origin: &str) -> Result<(), String> {
    let parsed = Url::parse(origin).map_err(|e| e.to_string())?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", parsed.scheme()));
    }

    let canonical = parsed.origin().ascii_serialization();
    if canonical != origin {
        return Err(format!("not in canonical origin form, expected `{}`", canonical));
    }

    Ok(())
}

fn check_upstream_url(raw: &str) -> Result<(), String> {
    let parsed = Url::parse(raw).map_err(|e| e.to_string())?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", parsed.scheme()));
    }
    if parsed.host_str().is_none() {
        return Err("missing host".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn test_origin_forms() {
        assert!(check_origin("https://mtgscanner.com").is_ok());
        assert!(check_origin("http://localhost:5173").is_ok());

        // Trailing slash, path, default port and upper case never match a browser Origin.
        assert!(check_origin("https://mtgscanner.com/").is_err());
        assert!(check_origin("https://mtgscanner.com/app").is_err());
        assert!(check_origin("https://mtgscanner.com:443").is_err());
        assert!(check_origin("https://MTGScanner.com").is_err());
        assert!(check_origin("ftp://mtgscanner.com").is_err());
        assert!(check_origin("mtgscanner.com").is_err());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RelayConfig::default();
        config.cors.allowed_origins = vec![
            "nope".into(),
            "https://ok.example".into(),
            "https://a.example/".into(),
        ];
        config.upstream.url = "not a url".into();
        config.limits.max_body_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(
            &errors[0],
            ValidationError::InvalidOrigin { origin, .. } if origin == "nope"
        ));
        assert!(matches!(
            &errors[1],
            ValidationError::InvalidOrigin { origin, .. } if origin == "https://a.example/"
        ));
        assert!(matches!(errors[2], ValidationError::InvalidUpstreamUrl { .. }));
        assert_eq!(errors[3], ValidationError::ZeroBodyLimit);
    }
}
