//! # Error
//!
//! Failures that can occur while issuing or serving a Keystone token.
use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

/// Boxed source for transport failures, independent of the HTTP client used.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Authentication error.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity service could not be reached.
    #[error("identity service request failed: {source}")]
    Transport {
        #[source]
        source: BoxError,
    },

    /// The identity service answered with a non-success status.
    #[error("identity service responded with status {status}")]
    HttpStatus { status: StatusCode },

    /// The identity exchange did not finish in time.
    #[error("identity exchange timed out after {0:?}")]
    Timeout(Duration),

    /// Token was issued, but the catalog has no usable endpoint for this account.
    #[error(
        "could not find {service} or {fallback} service with {interface} interface in catalog (region: {})",
        .region.as_deref().unwrap_or("any")
    )]
    CatalogResolution {
        service: String,
        fallback: String,
        interface: String,
        region: Option<String>,
    },

    /// Response misses the subject token header or expected body fields.
    #[error("malformed identity response: {0}")]
    MalformedResponse(String),
}

impl AuthError {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Transport { source: err.into() }
    }

    /// Short label used for metrics and events.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Transport { .. } => "transport",
            AuthError::HttpStatus { .. } => "http_status",
            AuthError::Timeout(_) => "timeout",
            AuthError::CatalogResolution { .. } => "catalog_resolution",
            AuthError::MalformedResponse(_) => "malformed_response",
        }
    }
}
