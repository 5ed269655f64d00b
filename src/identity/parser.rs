use chrono::{DateTime, Utc};
use http::HeaderMap;
use serde::Deserialize;
use tracing::{debug, error};

use crate::catalog::types::Catalog;
use crate::error::AuthError;
use crate::utils::constants::SUBJECT_TOKEN_HEADER;

/// Token as returned by the identity service, before endpoint resolution
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
    pub catalog: Catalog,
}

#[derive(Debug, Deserialize)]
struct TokenResponseBody {
    expires_at: Option<String>,
    token: Option<TokenBody>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    catalog: Option<Catalog>,
    expires_at: Option<String>,
}

/// Extract the subject token header, catalog and expiry.
///
/// Expiry is read from the body-level `expires_at` first and from
/// `token.expires_at` when the former is absent.
pub fn parse_token_response(headers: &HeaderMap, body: &str) -> Result<IssuedToken, AuthError> {
    let value = get_header_value(headers, SUBJECT_TOKEN_HEADER)?;

    let response: TokenResponseBody = serde_json::from_str(body).map_err(|e| {
        error!(error = %e, "identity response body is not valid JSON");
        AuthError::MalformedResponse(format!("invalid body: {}", e))
    })?;

    let token = response
        .token
        .ok_or_else(|| AuthError::MalformedResponse("body field 'token' not found".to_string()))?;

    let raw_expires_at = response
        .expires_at
        .or(token.expires_at)
        .ok_or_else(|| AuthError::MalformedResponse("neither 'expires_at' nor 'token.expires_at' found".to_string()))?;
    let expires_at = parse_expires_at(&raw_expires_at)?;

    let catalog = token
        .catalog
        .ok_or_else(|| AuthError::MalformedResponse("body field 'token.catalog' not found".to_string()))?;

    debug!(%expires_at, services = catalog.len(), "identity response parsed");
    Ok(IssuedToken { value, expires_at, catalog })
}

/// ISO 8601 / RFC 3339 timestamp with offset, e.g. `2099-01-01T00:00:00.000000Z`
pub fn parse_expires_at(raw: &str) -> Result<DateTime<Utc>, AuthError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|expires_at| expires_at.with_timezone(&Utc))
        .map_err(|e| AuthError::MalformedResponse(format!("invalid expires_at '{}': {}", raw, e)))
}

fn get_header_value(headers: &HeaderMap, key: &str) -> Result<String, AuthError> {
    let value = headers
        .get(key)
        .ok_or_else(|| AuthError::MalformedResponse(format!("header '{}' not found", key)))?
        .to_str()
        .map(|s| s.trim().to_owned())
        .map_err(|e| AuthError::MalformedResponse(format!("invalid header '{}': {}", key, e)))?;

    if value.is_empty() {
        return Err(AuthError::MalformedResponse(format!("header '{}' is empty", key)));
    }
    Ok(value)
}
