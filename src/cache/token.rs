use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Issued token together with the endpoint it grants access to.
/// Replaced as a whole on renewal, never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub expires_at: DateTime<Utc>,
    pub url: String,
}

impl Token {
    pub fn new(value: String, expires_at: DateTime<Utc>, url: String) -> Self {
        Self { value, expires_at, url }
    }

    /// True when the token expires before `deadline`
    pub fn expires_before(&self, deadline: DateTime<Utc>) -> bool {
        deadline > self.expires_at
    }

    pub fn to_auth_result(&self) -> AuthResult {
        AuthResult {
            url: self.url.to_owned(),
            token: self.value.to_owned(),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"***")
            .field("expires_at", &self.expires_at)
            .field("url", &self.url)
            .finish()
    }
}

/// What `authenticate()` hands to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResult {
    pub url: String,
    pub token: String,
}
