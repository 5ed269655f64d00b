// tests/common/mod.rs
pub use serde_json::json;

use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde_json::Value;

use crate::catalog::types::{CatalogEntry, Endpoint};
use crate::config::credentials::Credentials;
use crate::config::settings::{RenewalMode, SettingsConfig};
use crate::error::AuthError;
use crate::identity::request::AuthRequest;
use crate::identity::transport::{IdentityResponse, IdentityTransport};

pub const SWIFT_URL: &str = "https://swift.example/v1";

/// In-memory identity service: answers with scripted responses in order,
/// the last one is repeated once the script runs out.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<IdentityResponse, String>>>,
    requests: Mutex<Vec<(String, AuthRequest)>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<IdentityResponse, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, AuthRequest)> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self) -> Result<IdentityResponse, String> {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script
                .front()
                .cloned()
                .unwrap_or_else(|| Err("no scripted response".to_string()))
        }
    }
}

impl IdentityTransport for ScriptedTransport {
    async fn exchange(&self, url: &str, body: &AuthRequest, _timeout: Duration) -> Result<IdentityResponse, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((url.to_owned(), body.clone()));
        let next = self.next();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        next.map_err(AuthError::transport)
    }
}

pub fn make_headers(map: &[(&str, &str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (k, v) in map.iter() {
        let key = HeaderName::from_str(k).unwrap();
        let value = HeaderValue::from_str(v).unwrap();
        headers.insert(key, value);
    }
    headers
}

pub fn swift_catalog() -> Value {
    json!([{
        "name": "swift",
        "endpoints": [{"interface": "public", "region": "RegionOne", "url": SWIFT_URL}]
    }])
}

/// Successful identity response, expiry at `token.expires_at`
pub fn token_response(token: &str, expires_at: DateTime<Utc>, catalog: Value) -> Result<IdentityResponse, String> {
    Ok(IdentityResponse {
        status: StatusCode::CREATED,
        headers: make_headers(&[("x-subject-token", token)]),
        body: json!({"token": {"catalog": catalog, "expires_at": expires_at.to_rfc3339()}}).to_string(),
    })
}

pub fn status_response(status: StatusCode) -> Result<IdentityResponse, String> {
    Ok(IdentityResponse {
        status,
        headers: HeaderMap::new(),
        body: json!({"error": {"code": status.as_u16()}}).to_string(),
    })
}

pub fn credentials(auth_url: &str, region: Option<&str>) -> Credentials {
    Credentials {
        auth_url: auth_url.to_owned(),
        username: "demo".to_owned(),
        password: "secret".to_owned(),
        domain_id: "d1".to_owned(),
        project_id: "p1".to_owned(),
        region: region.map(str::to_owned),
    }
}

pub fn settings(renewal_mode: RenewalMode) -> SettingsConfig {
    SettingsConfig {
        renewal_mode,
        ..SettingsConfig::default()
    }
}

pub fn entry(name: &str, endpoints: Vec<Endpoint>) -> CatalogEntry {
    CatalogEntry {
        name: name.to_owned(),
        endpoints,
    }
}
