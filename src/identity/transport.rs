use std::future::Future;
use std::time::Duration;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};
use reqwest::Client;
use tracing::debug;

use crate::error::AuthError;
use crate::identity::request::AuthRequest;

/// Raw answer of the identity service
#[derive(Debug, Clone)]
pub struct IdentityResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Sends the credential exchange request. Retries, TLS and proxies are the
/// implementation's business.
pub trait IdentityTransport: Send + Sync {
    fn exchange(
        &self,
        url: &str,
        body: &AuthRequest,
        timeout: Duration,
    ) -> impl Future<Output = Result<IdentityResponse, AuthError>> + Send;
}

/// reqwest backed transport
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl IdentityTransport for ReqwestTransport {
    async fn exchange(
        &self,
        url: &str,
        body: &AuthRequest,
        timeout: Duration,
    ) -> Result<IdentityResponse, AuthError> {
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;

        let status = response.status();
        let headers: HeaderMap = response.headers().clone();
        let body = response.text().await.map_err(|e| map_reqwest_error(e, timeout))?;
        debug!(%status, "identity service responded");

        Ok(IdentityResponse { status, headers, body })
    }
}

fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> AuthError {
    if err.is_timeout() {
        AuthError::Timeout(timeout)
    } else {
        AuthError::transport(err)
    }
}
