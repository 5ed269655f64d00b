use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::{Receiver, Sender};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::token::{AuthResult, Token};
use crate::cache::token_cache::TokenCache;
use crate::catalog::endpoint_resolver::ServiceSelector;
use crate::config::credentials::Credentials;
use crate::config::settings::{RenewalMode, SettingsConfig};
use crate::error::AuthError;
use crate::helpers::time::{get_instant, now, renewal_deadline};
use crate::identity::parser::parse_token_response;
use crate::identity::request::AuthRequest;
use crate::identity::transport::{IdentityTransport, ReqwestTransport};
use crate::observability::metrics::get_metrics;
use crate::utils::channel::{self, AuthEvent};

static SUCCESS_MSG: &str = "success";
static ERROR_MSG: &str = "error";

// `identity_exchange_requests` trigger labels
static TRIGGER_INITIAL: &str = "initial";
static TRIGGER_RENEWAL: &str = "renewal";
static TRIGGER_SHORT_LIVED: &str = "short_lived";
static TRIGGER_DIRECT: &str = "direct";

/// Issues project scoped tokens and serves them from cache until they get
/// within the renewal buffer of their expiry.
///
/// Renewal happens on demand inside [`TokenAuthenticator::authenticate`],
/// there is no background task. A failed renewal never touches the cached
/// token.
#[derive(Debug)]
pub struct TokenAuthenticator<T = ReqwestTransport> {
    credentials: Credentials,
    selector: ServiceSelector,
    renewal_buffer: Duration,
    request_timeout: Duration,
    renewal_mode: RenewalMode,
    transport: T,
    cache: TokenCache,
    refresh_gate: Mutex<()>,
    events: Sender<AuthEvent>,
}

impl TokenAuthenticator<ReqwestTransport> {
    pub fn new(credentials: Credentials, settings: &SettingsConfig) -> Self {
        Self::with_transport(credentials, settings, ReqwestTransport::default())
    }
}

impl<T: IdentityTransport> TokenAuthenticator<T> {
    pub fn with_transport(credentials: Credentials, settings: &SettingsConfig, transport: T) -> Self {
        Self {
            credentials,
            selector: ServiceSelector::from(&settings.catalog),
            renewal_buffer: settings.renewal_buffer(),
            request_timeout: settings.request_timeout(),
            renewal_mode: settings.renewal_mode,
            transport,
            cache: TokenCache::new(),
            refresh_gate: Mutex::new(()),
            events: channel::run(),
        }
    }

    /// Receive lifecycle events published after this call
    pub fn subscribe(&self) -> Receiver<AuthEvent> {
        self.events.subscribe()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Cached token, possibly already inside the renewal buffer
    pub async fn current_token(&self) -> Option<Arc<Token>> {
        self.cache.get().await
    }

    /// Drop the cached token so the next call issues a new one,
    /// e.g. after the service rejected it
    pub async fn invalidate(&self) {
        self.cache.clear().await;
        info!("cached token invalidated");
    }

    /// Current `{url, token}` pair, renewing the token when needed
    pub async fn authenticate(&self) -> Result<AuthResult, AuthError> {
        self.authenticate_within(self.request_timeout).await
    }

    /// Same as [`authenticate`](Self::authenticate) with a caller supplied
    /// bound on the identity exchange
    pub async fn authenticate_within(&self, timeout: Duration) -> Result<AuthResult, AuthError> {
        if let Some(token) = self.cached_fresh().await {
            get_metrics().await.cache_hits.inc();
            debug!(expires_at = %token.expires_at, "serving cached token");
            let _ = self.events.send(AuthEvent::TokenReused { expires_at: token.expires_at });
            return Ok(token.to_auth_result());
        }

        let token = match self.renewal_mode {
            RenewalMode::Concurrent => self.renew(timeout).await?,
            RenewalMode::SingleFlight => {
                let _gate = self.refresh_gate.lock().await;
                // the previous gate holder may have renewed already, its
                // token is not counted as a cache hit
                match self.cached_fresh().await {
                    Some(token) => {
                        debug!(expires_at = %token.expires_at, "reusing token renewed by concurrent caller");
                        token
                    }
                    None => self.renew(timeout).await?,
                }
            }
        };

        Ok(token.to_auth_result())
    }

    async fn cached_fresh(&self) -> Option<Arc<Token>> {
        self.cache.get_fresh(now(), self.renewal_buffer).await
    }

    /// Issue and cache a token. A token issued already inside the renewal
    /// buffer is replaced once more, the second one is served as is.
    async fn renew(&self, timeout: Duration) -> Result<Arc<Token>, AuthError> {
        let trigger = match self.cache.get().await {
            Some(stale) => {
                info!(expires_at = %stale.expires_at, "cached token expires within renewal buffer, renewing");
                TRIGGER_RENEWAL
            }
            None => {
                info!("no cached token, issuing");
                TRIGGER_INITIAL
            }
        };

        let token = self.issue_and_cache(trigger, timeout).await?;
        if !token.expires_before(renewal_deadline(now(), self.renewal_buffer)) {
            return Ok(token);
        }

        warn!(expires_at = %token.expires_at, "issued token expires within renewal buffer, issuing again");
        self.issue_and_cache(TRIGGER_SHORT_LIVED, timeout).await
    }

    async fn issue_and_cache(&self, trigger: &'static str, timeout: Duration) -> Result<Arc<Token>, AuthError> {
        let token = self.cache.set(self.issue_new_token_within(trigger, timeout).await?).await;
        get_metrics().await.token_expiry_unix.set(token.expires_at.timestamp());
        let _ = self.events.send(AuthEvent::TokenIssued {
            url: token.url.to_owned(),
            expires_at: token.expires_at,
        });
        Ok(token)
    }

    /// Exchange credentials for a new token and resolve the service url.
    /// The result is not cached.
    pub async fn issue_new_token(&self) -> Result<Token, AuthError> {
        self.issue_new_token_within(TRIGGER_DIRECT, self.request_timeout).await
    }

    async fn issue_new_token_within(&self, trigger: &'static str, timeout: Duration) -> Result<Token, AuthError> {
        let metrics = get_metrics().await;
        let start = get_instant();
        metrics.identity_exchange_requests.with_label_values(&[trigger]).inc();

        let result = self.exchange_and_resolve(timeout).await;
        match &result {
            Ok(token) => {
                metrics
                    .identity_exchange_duration
                    .with_label_values(&[SUCCESS_MSG])
                    .observe(start.elapsed().as_secs_f64());
                info!(url = %token.url, expires_at = %token.expires_at, "token issued");
            }
            Err(err) => {
                metrics
                    .identity_exchange_duration
                    .with_label_values(&[ERROR_MSG])
                    .observe(start.elapsed().as_secs_f64());
                metrics
                    .identity_exchange_failures
                    .with_label_values(&[err.reason()])
                    .inc();
                warn!(reason = err.reason(), error = %err, "token issuing failed");
                let _ = self.events.send(AuthEvent::IssueFailed { reason: err.reason() });
            }
        }
        result
    }

    async fn exchange_and_resolve(&self, timeout: Duration) -> Result<Token, AuthError> {
        let url = self.credentials.tokens_url();
        let body = AuthRequest::from(&self.credentials);
        debug!(
            url = %url,
            user = %self.credentials.username,
            project = %self.credentials.project_id,
            "requesting token"
        );

        let response = tokio::time::timeout(timeout, self.transport.exchange(&url, &body, timeout))
            .await
            .map_err(|_| AuthError::Timeout(timeout))??;

        if !response.status.is_success() {
            return Err(AuthError::HttpStatus { status: response.status });
        }

        let issued = parse_token_response(&response.headers, &response.body)?;
        let service_url = self
            .selector
            .resolve(&issued.catalog, self.credentials.region.as_deref())?;

        Ok(Token::new(issued.value, issued.expires_at, service_url))
    }
}
