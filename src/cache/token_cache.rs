use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::cache::token::Token;
use crate::helpers::time::renewal_deadline;

/// Holds at most one token. Readers get a shared snapshot, writers swap it whole.
#[derive(Debug, Default)]
pub struct TokenCache {
    inner: RwLock<Option<Arc<Token>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self { inner: RwLock::new(None) }
    }

    /// Current token, whatever its expiry
    pub async fn get(&self) -> Option<Arc<Token>> {
        self.inner.read().await.clone()
    }

    /// Current token if it outlives `now + renewal_buffer`
    pub async fn get_fresh(&self, now: DateTime<Utc>, renewal_buffer: Duration) -> Option<Arc<Token>> {
        let deadline = renewal_deadline(now, renewal_buffer);
        self.get().await.filter(|token| !token.expires_before(deadline))
    }

    /// Replace the cached token, returning the stored snapshot
    pub async fn set(&self, token: Token) -> Arc<Token> {
        let token = Arc::new(token);
        *self.inner.write().await = Some(token.clone());
        token
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }
}
