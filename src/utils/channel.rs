use chrono::{DateTime, Utc};
use tokio::sync::broadcast::{self, Sender};

const BUFFER_SIZE: usize = 50;

/// Lifecycle notifications published by the authenticator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    TokenIssued { url: String, expires_at: DateTime<Utc> },
    TokenReused { expires_at: DateTime<Utc> },
    IssueFailed { reason: &'static str },
}

pub fn run() -> Sender<AuthEvent> {
    let (event_sender, _) = broadcast::channel(BUFFER_SIZE);
    event_sender
}
