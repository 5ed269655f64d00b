use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::Instant;

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Instant a token has to outlive to be served from cache
pub fn renewal_deadline(now: DateTime<Utc>, renewal_buffer: Duration) -> DateTime<Utc> {
    let buffer = TimeDelta::from_std(renewal_buffer).unwrap_or(TimeDelta::MAX);
    now.checked_add_signed(buffer).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub fn get_instant() -> Instant {
    Instant::now()
}
