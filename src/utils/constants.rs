//! Shared constants and invariants

/// renew tokens 10s before they expire
pub const DEFAULT_RENEWAL_BUFFER_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

pub const DEFAULT_SERVICE: &str = "swift";
/// many OpenStack clouds use ceph radosgw to provide swift
pub const DEFAULT_FALLBACK_SERVICE: &str = "radosgw-swift";
pub const DEFAULT_INTERFACE: &str = "public";

pub const AUTH_TOKENS_PATH: &str = "/auth/tokens";
pub const SUBJECT_TOKEN_HEADER: &str = "x-subject-token";
pub const PASSWORD_METHOD: &str = "password";
