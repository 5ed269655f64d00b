//! # Keystone Auth Library
//!
//! Exchanges Keystone v3 password credentials for a project scoped token,
//! resolves the object storage endpoint from the returned service catalog,
//! and caches the token until it gets close to expiry.
//!
//! Modules:
//! - `config` — service configuration and credentials
//! - `catalog` — service catalog model and endpoint resolution
//! - `identity` — request construction, transport, response parsing, authenticator
//! - `cache` — token entity and single slot cache

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod helpers;
pub mod identity;
pub mod observability;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::cache::token::{AuthResult, Token};
pub use crate::catalog::endpoint_resolver::{find_endpoint_url, ServiceSelector};
pub use crate::config::credentials::Credentials;
pub use crate::config::service::ServiceConfig;
pub use crate::error::AuthError;
pub use crate::identity::authenticator::TokenAuthenticator;
