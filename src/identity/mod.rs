//! Keystone v3 credential exchange and token renewal.

pub mod authenticator;
pub mod parser;
pub mod request;
pub mod transport;

pub use authenticator::TokenAuthenticator;
pub use transport::{IdentityResponse, IdentityTransport, ReqwestTransport};
