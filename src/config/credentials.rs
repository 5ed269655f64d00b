use std::{env, fmt, fs};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// ================================
/// Credentials as written in the config file
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct CredentialsConfig {
    /// identity service base url, e.g. https://keystone.example/v3
    pub auth_url: String,
    pub username: SecretValue,
    pub password: SecretValue,
    pub domain_id: String,
    pub project_id: String,
    pub region: Option<String>,
}

/// Where a credential value comes from
#[derive(Deserialize, Clone)]
#[serde(untagged)]
pub enum SecretValue {
    Literal {
        value: String,
    },
    FromEnv {
        from_env: String,
    },
    FromFile {
        path: String,
    },
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretValue::Literal { .. } => f.write_str("Literal(***)"),
            SecretValue::FromEnv { from_env } => write!(f, "FromEnv({from_env})"),
            SecretValue::FromFile { path } => write!(f, "FromFile({path})"),
        }
    }
}

impl SecretValue {
    pub fn resolve(&self) -> Result<String> {
        match self {
            SecretValue::Literal { value } => Ok(value.to_owned()),
            SecretValue::FromEnv { from_env } => {
                env::var(from_env).map_err(|err| anyhow!("env variable '{}': {}", from_env, err))
            }
            SecretValue::FromFile { path } => fs::read_to_string(path)
                .with_context(|| format!("reading secret file '{}'", path))
                .map(|res| res.trim().to_string()),
        }
    }
}

impl CredentialsConfig {
    /// Materialize every secret into plain credentials
    pub fn resolve(&self) -> Result<Credentials> {
        Ok(Credentials {
            auth_url: self.auth_url.to_owned(),
            username: self.username.resolve().context("credentials.username")?,
            password: self.password.resolve().context("credentials.password")?,
            domain_id: self.domain_id.to_owned(),
            project_id: self.project_id.to_owned(),
            region: self.region.to_owned().filter(|region| !region.is_empty()),
        })
    }
}

/// Credentials exchanged for a project scoped token. Immutable for the session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub domain_id: String,
    pub project_id: String,
    pub region: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_url", &self.auth_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("domain_id", &self.domain_id)
            .field("project_id", &self.project_id)
            .field("region", &self.region)
            .finish()
    }
}

impl Credentials {
    /// `<auth_url>/auth/tokens`, tolerating a trailing slash on the base url
    pub fn tokens_url(&self) -> String {
        format!(
            "{}{}",
            self.auth_url.trim_end_matches('/'),
            crate::utils::constants::AUTH_TOKENS_PATH
        )
    }
}
