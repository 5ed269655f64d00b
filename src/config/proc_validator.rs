//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Validates:
//!   * identity url scheme
//!   * mandatory credential fields
//!   * timeout / renewal buffer bounds
//!   * catalog service names and interface

use tracing::{error, info};

use crate::config::credentials::{CredentialsConfig, SecretValue};
use crate::config::service::ServiceConfig;
use crate::config::settings::{CatalogConfig, SettingsConfig};
use crate::observability::metrics::get_metrics;

const ALLOWED_INTERFACES: [&str; 3] = ["public", "internal", "admin"];
const ALLOWED_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_credentials(&cfg.credentials, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        get_metrics().await.config_validation_errors.inc();
        Err(errors)
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.request_timeout_ms == 0 {
        errors.push("settings.request_timeout_ms must be greater than 0".to_string());
    }

    if settings.renewal_buffer_seconds > 60 * 60 * 24 {
        errors.push(format!(
            "settings.renewal_buffer_seconds ({}) is unreasonably large",
            settings.renewal_buffer_seconds
        ));
    }

    validate_catalog(&settings.catalog, errors);

    if let Some(logging) = &settings.logging {
        if !ALLOWED_LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of {:?}",
                logging.level, ALLOWED_LOG_LEVELS
            ));
        }
    }
}

fn validate_catalog(catalog: &CatalogConfig, errors: &mut Vec<String>) {
    if catalog.service.trim().is_empty() {
        errors.push("settings.catalog.service must not be empty".to_string());
    }
    if catalog.fallback_service.trim().is_empty() {
        errors.push("settings.catalog.fallback_service must not be empty".to_string());
    }
    if catalog.service == catalog.fallback_service {
        errors.push(format!(
            "settings.catalog.fallback_service '{}' must differ from settings.catalog.service",
            catalog.fallback_service
        ));
    }
    if !ALLOWED_INTERFACES.contains(&catalog.interface.as_str()) {
        errors.push(format!(
            "settings.catalog.interface '{}' must be one of {:?}",
            catalog.interface, ALLOWED_INTERFACES
        ));
    }
}

/// CREDENTIALS VALIDATION
fn validate_credentials(credentials: &CredentialsConfig, errors: &mut Vec<String>) {
    let auth_url = credentials.auth_url.trim();
    if auth_url.is_empty() {
        errors.push("credentials.auth_url must not be empty".to_string());
    } else if !(auth_url.starts_with("http://") || auth_url.starts_with("https://")) {
        errors.push(format!(
            "credentials.auth_url '{}' must start with http:// or https://",
            credentials.auth_url
        ));
    }

    validate_secret("credentials.username", &credentials.username, errors);
    validate_secret("credentials.password", &credentials.password, errors);

    if credentials.domain_id.trim().is_empty() {
        errors.push("credentials.domain_id must not be empty".to_string());
    }
    if credentials.project_id.trim().is_empty() {
        errors.push("credentials.project_id must not be empty".to_string());
    }
}

fn validate_secret(field: &str, value: &SecretValue, errors: &mut Vec<String>) {
    match value {
        SecretValue::Literal { value } if value.is_empty() => {
            errors.push(format!("{}.value must not be empty", field));
        }
        SecretValue::FromEnv { from_env } if from_env.trim().is_empty() => {
            errors.push(format!("{}.from_env must name a variable", field));
        }
        SecretValue::FromFile { path } if path.trim().is_empty() => {
            errors.push(format!("{}.path must not be empty", field));
        }
        _ => {}
    }
}
