use tracing::{debug, warn};

use crate::catalog::types::CatalogEntry;
use crate::config::settings::CatalogConfig;
use crate::error::AuthError;

/// Find the url of `service` exposed on `interface`.
///
/// When `region` is given both interface and region must match, otherwise
/// the region of the endpoint is ignored. The first match in catalog order
/// wins, duplicates are not detected.
pub fn find_endpoint_url<'a>(
    catalog: &'a [CatalogEntry],
    service: &str,
    interface: &str,
    region: Option<&str>,
) -> Option<&'a str> {
    let entry = catalog.iter().find(|entry| entry.name == service)?;

    entry
        .endpoints
        .iter()
        .find(|endpoint| {
            endpoint.interface == interface
                && region.map_or(true, |region| endpoint.region.as_deref() == Some(region))
        })
        .map(|endpoint| endpoint.url.as_str())
}

/// Primary service name with exactly one fallback label for the same API
/// (e.g. ceph radosgw serving swift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSelector {
    pub service: String,
    pub fallback_service: String,
    pub interface: String,
}

impl Default for ServiceSelector {
    fn default() -> Self {
        Self::from(&CatalogConfig::default())
    }
}

impl From<&CatalogConfig> for ServiceSelector {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            service: config.service.to_owned(),
            fallback_service: config.fallback_service.to_owned(),
            interface: config.interface.to_owned(),
        }
    }
}

impl ServiceSelector {
    /// Probe the primary service, then the fallback one.
    pub fn resolve(&self, catalog: &[CatalogEntry], region: Option<&str>) -> Result<String, AuthError> {
        if let Some(url) = find_endpoint_url(catalog, &self.service, &self.interface, region) {
            return Ok(url.to_owned());
        }
        debug!(service = %self.service, fallback = %self.fallback_service, "primary service not in catalog, probing fallback");

        find_endpoint_url(catalog, &self.fallback_service, &self.interface, region)
            .map(str::to_owned)
            .ok_or_else(|| {
                warn!(
                    service = %self.service,
                    fallback = %self.fallback_service,
                    interface = %self.interface,
                    region = ?region,
                    catalog_services = ?catalog.iter().map(|e| e.name.as_str()).collect::<Vec<&str>>(),
                    "no usable endpoint in catalog"
                );
                AuthError::CatalogResolution {
                    service: self.service.to_owned(),
                    fallback: self.fallback_service.to_owned(),
                    interface: self.interface.to_owned(),
                    region: region.map(str::to_owned),
                }
            })
    }
}
