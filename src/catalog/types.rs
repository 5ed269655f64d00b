use serde::{Deserialize, Serialize};

/// Ordered list of services returned with a token.
pub type Catalog = Vec<CatalogEntry>;

/// ================================
/// Catalog entry: one named service
/// ================================
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

/// Endpoint of a service
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Endpoint {
    /// Visibility of the endpoint: public, internal or admin.
    pub interface: String,
    /// Region id. Some deployments omit it.
    #[serde(default)]
    pub region: Option<String>,
    pub url: String,
}

impl Endpoint {
    pub fn new(interface: &str, region: Option<&str>, url: &str) -> Self {
        Self {
            interface: interface.to_owned(),
            region: region.map(str::to_owned),
            url: url.to_owned(),
        }
    }
}
