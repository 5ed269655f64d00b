//! Service catalog model and endpoint lookup.

pub mod endpoint_resolver;
pub mod types;

pub use endpoint_resolver::{find_endpoint_url, ServiceSelector};
pub use types::{Catalog, CatalogEntry, Endpoint};
