use anyhow::Result;
use popcorn_config::CatalogConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use crate::omdb::OmdbClient;
use crate::traits::CatalogSource;

/// Build the catalog source described by the configuration.
pub fn create_catalog_source(config: &CatalogConfig) -> Result<Arc<dyn CatalogSource>> {
    if config.api_key.trim().is_empty() {
        return Err(anyhow::anyhow!("Catalog API key is required"));
    }

    let timeout = config.timeout_secs.map(Duration::from_secs);
    let client = OmdbClient::with_timeout(config.endpoint.clone(), config.api_key.clone(), timeout)?;
    info!(endpoint = %config.endpoint, timeout_secs = ?config.timeout_secs, "Catalog source ready");

    Ok(Arc::new(client))
}
