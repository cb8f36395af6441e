use crate::error::CatalogError;
use crate::omdb::api;
use crate::traits::CatalogSource;
use anyhow::Result;
use async_trait::async_trait;
use popcorn_models::{DetailRecord, SearchResultItem};
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// OMDb-style catalog: `GET <endpoint>?apikey=<key>&s=<query>` and `&i=<id>`.
#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    endpoint: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(endpoint: String, api_key: String) -> Result<Self> {
        Self::with_timeout(endpoint, api_key, None)
    }

    /// No timeout means a request ends only by completing or being cancelled
    pub fn with_timeout(endpoint: String, api_key: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: Arc::new(builder.build()?),
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn search_request(&self, query: &str) -> RequestBuilder {
        self.client
            .get(&self.endpoint)
            .query(&[("apikey", self.api_key.as_str()), ("s", query)])
            .header("Accept", "application/json")
    }

    fn detail_request(&self, id: &str) -> RequestBuilder {
        self.client
            .get(&self.endpoint)
            .query(&[("apikey", self.api_key.as_str()), ("i", id)])
            .header("Accept", "application/json")
    }
}

#[async_trait]
impl CatalogSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResultItem>, CatalogError> {
        debug!("Searching catalog for {:?}", query);
        let body = api::send_cancellable(self.search_request(query), cancel).await?;
        let results = api::parse_search_response(&body)?;
        info!("Catalog search {:?} returned {} results", query, results.len());
        Ok(results)
    }

    async fn fetch_detail(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<DetailRecord, CatalogError> {
        debug!("Fetching catalog detail for {}", id);
        let body = api::send_cancellable(self.detail_request(id), cancel).await?;
        api::parse_detail_response(id, &body)
    }
}
