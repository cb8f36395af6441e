use async_trait::async_trait;
use popcorn_models::{DetailRecord, SearchResultItem};
use tokio_util::sync::CancellationToken;
use crate::error::CatalogError;

/// A remote movie catalog reachable over request/response calls.
///
/// Every call takes the cancellation token of the slot it runs in. Once the
/// token fires the call must settle with [`CatalogError::Cancelled`] instead of
/// a result.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Title search. Fails with `NotFound` when the service reports no matches.
    async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResultItem>, CatalogError>;

    /// Full record for one catalog id. Missing fields are defaulted, never an error.
    async fn fetch_detail(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<DetailRecord, CatalogError>;
}
