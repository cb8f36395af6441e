use async_trait::async_trait;
use popcorn_models::{DetailRecord, SearchResultItem};
use popcorn_sources::{CatalogError, CatalogSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

pub type SearchReply = Result<Vec<SearchResultItem>, CatalogError>;
pub type DetailReply = Result<DetailRecord, CatalogError>;

/// In-memory catalog whose replies are released by the test through oneshot channels.
pub struct ScriptedCatalog {
    searches: Mutex<HashMap<String, oneshot::Receiver<SearchReply>>>,
    details: Mutex<HashMap<String, oneshot::Receiver<DetailReply>>>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    honor_cancellation: bool,
}

impl ScriptedCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::build(true))
    }

    /// A transport whose abort never reaches the request: replies arrive even after cancellation
    pub fn ignoring_cancellation() -> Arc<Self> {
        Arc::new(Self::build(false))
    }

    fn build(honor_cancellation: bool) -> Self {
        Self {
            searches: Mutex::new(HashMap::new()),
            details: Mutex::new(HashMap::new()),
            search_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            honor_cancellation,
        }
    }

    pub fn pending_search(&self, query: &str) -> oneshot::Sender<SearchReply> {
        let (tx, rx) = oneshot::channel();
        self.searches.lock().unwrap().insert(query.to_string(), rx);
        tx
    }

    pub fn respond_search(&self, query: &str, reply: SearchReply) {
        let _ = self.pending_search(query).send(reply);
    }

    pub fn pending_detail(&self, id: &str) -> oneshot::Sender<DetailReply> {
        let (tx, rx) = oneshot::channel();
        self.details.lock().unwrap().insert(id.to_string(), rx);
        tx
    }

    pub fn respond_detail(&self, id: &str, reply: DetailReply) {
        let _ = self.pending_detail(id).send(reply);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    async fn settle<T>(
        &self,
        rx: Option<oneshot::Receiver<Result<T, CatalogError>>>,
        cancel: &CancellationToken,
    ) -> Result<T, CatalogError> {
        let Some(rx) = rx else {
            return Err(transport_error("unscripted request"));
        };
        let reply = async move { rx.await.unwrap_or_else(|_| Err(transport_error("reply dropped"))) };

        if self.honor_cancellation {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(CatalogError::Cancelled),
                reply = reply => reply,
            }
        } else {
            reply.await
        }
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    fn source_name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, query: &str, cancel: &CancellationToken) -> SearchReply {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let rx = self.searches.lock().unwrap().remove(query);
        self.settle(rx, cancel).await
    }

    async fn fetch_detail(&self, id: &str, cancel: &CancellationToken) -> DetailReply {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let rx = self.details.lock().unwrap().remove(id);
        self.settle(rx, cancel).await
    }
}

pub fn transport_error(message: &str) -> CatalogError {
    CatalogError::Transport {
        status: None,
        message: message.to_string(),
    }
}

pub fn item(id: &str, title: &str) -> SearchResultItem {
    SearchResultItem {
        id: id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        poster_url: format!("https://img.test/{}.jpg", id),
    }
}

pub fn detail(id: &str, title: &str, runtime: &str, catalog_rating: f64) -> DetailRecord {
    let mut record = DetailRecord::empty(id);
    record.title = title.to_string();
    record.runtime = runtime.to_string();
    record.runtime_minutes = popcorn_models::parse_runtime_minutes(runtime);
    record.catalog_rating = catalog_rating;
    record
}
