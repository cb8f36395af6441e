//! Search controller: turns query edits into catalog searches, at most one
//! of which may commit its results at a time.

use popcorn_models::SearchResultItem;
use popcorn_sources::{CatalogError, CatalogSource};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use crate::detail::DetailController;
use crate::lock;
use crate::notify::StateNotifier;
use crate::slot::{RequestSlot, SlotTicket};

/// What the results region should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SearchStatus {
    /// Nothing typed yet
    Idle,
    Loading,
    /// User-visible failure message; results render as empty
    Error(String),
    Ready(Vec<SearchResultItem>),
}

impl SearchStatus {
    /// Results to render; empty unless the status is `Ready`
    pub fn results(&self) -> &[SearchResultItem] {
        match self {
            SearchStatus::Ready(results) => results,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SearchStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

struct SearchState {
    query: String,
    status: SearchStatus,
    slot: RequestSlot,
}

struct SearchInner {
    source: Arc<dyn CatalogSource>,
    selection: DetailController,
    min_query_length: usize,
    notifier: StateNotifier,
    runtime: Handle,
    state: Mutex<SearchState>,
}

/// Owns the query and the "current search" slot.
///
/// Every query change supersedes the in-flight search: its token is cancelled
/// and its generation retired, so whatever it eventually settles with is
/// dropped instead of committed.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<SearchInner>,
}

impl SearchController {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        selection: DetailController,
        min_query_length: usize,
        notifier: StateNotifier,
        runtime: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(SearchInner {
                source,
                selection,
                min_query_length,
                notifier,
                runtime,
                state: Mutex::new(SearchState {
                    query: String::new(),
                    status: SearchStatus::Idle,
                    slot: RequestSlot::new("search"),
                }),
            }),
        }
    }

    pub fn query(&self) -> String {
        lock(&self.inner.state).query.clone()
    }

    pub fn status(&self) -> SearchStatus {
        lock(&self.inner.state).status.clone()
    }

    /// "Found N results"
    pub fn result_count(&self) -> usize {
        lock(&self.inner.state).status.results().len()
    }

    pub fn is_searching(&self) -> bool {
        lock(&self.inner.state).slot.is_in_flight()
    }

    /// Apply an edited query.
    ///
    /// Returns the handle of the spawned search when one was issued. Dropping
    /// the handle does not cancel the request; only a later query change does.
    pub fn set_query(&self, query: &str) -> Option<JoinHandle<()>> {
        if lock(&self.inner.state).query == query {
            return None;
        }

        // Searching away from a title deselects it
        self.inner.selection.close();

        let trimmed = query.trim();
        let mut state = lock(&self.inner.state);
        state.query = query.to_string();

        if trimmed.chars().count() < self.inner.min_query_length {
            state.slot.invalidate();
            state.status = SearchStatus::Ready(Vec::new());
            drop(state);
            debug!("Query {:?} below {} characters, results cleared", query, self.inner.min_query_length);
            self.inner.notifier.notify();
            return None;
        }

        let ticket = state.slot.begin();
        state.status = SearchStatus::Loading;
        drop(state);
        self.inner.notifier.notify();

        let inner = Arc::clone(&self.inner);
        let query = trimmed.to_string();
        Some(self.inner.runtime.spawn(async move {
            let result = inner.source.search(&query, ticket.token()).await;
            inner.settle(&query, &ticket, result);
        }))
    }

    /// Supersede the in-flight search, if any, leaving the status as it is
    pub fn cancel(&self) {
        lock(&self.inner.state).slot.invalidate();
    }
}

impl SearchInner {
    fn settle(
        &self,
        query: &str,
        ticket: &SlotTicket,
        result: Result<Vec<SearchResultItem>, CatalogError>,
    ) {
        let mut state = lock(&self.state);
        if !state.slot.is_current(ticket) {
            debug!("Discarding superseded search for {:?} (generation {})", query, ticket.generation());
            return;
        }

        match result {
            Ok(results) => {
                info!("Search {:?}: {} results", query, results.len());
                state.status = SearchStatus::Ready(results);
            }
            Err(e) if e.is_cancelled() => return,
            Err(e) => {
                warn!("Search {:?} failed: {}", query, e.detail());
                state.status = SearchStatus::Error(e.to_string());
            }
        }

        state.slot.finish(ticket);
        drop(state);
        self.notifier.notify();
    }
}
