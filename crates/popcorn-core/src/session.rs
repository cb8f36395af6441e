use anyhow::{Context, Result};
use popcorn_config::Config;
use popcorn_models::{WatchedEntry, WatchedSummary};
use popcorn_sources::{create_catalog_source, CatalogSource};
use serde::Serialize;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use crate::detail::{DetailController, DetailSnapshot};
use crate::error::SessionError;
use crate::lock;
use crate::notify::StateNotifier;
use crate::search::{SearchController, SearchStatus};
use crate::watched::{SharedWatched, WatchedStore};

pub const DEFAULT_WINDOW_TITLE: &str = "usePopcorn";

/// User intents emitted by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    QueryEdited(String),
    Select(String),
    Rate(u8),
    ConfirmAdd,
    DeleteWatched(String),
    /// Back button or Escape
    Close,
}

/// Complete view state at one revision.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub revision: u64,
    pub query: String,
    pub status: SearchStatus,
    pub result_count: usize,
    pub detail: DetailSnapshot,
    pub watched: Vec<WatchedEntry>,
    pub summary: WatchedSummary,
    pub window_title: String,
}

/// One user's search-and-track session: the controllers, the watched list and
/// the change feed a view subscribes to.
pub struct Session {
    search: SearchController,
    detail: DetailController,
    watched: SharedWatched,
    notifier: StateNotifier,
}

impl Session {
    /// Build a session whose requests run on `runtime`.
    ///
    /// The handle lets a view thread with no runtime of its own drive the
    /// session: every request is spawned onto it.
    pub fn new(source: Arc<dyn CatalogSource>, config: &Config, runtime: Handle) -> Self {
        let notifier = StateNotifier::new();
        let watched = WatchedStore::shared();
        let detail = DetailController::new(
            Arc::clone(&source),
            Arc::clone(&watched),
            config.rating.max_rating,
            notifier.clone(),
            runtime.clone(),
        );
        let search = SearchController::new(
            source,
            detail.clone(),
            config.search.min_query_length,
            notifier.clone(),
            runtime,
        );

        Self {
            search,
            detail,
            watched,
            notifier,
        }
    }

    /// Validate the configuration and connect to the configured catalog
    pub fn from_config(config: &Config, runtime: Handle) -> Result<Self> {
        config.validate()?;
        let source = create_catalog_source(&config.catalog)?;
        info!("Session using catalog source {}", source.source_name());
        Ok(Self::new(source, config, runtime))
    }

    /// Like [`Session::from_config`], on the runtime of the calling context
    pub fn from_config_current(config: &Config) -> Result<Self> {
        let runtime = Handle::try_current().context("Session must be created inside a Tokio runtime")?;
        Self::from_config(config, runtime)
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn detail(&self) -> &DetailController {
        &self.detail
    }

    pub fn set_query(&self, query: &str) -> Option<JoinHandle<()>> {
        self.search.set_query(query)
    }

    pub fn select(&self, id: &str) -> Option<JoinHandle<()>> {
        self.detail.select(id)
    }

    pub fn close_detail(&self) {
        self.detail.close();
    }

    pub fn rate(&self, value: u8) -> Result<(), SessionError> {
        self.detail.set_user_rating(value)
    }

    pub fn confirm_add(&self) -> Result<WatchedEntry, SessionError> {
        self.detail.confirm_add()
    }

    pub fn delete_watched(&self, id: &str) -> bool {
        let removed = lock(&self.watched).remove(id);
        if removed {
            self.notifier.notify();
        }
        removed
    }

    /// Apply a view intent. Intents the current state rejects are no-ops.
    pub fn dispatch(&self, intent: Intent) -> Option<JoinHandle<()>> {
        debug!("Dispatching {:?}", intent);
        let rejected = match intent {
            Intent::QueryEdited(query) => return self.set_query(&query),
            Intent::Select(id) => return self.select(&id),
            Intent::Close => {
                self.close_detail();
                None
            }
            Intent::Rate(value) => self.rate(value).err(),
            Intent::ConfirmAdd => self.confirm_add().err(),
            Intent::DeleteWatched(id) => {
                self.delete_watched(&id);
                None
            }
        };

        if let Some(e) = rejected {
            debug!("Intent rejected: {}", e);
        }
        None
    }

    pub fn watched(&self) -> Vec<WatchedEntry> {
        lock(&self.watched).entries().to_vec()
    }

    pub fn summary(&self) -> WatchedSummary {
        lock(&self.watched).summary()
    }

    /// "movie | <title>" while a titled record is in view
    pub fn window_title(&self) -> String {
        window_title_for(&self.detail.snapshot())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let revision = self.notifier.revision();
        let status = self.search.status();
        let detail = self.detail.snapshot();
        let (watched, summary) = {
            let store = lock(&self.watched);
            (store.entries().to_vec(), store.summary())
        };

        SessionSnapshot {
            revision,
            query: self.search.query(),
            result_count: status.results().len(),
            status,
            window_title: window_title_for(&detail),
            detail,
            watched,
            summary,
        }
    }

    /// Revision feed; a change means `snapshot()` has something new
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    /// Supersede every in-flight request
    pub fn shutdown(&self) {
        self.search.cancel();
        self.detail.cancel();
    }
}

fn window_title_for(detail: &DetailSnapshot) -> String {
    match detail.detail.as_ref().filter(|record| record.has_title()) {
        Some(record) => format!("movie | {}", record.title),
        None => DEFAULT_WINDOW_TITLE.to_string(),
    }
}
