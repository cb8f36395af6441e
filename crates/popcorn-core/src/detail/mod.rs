//! Detail panel controller
//!
//! Holds the selected title, the record fetched for it and the user's pending
//! rating. Only the newest fetch may fill the panel; anything it supersedes is
//! cancelled and, if it still answers, discarded.

use popcorn_models::{DetailRecord, WatchedEntry};
use popcorn_sources::{CatalogError, CatalogSource};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use crate::error::SessionError;
use crate::lock;
use crate::notify::StateNotifier;
use crate::slot::{RequestSlot, SlotTicket};
use crate::watched::SharedWatched;

/// Everything the detail panel renders, read in one go.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailSnapshot {
    pub selected_id: Option<String>,
    pub detail: Option<DetailRecord>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub user_rating: Option<u8>,
    /// The selected title is already in the watched list
    pub is_watched: bool,
    /// Stored rating shown read-only when `is_watched`
    pub watched_user_rating: Option<u8>,
}

impl DetailSnapshot {
    pub fn is_open(&self) -> bool {
        self.selected_id.is_some()
    }
}

#[derive(Default)]
struct DetailState {
    selected_id: Option<String>,
    detail: Option<DetailRecord>,
    is_loading: bool,
    error: Option<String>,
    user_rating: Option<u8>,
}

struct DetailInner {
    source: Arc<dyn CatalogSource>,
    watched: SharedWatched,
    max_rating: u8,
    notifier: StateNotifier,
    runtime: Handle,
    state: Mutex<(DetailState, RequestSlot)>,
}

/// Owns the selection and the "current detail fetch" slot.
#[derive(Clone)]
pub struct DetailController {
    inner: Arc<DetailInner>,
}

impl DetailController {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        watched: SharedWatched,
        max_rating: u8,
        notifier: StateNotifier,
        runtime: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(DetailInner {
                source,
                watched,
                max_rating,
                notifier,
                runtime,
                state: Mutex::new((DetailState::default(), RequestSlot::new("detail"))),
            }),
        }
    }

    pub fn max_rating(&self) -> u8 {
        self.inner.max_rating
    }

    pub fn selected_id(&self) -> Option<String> {
        lock(&self.inner.state).0.selected_id.clone()
    }

    pub fn detail(&self) -> Option<DetailRecord> {
        lock(&self.inner.state).0.detail.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.inner.state).0.is_loading
    }

    pub fn user_rating(&self) -> Option<u8> {
        lock(&self.inner.state).0.user_rating
    }

    /// Toggle selection of `id`.
    ///
    /// Selecting the selected title closes the panel without a fetch. Selecting
    /// another title supersedes any in-flight fetch and starts a new one; the
    /// returned handle settles when that fetch has been committed or discarded.
    pub fn select(&self, id: &str) -> Option<JoinHandle<()>> {
        let mut guard = lock(&self.inner.state);
        let (state, slot) = &mut *guard;

        if state.selected_id.as_deref() == Some(id) {
            slot.invalidate();
            *state = DetailState::default();
            drop(guard);
            debug!("Deselected {}", id);
            self.inner.notifier.notify();
            return None;
        }

        let ticket = slot.begin();
        *state = DetailState {
            selected_id: Some(id.to_string()),
            is_loading: true,
            ..DetailState::default()
        };
        drop(guard);
        self.inner.notifier.notify();

        let inner = Arc::clone(&self.inner);
        let id = id.to_string();
        Some(self.inner.runtime.spawn(async move {
            let result = inner.source.fetch_detail(&id, ticket.token()).await;
            inner.settle(&id, &ticket, result);
        }))
    }

    /// Close the panel, discarding any in-flight fetch
    pub fn close(&self) {
        let mut guard = lock(&self.inner.state);
        let (state, slot) = &mut *guard;
        let was_open = state.selected_id.is_some();

        slot.invalidate();
        *state = DetailState::default();
        drop(guard);

        if was_open {
            self.inner.notifier.notify();
        }
    }

    /// Record the user's rating for the selected, not yet watched, title
    pub fn set_user_rating(&self, value: u8) -> Result<(), SessionError> {
        let mut guard = lock(&self.inner.state);
        let state = &mut guard.0;
        let id = state.selected_id.as_deref().ok_or(SessionError::NoSelection)?;

        if value == 0 || value > self.inner.max_rating {
            return Err(SessionError::RatingOutOfRange {
                value,
                max: self.inner.max_rating,
            });
        }
        if lock(&self.inner.watched).contains(id) {
            return Err(SessionError::AlreadyWatched(id.to_string()));
        }

        state.user_rating = Some(value);
        drop(guard);
        self.inner.notifier.notify();
        Ok(())
    }

    /// Add the title in view to the watched list with the chosen rating, then close the panel
    pub fn confirm_add(&self) -> Result<WatchedEntry, SessionError> {
        let mut guard = lock(&self.inner.state);
        let (state, slot) = &mut *guard;

        let id = state.selected_id.clone().ok_or(SessionError::NoSelection)?;
        let rating = state
            .user_rating
            .filter(|rating| *rating > 0)
            .ok_or(SessionError::NoRating)?;
        let detail = state.detail.as_ref().ok_or(SessionError::DetailNotLoaded)?;

        // Keyed by the id the user picked, which the already-watched check looks up
        let mut entry = WatchedEntry::from_detail(detail, rating);
        entry.id = id;
        if !lock(&self.inner.watched).add(entry.clone()) {
            return Err(SessionError::AlreadyWatched(entry.id));
        }

        slot.invalidate();
        *state = DetailState::default();
        drop(guard);
        self.inner.notifier.notify();
        Ok(entry)
    }

    /// Whether the selected title is already in the watched list
    pub fn is_watched(&self) -> bool {
        self.snapshot().is_watched
    }

    /// The stored rating of the selected title, if it was watched
    pub fn watched_user_rating(&self) -> Option<u8> {
        self.snapshot().watched_user_rating
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        let guard = lock(&self.inner.state);
        let state = &guard.0;

        let stored = state
            .selected_id
            .as_deref()
            .and_then(|id| lock(&self.inner.watched).get(id).map(|entry| entry.user_rating));

        DetailSnapshot {
            selected_id: state.selected_id.clone(),
            detail: state.detail.clone(),
            is_loading: state.is_loading,
            error: state.error.clone(),
            user_rating: state.user_rating,
            is_watched: stored.is_some(),
            watched_user_rating: stored,
        }
    }

    /// Supersede the in-flight fetch, if any, keeping the selection
    pub fn cancel(&self) {
        lock(&self.inner.state).1.invalidate();
    }
}

impl DetailInner {
    fn settle(&self, id: &str, ticket: &SlotTicket, result: Result<DetailRecord, CatalogError>) {
        let mut guard = lock(&self.state);
        let (state, slot) = &mut *guard;
        if !slot.is_current(ticket) {
            debug!("Discarding superseded detail for {} (generation {})", id, ticket.generation());
            return;
        }

        match result {
            Ok(detail) => {
                info!("Loaded detail for {} ({})", id, detail.title);
                state.detail = Some(detail);
            }
            Err(e) if e.is_cancelled() => return,
            Err(e) => {
                warn!("Detail fetch for {} failed: {}", id, e.detail());
                state.error = Some(e.to_string());
            }
        }
        state.is_loading = false;

        slot.finish(ticket);
        drop(guard);
        self.notifier.notify();
    }
}

#[cfg(test)]
mod tests;
