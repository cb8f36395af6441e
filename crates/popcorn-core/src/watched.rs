use popcorn_models::{WatchedEntry, WatchedSummary};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Watched store shared between the detail controller (adds) and the session (removes, reads)
pub type SharedWatched = Arc<Mutex<WatchedStore>>;

/// In-memory watched list. Insertion order is display order; ids are unique.
#[derive(Debug, Default, Clone)]
pub struct WatchedStore {
    entries: Vec<WatchedEntry>,
}

impl WatchedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedWatched {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Append `entry`. Returns false (store unchanged) if its id is already present.
    pub fn add(&mut self, entry: WatchedEntry) -> bool {
        if self.contains(&entry.id) {
            debug!("Ignoring duplicate watched entry {}", entry.id);
            return false;
        }
        info!("Added {} ({}) to watched list, rated {}", entry.title, entry.id, entry.user_rating);
        self.entries.push(entry);
        true
    }

    /// Remove the entry with `id`. Returns false if there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            info!("Removed {} from watched list", id);
        }
        removed
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&WatchedEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[WatchedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_entries(&self.entries)
    }
}
