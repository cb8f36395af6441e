pub mod detail;
pub mod error;
pub mod logging;
pub mod notify;
pub mod search;
pub mod session;
pub mod slot;
pub mod watched;

#[cfg(test)]
mod test_support;

pub use detail::{DetailController, DetailSnapshot};
pub use error::SessionError;
pub use notify::StateNotifier;
pub use search::{SearchController, SearchStatus};
pub use session::{Intent, Session, SessionSnapshot, DEFAULT_WINDOW_TITLE};
pub use slot::{RequestSlot, SlotTicket};
pub use watched::{SharedWatched, WatchedStore};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// State stays consistent across a panicking holder; every critical section is a plain assignment
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
