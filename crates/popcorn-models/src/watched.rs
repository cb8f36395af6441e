use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::catalog::DetailRecord;

/// A title the user has watched and rated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub id: String, // Catalog id of the DetailRecord it was created from
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub catalog_rating: f64,
    pub runtime_minutes: u32,
    pub user_rating: u8, // 1..=max_rating
    pub added_at: DateTime<Utc>,
}

impl WatchedEntry {
    /// Build an entry from the record currently in view and the user's rating.
    pub fn from_detail(detail: &DetailRecord, user_rating: u8) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            catalog_rating: detail.catalog_rating,
            runtime_minutes: detail.runtime_minutes,
            user_rating,
            added_at: Utc::now(),
        }
    }
}
