use serde::{Deserialize, Serialize};
use crate::watched::WatchedEntry;

/// Aggregate statistics over the watched list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_catalog_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime_minutes: f64,
}

impl WatchedSummary {
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        let catalog: Vec<f64> = entries.iter().map(|e| e.catalog_rating).collect();
        let user: Vec<f64> = entries.iter().map(|e| f64::from(e.user_rating)).collect();
        let runtime: Vec<f64> = entries.iter().map(|e| f64::from(e.runtime_minutes)).collect();

        Self {
            count: entries.len(),
            avg_catalog_rating: average(&catalog),
            avg_user_rating: average(&user),
            avg_runtime_minutes: average(&runtime),
        }
    }
}

/// Arithmetic mean; an empty slice averages to 0.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
