pub mod catalog;
pub mod summary;
pub mod watched;

pub use catalog::{parse_catalog_rating, parse_runtime_minutes, DetailRecord, SearchResultItem};
pub use summary::{average, WatchedSummary};
pub use watched::WatchedEntry;
