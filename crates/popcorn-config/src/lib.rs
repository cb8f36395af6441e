pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, LoggingConfig, RatingConfig, SearchConfig, API_KEY_PLACEHOLDER, DEFAULT_ENDPOINT};
pub use paths::{base_path_override, PathManager};
