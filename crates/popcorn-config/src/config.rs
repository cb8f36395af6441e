use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::paths::PathManager;

pub const DEFAULT_ENDPOINT: &str = "http://www.omdbapi.com/";
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub rating: RatingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote catalog service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout. None means requests only end by completing or being superseded.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Trimmed queries shorter than this clear the results instead of searching
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingConfig {
    #[serde(default = "default_max_rating")]
    pub max_rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json_logging")]
    pub json: bool,
    pub file: Option<PathBuf>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_min_query_length() -> usize {
    3
}

fn default_max_rating() -> u8 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_secs: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
        }
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            max_rating: default_max_rating(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json_logging(),
            file: None,
        }
    }
}

impl Config {
    /// Load from the default config file if it exists, then apply environment overrides
    pub fn load() -> anyhow::Result<Self> {
        let path_manager = PathManager::default();
        let path = path_manager.config_file();

        let mut config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `POPCORN_API_KEY` and `POPCORN_ENDPOINT` take precedence over the file
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var("POPCORN_API_KEY").ok(),
            std::env::var("POPCORN_ENDPOINT").ok(),
        );
    }

    fn apply_overrides(&mut self, api_key: Option<String>, endpoint: Option<String>) {
        if let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.catalog.api_key = api_key;
        }
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.catalog.endpoint = endpoint;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.is_catalog_configured() {
            return Err(anyhow::anyhow!("catalog api_key is not configured"));
        }

        let endpoint = self.catalog.endpoint.trim();
        let url = reqwest::Url::parse(endpoint)
            .map_err(|e| anyhow::anyhow!("catalog endpoint {:?} is not a valid URL: {}", endpoint, e))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(anyhow::anyhow!("catalog endpoint must be an http(s) URL with a host: {}", endpoint));
        }

        if self.catalog.timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("timeout_secs must be positive when set"));
        }

        if self.search.min_query_length == 0 {
            return Err(anyhow::anyhow!("min_query_length must be at least 1"));
        }

        if self.rating.max_rating == 0 {
            return Err(anyhow::anyhow!("max_rating must be at least 1"));
        }

        Ok(())
    }

    pub fn is_catalog_configured(&self) -> bool {
        let key = self.catalog.api_key.trim();
        !key.is_empty() && key != API_KEY_PLACEHOLDER
    }
}
