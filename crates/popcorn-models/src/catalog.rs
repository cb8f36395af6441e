use serde::{Deserialize, Serialize};

/// One hit from a catalog title search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResultItem {
    pub id: String, // Opaque catalog identifier (e.g. "tt0372784")
    pub title: String,
    pub year: String, // Kept textual: the catalog returns ranges like "2008–2013" for series
    pub poster_url: String,
}

/// Full record for a single title, fetched when it is selected.
///
/// Fields the catalog omits are left empty (strings) or zero (numbers) so a
/// partially populated record can still be rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailRecord {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    /// Human-readable duration as reported by the catalog (e.g. "126 min")
    pub runtime: String,
    pub runtime_minutes: u32,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
    pub catalog_rating: f64,
}

impl DetailRecord {
    /// Empty record for `id`; every other field at its "missing" value.
    pub fn empty(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: String::new(),
            year: String::new(),
            poster_url: String::new(),
            runtime: String::new(),
            runtime_minutes: 0,
            plot: String::new(),
            released: String::new(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
            catalog_rating: 0.0,
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Parse the leading numeric component of a duration such as "142 min".
///
/// Anything that does not start with an unsigned integer ("N/A", "", "abc min")
/// yields 0.
pub fn parse_runtime_minutes(runtime: &str) -> u32 {
    runtime
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .unwrap_or(0)
}

/// Parse a catalog rating ("7.9"); non-numeric values such as "N/A" become 0.0.
pub fn parse_catalog_rating(rating: &str) -> f64 {
    rating
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
