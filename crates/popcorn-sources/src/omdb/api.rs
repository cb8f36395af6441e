use popcorn_models::{parse_catalog_rating, parse_runtime_minutes, DetailRecord, SearchResultItem};
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use crate::error::CatalogError;

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbDetail {
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "Runtime", default)]
    runtime: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: Option<String>,
    #[serde(rename = "Released", default)]
    released: Option<String>,
    #[serde(rename = "Actors", default)]
    actors: Option<String>,
    #[serde(rename = "Director", default)]
    director: Option<String>,
    #[serde(rename = "Genre", default)]
    genre: Option<String>,
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

/// The service signals domain failures with `"Response": "False"`
fn is_false_response(response: Option<&str>) -> bool {
    response.is_some_and(|r| r.eq_ignore_ascii_case("false"))
}

/// Send a request, giving up as soon as `cancel` fires.
///
/// Returns the response body of a successful status.
pub async fn send_cancellable(
    request: RequestBuilder,
    cancel: &CancellationToken,
) -> Result<String, CatalogError> {
    if cancel.is_cancelled() {
        return Err(CatalogError::Cancelled);
    }

    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
        response = request.send() => response?,
    };

    let status = response.status();
    let body = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(CatalogError::Cancelled),
        body = response.text() => body?,
    };

    check_status(status, &body)?;
    Ok(body)
}

pub fn check_status(status: StatusCode, body: &str) -> Result<(), CatalogError> {
    if status.is_success() {
        return Ok(());
    }

    let mut message: String = body.chars().take(200).collect();
    if message.trim().is_empty() {
        message = status.canonical_reason().unwrap_or("request failed").to_string();
    }
    Err(CatalogError::Transport {
        status: Some(status.as_u16()),
        message,
    })
}

pub fn parse_search_response(body: &str) -> Result<Vec<SearchResultItem>, CatalogError> {
    let payload: OmdbSearchResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::Decode(format!("search payload: {}", e)))?;

    if is_false_response(payload.response.as_deref()) {
        let reason = payload.error.unwrap_or_else(|| "no matches".to_string());
        return Err(CatalogError::NotFound { reason });
    }

    let items = payload.search.unwrap_or_default();
    let total = items.len();
    let results: Vec<SearchResultItem> = items
        .into_iter()
        .filter_map(|item| {
            let id = item.imdb_id.filter(|id| !id.trim().is_empty())?;
            Some(SearchResultItem {
                id,
                title: item.title.unwrap_or_default(),
                year: item.year.unwrap_or_default(),
                poster_url: item.poster.unwrap_or_default(),
            })
        })
        .collect();

    if results.len() < total {
        debug!("Dropped {} search items without an id", total - results.len());
    }

    Ok(results)
}

/// Decode a detail payload, defaulting whatever the service left out.
pub fn parse_detail_response(requested_id: &str, body: &str) -> Result<DetailRecord, CatalogError> {
    let payload: OmdbDetail = serde_json::from_str(body)
        .map_err(|e| CatalogError::Decode(format!("detail payload: {}", e)))?;

    if is_false_response(payload.response.as_deref()) {
        warn!(
            "Catalog returned no detail for {}: {}",
            requested_id,
            payload.error.as_deref().unwrap_or("unknown reason")
        );
    }

    let runtime = payload.runtime.unwrap_or_default();
    let runtime_minutes = parse_runtime_minutes(&runtime);
    let catalog_rating = payload
        .imdb_rating
        .as_deref()
        .map(parse_catalog_rating)
        .unwrap_or(0.0);

    Ok(DetailRecord {
        id: payload
            .imdb_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| requested_id.to_string()),
        title: payload.title.unwrap_or_default(),
        year: payload.year.unwrap_or_default(),
        poster_url: payload.poster.unwrap_or_default(),
        runtime,
        runtime_minutes,
        plot: payload.plot.unwrap_or_default(),
        released: payload.released.unwrap_or_default(),
        actors: payload.actors.unwrap_or_default(),
        director: payload.director.unwrap_or_default(),
        genre: payload.genre.unwrap_or_default(),
        catalog_rating,
    })
}
