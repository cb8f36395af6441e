use thiserror::Error;

/// Failure of a single catalog request.
///
/// The display text of each variant is what a view shows in its error region.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Non-success status, connection failure or timeout
    #[error("Something went wrong with movie fetching")]
    Transport { status: Option<u16>, message: String },

    /// The service answered but reported no matches
    #[error("Movie not found")]
    NotFound { reason: String },

    /// The request was superseded before it settled
    #[error("Request cancelled")]
    Cancelled,

    #[error("Unexpected catalog response: {0}")]
    Decode(String),
}

impl CatalogError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Cancelled)
    }

    /// Detailed description for logs (the display text is kept short for users)
    pub fn detail(&self) -> String {
        match self {
            CatalogError::Transport { status: Some(status), message } => format!("HTTP {}: {}", status, message),
            CatalogError::Transport { status: None, message } => message.clone(),
            CatalogError::NotFound { reason } => reason.clone(),
            CatalogError::Cancelled => "cancelled".to_string(),
            CatalogError::Decode(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Transport {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}
