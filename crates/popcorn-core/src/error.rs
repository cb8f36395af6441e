use thiserror::Error;

/// A user intent the current state cannot honour. State is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no title is selected")]
    NoSelection,

    #[error("{0} is already in the watched list")]
    AlreadyWatched(String),

    #[error("rating {value} is outside 1..={max}")]
    RatingOutOfRange { value: u8, max: u8 },

    #[error("detail for the selected title has not loaded")]
    DetailNotLoaded,

    #[error("no rating chosen")]
    NoRating,
}
