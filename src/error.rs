use thiserror::Error;

/// Error types for the headline clustering pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// The article source could not be reached or its page could not be parsed
    #[error("Failed to fetch articles: {0}")]
    Fetch(String),

    /// No titles were available to build a vocabulary from
    #[error("No articles found")]
    EmptyBatch,

    /// The requested number of clusters is outside the accepted range
    #[error("Invalid cluster count: {0}")]
    InvalidClusterCount(String),

    /// An article record violates its construction rules
    #[error("Invalid article: {0}")]
    InvalidArticle(String),

    /// Shapes of two pipeline stages do not line up
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,

    /// Reading operator input or writing rendered output failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
