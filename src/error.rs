//! Error kinds produced while polling and classifying stories.
//!
//! None of these are fatal: the poll loop turns each one into either a
//! skipped story or a visible placeholder entry.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    /// Connection failure, timeout or non-success HTTP status.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with JSON we could not decode.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The classifier could not be spawned, failed, or timed out.
    #[error("classifier error: {0}")]
    Classifier(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
