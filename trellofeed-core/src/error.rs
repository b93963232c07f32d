//! Error types for the trellofeed ecosystem.

use thiserror::Error;

/// Errors that can occur while rendering a feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The upstream card source failed (network, auth, rate limit).
    /// Never retried here; the caller decides how to surface it.
    #[error("Upstream fetch failed: {0}")]
    Upstream(String),

    /// A card that passed the presence check carries a due-date string
    /// that does not match the fixed Trello format. Fatal for the whole
    /// render; cards are never skipped silently.
    #[error("Card '{card}': due date '{value}' is not in the expected format")]
    DueDateParse { card: String, value: String },

    /// The mapper was handed a card without a due date. The filter
    /// excludes these, so this only fires on direct mapper misuse.
    #[error("Card '{0}' has no due date")]
    MissingDueDate(String),
}

/// Result type alias for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
