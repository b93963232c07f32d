//! Source-neutral board and card records.
//!
//! These are plain snapshots of what the upstream API returned for one
//! render. The due date stays a raw string here: deciding whether it
//! parses is a pipeline concern, and a malformed value has to fail the
//! render rather than vanish during deserialization.

use crate::error::{FeedError, FeedResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Due-date format used by the Trello API: millisecond-zero, UTC designator.
/// The literal `.000Z` tail is intentional; anything else is rejected.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

/// A board visible to the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
}

/// A card as read from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    /// Raw due-date string, absent when the card has no due date.
    pub due: Option<String>,
    /// Permalink to the card.
    pub url: String,
    /// Member ids assigned to the card.
    pub assignees: Vec<String>,
    /// Id of the board the card belongs to.
    pub board_id: String,
}

impl Card {
    /// Parse this card's due date as a UTC instant, if present.
    pub fn due_date(&self) -> FeedResult<Option<DateTime<Utc>>> {
        match self.due.as_deref() {
            Some(raw) => parse_due_date(&self.id, raw).map(Some),
            None => Ok(None),
        }
    }
}

/// Parse a due-date string against the fixed format, as UTC.
pub fn parse_due_date(card_id: &str, raw: &str) -> FeedResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, DUE_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| FeedError::DueDateParse {
            card: card_id.to_string(),
            value: raw.to_string(),
        })
}
