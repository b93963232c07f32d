//! Core types for the trellofeed ecosystem.
//!
//! This crate provides everything shared between the CLI and the Trello
//! client:
//! - `Feed`, `Board` and `Card` records
//! - the card filter, event mapper and calendar builder
//! - the `CardSource` trait that upstream clients implement
//! - the `create_calendar_from_feed` pipeline tying them together

pub mod calendar;
pub mod card;
pub mod error;
pub mod event;
pub mod feed;
pub mod filter;
pub mod pipeline;
pub mod source;

// Re-export the main types at crate root for convenience
pub use calendar::{Calendar, build_calendar};
pub use card::{Board, Card, DUE_DATE_FORMAT};
pub use error::{FeedError, FeedResult};
pub use event::{CalendarEvent, event_from_card};
pub use feed::Feed;
pub use filter::select_eligible_cards;
pub use pipeline::{create_calendar_at, create_calendar_from_feed};
pub use source::CardSource;
