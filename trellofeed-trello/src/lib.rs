//! Trello REST API client for trellofeed.
//!
//! Maps Trello's wire records into the provider-neutral `Board` and
//! `Card` types from `trellofeed-core` and implements the `CardSource`
//! seam the pipeline renders from.

pub mod client;
pub mod types;

pub use client::{DEFAULT_API_BASE, TrelloClient};
pub use types::{TrelloBoard, TrelloCard, TrelloMember};
