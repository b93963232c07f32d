//! Mapping one eligible card to one calendar event.

use crate::card::{Card, parse_due_date};
use crate::error::{FeedError, FeedResult};
use crate::feed::Feed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix prepended to every event summary.
pub const SUMMARY_PREFIX: &str = "Trello Item: ";

/// Card names are cut to this many characters in the summary.
pub const SUMMARY_TRUNCATE_CHARS: usize = 50;

/// Suffix appended to the card id to form the event uid. The uid must
/// stay stable across renders so calendar clients update instead of
/// duplicating.
pub const UID_SUFFIX: &str = "trello_to_ical";

/// A derived calendar event. Lives only for the duration of one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Convert one eligible card into exactly one calendar event.
///
/// The summary is always the truncated name followed by an ellipsis,
/// even when the name is shorter than the cut.
pub fn event_from_card(card: &Card, feed: &Feed) -> FeedResult<CalendarEvent> {
    let raw_due = card
        .due
        .as_deref()
        .ok_or_else(|| FeedError::MissingDueDate(card.id.clone()))?;
    let start = parse_due_date(&card.id, raw_due)?;
    let end = start + feed.event_duration();

    let truncated: String = card.name.chars().take(SUMMARY_TRUNCATE_CHARS).collect();

    Ok(CalendarEvent {
        uid: format!("{}{}", card.id, UID_SUFFIX),
        summary: format!("{SUMMARY_PREFIX}{truncated}..."),
        description: card.url.clone(),
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::collections::HashSet;

    fn make_feed() -> Feed {
        Feed {
            member_id: "me".to_string(),
            board_ids: HashSet::from(["b1".to_string()]),
            only_assigned: false,
            is_all_day_event: false,
            event_length: 30,
            url: "tok".to_string(),
        }
    }

    fn make_card(name: &str) -> Card {
        Card {
            id: "c1".to_string(),
            name: name.to_string(),
            due: Some("2999-01-01T10:00:00.000Z".to_string()),
            url: "https://t/c1".to_string(),
            assignees: vec![],
            board_id: "b1".to_string(),
        }
    }

    #[test]
    fn maps_card_fields() {
        let event = event_from_card(&make_card("Short"), &make_feed()).unwrap();

        assert_eq!(event.summary, "Trello Item: Short...");
        assert_eq!(event.description, "https://t/c1");
        assert_eq!(event.uid, "c1trello_to_ical");
        assert_eq!(
            event.start,
            Utc.with_ymd_and_hms(2999, 1, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(
            event.end,
            Utc.with_ymd_and_hms(2999, 1, 1, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn ellipsis_is_unconditional_for_short_names() {
        let event = event_from_card(&make_card("A"), &make_feed()).unwrap();
        assert_eq!(event.summary, "Trello Item: A...");
    }

    #[test]
    fn long_names_are_cut_to_fifty_chars() {
        let name = "x".repeat(80);
        let event = event_from_card(&make_card(&name), &make_feed()).unwrap();
        assert_eq!(
            event.summary,
            format!("Trello Item: {}...", "x".repeat(50))
        );
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let name = "é".repeat(60);
        let event = event_from_card(&make_card(&name), &make_feed()).unwrap();
        assert_eq!(
            event.summary,
            format!("Trello Item: {}...", "é".repeat(50))
        );
    }

    #[test]
    fn all_day_event_lasts_exactly_one_day() {
        let mut feed = make_feed();
        feed.is_all_day_event = true;
        feed.event_length = 5; // must be ignored

        let event = event_from_card(&make_card("Short"), &feed).unwrap();
        assert_eq!(event.end - event.start, Duration::days(1));
    }

    #[test]
    fn timed_event_lasts_event_length_minutes() {
        let mut feed = make_feed();
        feed.event_length = 90;

        let event = event_from_card(&make_card("Short"), &feed).unwrap();
        assert_eq!(event.end - event.start, Duration::minutes(90));
    }

    #[test]
    fn uid_is_stable_across_renders() {
        let card = make_card("Short");
        let feed = make_feed();
        let first = event_from_card(&card, &feed).unwrap();
        let second = event_from_card(&card, &feed).unwrap();
        assert_eq!(first.uid, second.uid);
    }

    #[test]
    fn missing_due_date_is_an_error() {
        let mut card = make_card("Short");
        card.due = None;
        let err = event_from_card(&card, &make_feed()).unwrap_err();
        assert!(matches!(err, FeedError::MissingDueDate(id) if id == "c1"));
    }

    #[test]
    fn malformed_due_date_is_an_error() {
        let mut card = make_card("Short");
        card.due = Some("tomorrow".to_string());
        let err = event_from_card(&card, &make_feed()).unwrap_err();
        assert!(matches!(err, FeedError::DueDateParse { .. }));
    }
}
