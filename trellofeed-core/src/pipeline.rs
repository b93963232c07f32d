//! The feed-render pipeline: fetch, filter, map, build.

use crate::calendar::{Calendar, build_calendar};
use crate::card::Card;
use crate::error::FeedResult;
use crate::event::event_from_card;
use crate::feed::Feed;
use crate::filter::select_eligible_cards;
use crate::source::CardSource;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Render one feed's calendar, evaluating due dates against the current
/// time. Each call is an independent, idempotent run over a fresh
/// snapshot of the source.
pub async fn create_calendar_from_feed<S: CardSource>(
    source: &S,
    feed: &Feed,
) -> FeedResult<Calendar> {
    create_calendar_at(source, feed, Utc::now()).await
}

/// Render one feed's calendar against an explicit evaluation instant.
///
/// Boards are fetched once; cards are fetched only for tracked boards,
/// in board order. Either every eligible card becomes an event or the
/// whole render fails — there is no per-card recovery.
pub async fn create_calendar_at<S: CardSource>(
    source: &S,
    feed: &Feed,
    now: DateTime<Utc>,
) -> FeedResult<Calendar> {
    let boards = source.list_boards().await?;

    let mut cards_by_board: HashMap<String, Vec<Card>> = HashMap::new();
    for board in &boards {
        if !feed.board_ids.contains(&board.id) {
            continue;
        }
        let cards = source.list_cards(board).await?;
        cards_by_board.insert(board.id.clone(), cards);
    }

    let eligible = select_eligible_cards(feed, &boards, &cards_by_board, now)?;

    let mut events = Vec::with_capacity(eligible.len());
    for card in &eligible {
        events.push(event_from_card(card, feed)?);
    }

    Ok(build_calendar(events))
}
