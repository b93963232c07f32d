//! Card eligibility filtering.

use crate::card::{Board, Card, parse_due_date};
use crate::error::FeedResult;
use crate::feed::Feed;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Select the cards eligible for a feed, preserving source order.
///
/// Boards are walked in the order supplied, then each board's cards in
/// their supplied order. A card is excluded when:
/// 1. its board is not in the feed's tracked set,
/// 2. the feed is assigned-only and the feed's user is not on the card,
/// 3. it has no due date, or
/// 4. its due date is not strictly after `now`.
///
/// A present but unparseable due date fails the whole render. `now` is
/// the caller's evaluation instant; nothing here reads the clock.
pub fn select_eligible_cards(
    feed: &Feed,
    boards: &[Board],
    cards_by_board: &HashMap<String, Vec<Card>>,
    now: DateTime<Utc>,
) -> FeedResult<Vec<Card>> {
    let mut eligible = Vec::new();

    for board in boards {
        let Some(cards) = cards_by_board.get(&board.id) else {
            continue;
        };

        for card in cards {
            if !feed.board_ids.contains(&card.board_id) {
                continue;
            }

            if feed.only_assigned && !card.assignees.contains(&feed.member_id) {
                continue;
            }

            let Some(raw_due) = card.due.as_deref() else {
                continue;
            };

            let due = parse_due_date(&card.id, raw_due)?;
            if due <= now {
                continue;
            }

            eligible.push(card.clone());
        }
    }

    Ok(eligible)
}
