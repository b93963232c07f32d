//! Trello wire records.
//!
//! Thin serde mirrors of the JSON the Trello API returns, converted
//! into core types before anything else touches them.

use serde::Deserialize;
use trellofeed_core::{Board, Card};

/// A board as returned by `GET /1/members/me/boards`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrelloBoard {
    pub id: String,
    pub name: String,
}

/// A card as returned by `GET /1/boards/{id}/cards`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloCard {
    pub id: String,
    pub name: String,
    /// Absent or JSON null when the card has no due date.
    #[serde(default)]
    pub due: Option<String>,
    pub url: String,
    #[serde(default)]
    pub id_members: Vec<String>,
    pub id_board: String,
}

/// The authenticated member, from `GET /1/members/me`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloMember {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl From<TrelloBoard> for Board {
    fn from(board: TrelloBoard) -> Self {
        Board {
            id: board.id,
            name: board.name,
        }
    }
}

impl From<TrelloCard> for Card {
    fn from(card: TrelloCard) -> Self {
        Card {
            id: card.id,
            name: card.name,
            due: card.due,
            url: card.url,
            assignees: card.id_members,
            board_id: card.id_board,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_wire_record_deserializes_and_converts() {
        let json = r#"{
            "id": "c1",
            "name": "Write the report",
            "due": "2999-01-01T10:00:00.000Z",
            "url": "https://trello.com/c/c1",
            "idMembers": ["m1", "m2"],
            "idBoard": "b1",
            "closed": false
        }"#;

        let wire: TrelloCard = serde_json::from_str(json).unwrap();
        let card: Card = wire.into();

        assert_eq!(card.id, "c1");
        assert_eq!(card.due.as_deref(), Some("2999-01-01T10:00:00.000Z"));
        assert_eq!(card.assignees, vec!["m1".to_string(), "m2".to_string()]);
        assert_eq!(card.board_id, "b1");
    }

    #[test]
    fn null_due_becomes_none() {
        let json = r#"{
            "id": "c2",
            "name": "No deadline",
            "due": null,
            "url": "https://trello.com/c/c2",
            "idMembers": [],
            "idBoard": "b1"
        }"#;

        let wire: TrelloCard = serde_json::from_str(json).unwrap();
        assert_eq!(wire.due, None);
    }
}
