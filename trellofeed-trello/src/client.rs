//! The HTTP client for the Trello REST API.

use crate::types::{TrelloBoard, TrelloCard, TrelloMember};
use log::debug;
use serde::de::DeserializeOwned;
use trellofeed_core::{Board, Card, CardSource, FeedError, FeedResult};

/// Production API root.
pub const DEFAULT_API_BASE: &str = "https://api.trello.com/1";

/// A read-only Trello client authenticated with an API key and a member
/// token, both passed as query parameters on every request.
pub struct TrelloClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    token: String,
}

impl TrelloClient {
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_base_url(api_key, token, DEFAULT_API_BASE)
    }

    /// Point the client at a different API root (tests use this to talk
    /// to a local mock server).
    pub fn with_base_url(
        api_key: impl Into<String>,
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            token: token.into(),
        }
    }

    /// The authenticated member. Used when a feed is created to learn
    /// the owning member id.
    pub async fn member(&self) -> FeedResult<TrelloMember> {
        self.get_json("/members/me").await
    }

    /// Every board the credential can see.
    pub async fn boards(&self) -> FeedResult<Vec<TrelloBoard>> {
        self.get_json("/members/me/boards").await
    }

    /// The cards of one board.
    pub async fn cards(&self, board_id: &str) -> FeedResult<Vec<TrelloCard>> {
        self.get_json(&format!("/boards/{board_id}/cards")).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> FeedResult<T> {
        debug!("GET {path}");

        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("token", self.token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FeedError::Upstream(format!("request to {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FeedError::Upstream(format!(
                "{path} returned HTTP {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FeedError::Upstream(format!("invalid JSON from {path}: {e}")))
    }
}

impl CardSource for TrelloClient {
    async fn list_boards(&self) -> FeedResult<Vec<Board>> {
        Ok(self.boards().await?.into_iter().map(Board::from).collect())
    }

    async fn list_cards(&self, board: &Board) -> FeedResult<Vec<Card>> {
        Ok(self
            .cards(&board.id)
            .await?
            .into_iter()
            .map(Card::from)
            .collect())
    }
}
