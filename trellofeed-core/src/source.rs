//! The upstream card source seam.

use crate::card::{Board, Card};
use crate::error::FeedResult;

/// Read-only access to the boards and cards a credential can see.
///
/// Implemented by the Trello client; tests implement it with in-memory
/// fixtures. Failures surface as [`crate::FeedError::Upstream`] and are
/// never retried by the pipeline.
#[allow(async_fn_in_trait)]
pub trait CardSource {
    /// List every board visible to the credential.
    async fn list_boards(&self) -> FeedResult<Vec<Board>>;

    /// List the cards of one board.
    async fn list_cards(&self, board: &Board) -> FeedResult<Vec<Card>>;
}
