//! The [`Arbiter`]: legality checks and outcome classification.

use std::collections::HashSet;
use std::sync::Arc;

use sidewinder_board::{TILE_COUNT, Tile, is_winner, valid_tiles};
use sidewinder_store::{GameId, MoveLog};

use crate::{Outcome, Rejection};

/// Validates proposed moves against a game's history and classifies the
/// result.
///
/// Cheap to clone; it's an `Arc` around the shared move log.
pub struct Arbiter<L> {
    log: Arc<L>,
}

impl<L> Clone for Arbiter<L> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

impl<L: MoveLog> Arbiter<L> {
    /// Creates an arbiter over the given move log.
    pub fn new(log: Arc<L>) -> Self {
        Self { log }
    }

    /// Submits a move on behalf of the first or second player.
    ///
    /// The checks run in order — turn, viability, append — and the first
    /// failure wins. Only a successful append mutates the log; the
    /// append itself is refused atomically by the store if a concurrent
    /// move beat us to the tile, which surfaces here as
    /// [`Rejection::PositionAlreadyOccupied`].
    pub async fn submit(&self, game: GameId, tile: Tile, is_first: bool) -> Outcome {
        let history = self.log.list_ordered(game).await;
        let occupied: HashSet<Tile> = history.iter().map(|record| record.tile).collect();

        // First player moves on even-indexed turns (0-indexed).
        if (history.len() % 2 == 0) != is_first {
            tracing::debug!(%game, %tile, "rejected: turn out of order");
            return Outcome::Rejected(Rejection::TurnOutOfOrder);
        }

        if !valid_tiles(&occupied).contains(&tile) {
            tracing::debug!(%game, %tile, "rejected: tile not viable");
            return Outcome::Rejected(Rejection::PositionNotViable);
        }

        if self.log.append(game, tile).await.is_err() {
            tracing::debug!(%game, %tile, "rejected: lost append race");
            return Outcome::Rejected(Rejection::PositionAlreadyOccupied);
        }

        // This move fills the board: the pre-append history covered all
        // tiles but one.
        if occupied.len() == TILE_COUNT - 1 {
            tracing::info!(%game, %tile, "game drawn");
            return Outcome::Draw;
        }

        // The mover's own prior tiles are every other history entry,
        // walking backward from the entry before the opponent's last.
        // A run only wins if it is built from one player's tiles.
        let own: HashSet<Tile> = history
            .iter()
            .rev()
            .skip(1)
            .step_by(2)
            .map(|record| record.tile)
            .collect();
        if is_winner(&own, tile) {
            tracing::info!(%game, %tile, "game won");
            return Outcome::Winner;
        }

        let mut after = occupied;
        after.insert(tile);
        Outcome::Continue {
            valid_tiles: valid_tiles(&after),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
