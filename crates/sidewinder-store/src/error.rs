//! Error types for the move log.

use sidewinder_board::Tile;

use crate::GameId;

/// The (game, tile) uniqueness constraint was violated: the game's log
/// already contains a move at this tile.
///
/// Under concurrent submissions this is expected control flow, not a
/// fault — the arbiter converts it into an "already occupied" rejection
/// for the losing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("game {game} already has a move at {tile}")]
pub struct UniqueViolation {
    pub game: GameId,
    pub tile: Tile,
}
