//! The [`MoveLog`] trait and its record types.

use std::fmt;
use std::future::Future;

use sidewinder_board::Tile;

use crate::UniqueViolation;

/// A unique identifier for a game session.
///
/// Newtype over `u64` so a game id can't be confused with a connection
/// id or a raw counter. Ids are assigned by the store, never reused, and
/// a game's log is never deleted — finished games simply stop receiving
/// appends once their connections are torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

/// One accepted move: which game it belongs to and where it was placed.
///
/// The sequence index is implicit — [`MoveLog::list_ordered`] returns
/// records in creation order, and position in that list determines whose
/// move it was (even index: first player).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub game: GameId,
    pub tile: Tile,
}

/// The append-only move log.
///
/// Implementations must guarantee (game, tile) uniqueness atomically —
/// two concurrent appends to the same tile must resolve to exactly one
/// success — and return moves in creation order.
///
/// The methods return `impl Future + Send` (rather than bare `async fn`)
/// so generic callers can hold them across `tokio::spawn` boundaries;
/// implementations still just write `async fn`.
pub trait MoveLog: Send + Sync + 'static {
    /// Creates a new game with an empty log and returns its id.
    fn create_session(&self) -> impl Future<Output = GameId> + Send;

    /// Appends a move, enforcing the (game, tile) uniqueness constraint.
    ///
    /// # Errors
    /// Returns [`UniqueViolation`] if the game already has a move at
    /// this tile; the log is unchanged in that case.
    fn append(
        &self,
        game: GameId,
        tile: Tile,
    ) -> impl Future<Output = Result<MoveRecord, UniqueViolation>> + Send;

    /// Returns the game's moves in creation order. Unknown games have an
    /// empty history.
    fn list_ordered(&self, game: GameId) -> impl Future<Output = Vec<MoveRecord>> + Send;
}
