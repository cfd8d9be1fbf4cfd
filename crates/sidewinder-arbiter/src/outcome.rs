//! The [`Outcome`] classification and its rejection reasons.

use std::collections::HashSet;

use sidewinder_board::Tile;

/// Why a proposed move was refused.
///
/// All three are player-facing and recoverable — the connection stays
/// live and the player simply tries again. The `Display` text is exactly
/// what goes out on the wire in the `{"error": ...}` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The mover's seat doesn't match the parity of the move count.
    #[error("Turn out of order!")]
    TurnOutOfOrder,

    /// The tile is not in the current frontier (occupied, off board, or
    /// not reachable from the sides).
    #[error("Tile is not viable")]
    PositionNotViable,

    /// A concurrent move claimed this tile between our frontier read and
    /// our append.
    #[error("Tile already occupied")]
    PositionAlreadyOccupied,
}

/// The result of submitting a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The move was accepted and the game goes on; `valid_tiles` is the
    /// frontier for the next move.
    Continue { valid_tiles: HashSet<Tile> },

    /// The move was accepted and completes a winning run.
    Winner,

    /// The move was accepted and fills the board.
    Draw,

    /// The move was refused; the log is unchanged.
    Rejected(Rejection),
}
