//! Move arbitration for Sidewinder.
//!
//! The arbiter answers one question: given a game, a proposed tile, and
//! which seat the mover claims, what happens? The answer is always an
//! [`Outcome`] — an accepted move with the new frontier, a win, a draw,
//! or a [`Rejection`] with a player-facing reason. There is no exception
//! path and no sentinel value; callers match on every case.
//!
//! The arbiter holds no board state. Each submission re-derives the
//! occupied set and the frontier from the move log, and relies on the
//! log's (game, tile) uniqueness constraint to detect the one race this
//! leaves open: two connections observing the same frontier and both
//! appending to the same tile. The second append fails, and the loser is
//! told the tile is already occupied.

mod arbiter;
mod outcome;

pub use arbiter::Arbiter;
pub use outcome::{Outcome, Rejection};
