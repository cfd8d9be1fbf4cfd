//! The append-only move log for Sidewinder.
//!
//! Every accepted move is a row in a per-game log; nothing above this
//! layer holds board state. The occupied set and the playable frontier
//! are re-derived from the log on every move, so the log's two guarantees
//! carry the whole consistency story:
//!
//! 1. **Ordering** — [`MoveLog::list_ordered`] returns a game's moves in
//!    creation order. Turn ownership falls out of the index: the move at
//!    position i belongs to the first player exactly when i is even.
//! 2. **Uniqueness** — at most one move per (game, tile). When two
//!    connections race to the same tile, exactly one append succeeds and
//!    the loser gets [`UniqueViolation`] — the sole concurrency-detection
//!    mechanism in the system (optimistic, no board-level locking).
//!
//! [`MemoryMoveLog`] is the in-process implementation; a durable store
//! slots in behind the same [`MoveLog`] trait.

#![allow(async_fn_in_trait)]

mod error;
mod log;
mod memory;

pub use error::UniqueViolation;
pub use log::{GameId, MoveLog, MoveRecord};
pub use memory::MemoryMoveLog;
