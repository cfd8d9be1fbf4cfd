//! Board rules for Sidewinder.
//!
//! Sidewinder is played on a 7×7 grid. Tiles enter the board from the two
//! edge columns and wind inward: a position is playable only if it sits in
//! an edge column or directly beside an already-occupied tile. Four own
//! tiles in a row — along a row, a column, or either diagonal — win.
//!
//! This crate is the bottom of the stack: pure functions over sets of
//! positions, no I/O, no connection or session state. Everything here is
//! recomputable from a move history, which is exactly how the layers above
//! use it — they re-derive the occupied set from the move log on every
//! move instead of caching board state per session.
//!
//! # Key items
//!
//! - [`Tile`] — a board position, the value type that travels on the wire
//! - [`valid_tiles`] / [`initial_valid_tiles`] — the playable frontier
//! - [`adjust_frontier_after_move`] — incremental frontier maintenance
//! - [`is_winner`] — run-length win scan around the tile just placed

mod frontier;
mod tile;
mod win;

pub use frontier::{adjust_frontier_after_move, initial_valid_tiles, valid_tiles};
pub use tile::{BOARD_SIZE, TILE_COUNT, Tile, WINNER_LENGTH};
pub use win::is_winner;
