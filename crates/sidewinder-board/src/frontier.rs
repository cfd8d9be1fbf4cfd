//! Frontier computation: which tiles are playable on the next move.
//!
//! Tiles enter the board sideways. A position is playable if it sits in
//! one of the two edge columns or directly left/right of an occupied
//! tile, and is not itself occupied. The playable set is called the
//! frontier, and it is always derived from the occupied set — the layers
//! above never store it.

use std::collections::HashSet;

use crate::tile::{BOARD_SIZE, Tile};

/// Returns the frontier for an empty board: both edge columns in full.
pub fn initial_valid_tiles() -> HashSet<Tile> {
    valid_tiles(&HashSet::new())
}

/// Returns the set of tiles playable given the occupied set.
///
/// Candidates are the edge columns plus the horizontal neighbors of every
/// occupied tile; occupied candidates and candidates whose column lies
/// outside the board are then dropped. No y filtering happens here —
/// occupied tiles are themselves on the board, so a candidate's y is
/// already in range.
pub fn valid_tiles(occupied: &HashSet<Tile>) -> HashSet<Tile> {
    let mut candidates: HashSet<Tile> = (0..BOARD_SIZE)
        .flat_map(|y| [Tile::new(0, y), Tile::new(BOARD_SIZE - 1, y)])
        .collect();
    for tile in occupied {
        candidates.insert(tile.shifted(1, 0));
        candidates.insert(tile.shifted(-1, 0));
    }
    candidates.retain(|c| !occupied.contains(c) && (0..BOARD_SIZE).contains(&c.x));
    candidates
}

/// Updates `frontier` in place for a tile that was just placed.
///
/// The placed tile leaves the frontier; one horizontal neighbor joins it:
/// the right neighbor if unoccupied, otherwise the left neighbor if
/// unoccupied. The asymmetry (right first) is part of the rule set, and
/// the inserted neighbor is not column-checked — see the edge-column test
/// below for where this diverges from a full [`valid_tiles`] recompute.
/// Callers that need the ground-truth frontier recompute it instead.
pub fn adjust_frontier_after_move(
    frontier: &mut HashSet<Tile>,
    occupied: &HashSet<Tile>,
    new_tile: Tile,
) {
    frontier.remove(&new_tile);
    let right = new_tile.shifted(1, 0);
    if !occupied.contains(&right) {
        frontier.insert(right);
        return;
    }
    let left = new_tile.shifted(-1, 0);
    if !occupied.contains(&left) {
        frontier.insert(left);
    }
}
