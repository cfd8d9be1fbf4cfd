//! Win detection: does the tile just placed complete a long enough run?

use std::collections::HashSet;

use crate::tile::{Tile, WINNER_LENGTH};

/// The four axes a winning run can lie on, as unit steps. Each axis is
/// scanned in both directions from the new tile.
const AXES: [(i16, i16); 4] = [
    (1, 0),  // horizontal
    (0, 1),  // vertical
    (1, 1),  // rising diagonal
    (1, -1), // falling diagonal
];

/// Returns `true` if placing `new_tile` completes a run of at least
/// [`WINNER_LENGTH`] tiles from `occupied`.
///
/// `occupied` must contain only the mover's own tiles — an opponent's
/// tile never extends a run. `new_tile` itself need not be in the set;
/// it counts as one, and the scan extends outward in both directions
/// along each axis. Earlier moves are assumed non-winning (the game
/// would already have ended), so only runs through `new_tile` are
/// examined.
pub fn is_winner(occupied: &HashSet<Tile>, new_tile: Tile) -> bool {
    AXES.iter().any(|&(dx, dy)| {
        1 + run_length(occupied, new_tile, dx, dy) + run_length(occupied, new_tile, -dx, -dy)
            >= WINNER_LENGTH
    })
}

/// Counts consecutive occupied tiles starting one step from `from` in
/// direction `(dx, dy)`. Stops at the first gap; off-board steps fail
/// the occupancy check naturally.
fn run_length(occupied: &HashSet<Tile>, from: Tile, dx: i16, dy: i16) -> usize {
    let mut count = 0;
    let mut cursor = from.shifted(dx, dy);
    while occupied.contains(&cursor) {
        count += 1;
        cursor = cursor.shifted(dx, dy);
    }
    count
}
