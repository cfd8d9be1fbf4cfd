//! The [`Tile`] position type and the board constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width and height of the (square) board.
pub const BOARD_SIZE: i16 = 7;

/// Total number of positions on the board.
pub const TILE_COUNT: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Run length required to win, counting the tile just placed.
pub const WINNER_LENGTH: usize = 4;

/// A position on the board.
///
/// Coordinates are signed: win scans and frontier candidates step one
/// tile at a time in a direction and are allowed to walk off the board —
/// the off-board step simply fails the occupancy or column check it is
/// about to meet. On-board positions satisfy `0 <= x < BOARD_SIZE` and
/// `0 <= y < BOARD_SIZE`.
///
/// `Tile` is a plain value: cheap to copy, compared and hashed by value,
/// and usable as a set member or map key. On the wire it serializes as
/// `{"x": 3, "y": 5}`, which is the shape the client renders from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Tile {
    pub x: i16,
    pub y: i16,
}

impl Tile {
    /// Creates a tile at the given coordinates.
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Returns the tile offset by `(dx, dy)`.
    ///
    /// The result may lie off the board; callers filter afterwards.
    pub const fn shifted(self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
