//! Board Geometry
//!
//! The static enemy path and the placement grid. The board is 800×600
//! units; towers snap to the centers of a 40-unit grid.

use crate::core::fixed::{Fixed, BOARD_HEIGHT, BOARD_WIDTH, CELL_SIZE};
use crate::core::vec2::FixedVec2;

/// The enemy path, entry at the left edge, exit at the right edge.
///
/// Enemies spawn at `PATH[0]` and walk segment by segment; stepping past the
/// final waypoint leaks through and costs a life.
pub const PATH: [FixedVec2; 8] = [
    FixedVec2::from_ints(0, 300),
    FixedVec2::from_ints(200, 300),
    FixedVec2::from_ints(200, 100),
    FixedVec2::from_ints(400, 100),
    FixedVec2::from_ints(400, 400),
    FixedVec2::from_ints(600, 400),
    FixedVec2::from_ints(600, 200),
    FixedVec2::from_ints(800, 200),
];

/// Snap a board position to the center of its placement cell.
pub fn snap_to_cell(pos: FixedVec2) -> FixedVec2 {
    FixedVec2::new(snap_axis(pos.x), snap_axis(pos.y))
}

#[inline]
fn snap_axis(v: Fixed) -> Fixed {
    v.div_euclid(CELL_SIZE) * CELL_SIZE + CELL_SIZE / 2
}

/// Is a position within the board?
pub fn in_board(pos: FixedVec2) -> bool {
    pos.x >= 0 && pos.x < BOARD_WIDTH && pos.y >= 0 && pos.y < BOARD_HEIGHT
}

// =============================================================================
// TESTS
// =============================================================================
