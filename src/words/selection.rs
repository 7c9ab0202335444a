//! Drag-Selection Tracking
//!
//! Tracks an in-progress drag (or tap) selection over the grid and keeps
//! the selected path a contiguous straight line from the start cell to the
//! current cell. Pixel hit-testing belongs to the shell; this module only
//! sees cell coordinates.
//!
//! The shell must route every pointer-up/leave it observes to [`SelectionTracker::end`],
//! including releases outside the grid, so a drag is always finalized.

use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// In-progress selection state.
///
/// When not dragging, all fields are empty; the selected path is always a
/// straight line from start to current, or `[start]` alone while the drag
/// points in an illegal direction.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SelectionTracker {
    rows: usize,
    cols: usize,
    dragging: bool,
    start: Option<Cell>,
    current: Option<Cell>,
    selected: Vec<Cell>,
}

impl SelectionTracker {
    /// Create a tracker for a `rows`×`cols` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Begin a drag at `cell`. Out-of-grid cells are ignored.
    pub fn start(&mut self, cell: Cell) {
        if !self.in_bounds(cell) {
            return;
        }
        self.dragging = true;
        self.start = Some(cell);
        self.current = Some(cell);
        self.selected = vec![cell];
    }

    /// Extend the drag to `cell`.
    ///
    /// No-op when not dragging, when the cell is unchanged, or when the
    /// cell is outside the grid. A legal straight-line target replaces the
    /// selection with the full path; an illegal direction collapses it to
    /// the start cell without cancelling the drag.
    pub fn update(&mut self, cell: Cell) {
        if !self.dragging || !self.in_bounds(cell) {
            return;
        }
        if self.current == Some(cell) {
            return;
        }
        let start = match self.start {
            Some(start) => start,
            None => return,
        };

        self.current = Some(cell);
        self.selected = line_cells(start, cell);
    }

    /// Finish the drag, returning the final path for match validation.
    ///
    /// Clears all state unconditionally, so a release outside the grid
    /// still resets the tracker.
    pub fn end(&mut self) -> Vec<Cell> {
        let path = std::mem::take(&mut self.selected);
        self.dragging = false;
        self.start = None;
        self.current = None;
        path
    }

    /// Is a drag in progress?
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The cell where the drag began.
    pub fn start_cell(&self) -> Option<Cell> {
        self.start
    }

    /// The cell the drag currently points at.
    pub fn current_cell(&self) -> Option<Cell> {
        self.current
    }

    /// The selected path, for highlight rendering.
    pub fn selected_cells(&self) -> &[Cell] {
        &self.selected
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }
}

/// The straight-line cell path from `start` to `end`, inclusive.
///
/// Legal lines are horizontal, vertical, or exact diagonals; anything else
/// yields `[start]` only.
pub fn line_cells(start: Cell, end: Cell) -> Vec<Cell> {
    let delta_row = end.row as i64 - start.row as i64;
    let delta_col = end.col as i64 - start.col as i64;

    let legal = delta_row == 0 || delta_col == 0 || delta_row.abs() == delta_col.abs();
    if !legal {
        return vec![start];
    }

    let steps = delta_row.abs().max(delta_col.abs());
    let step_row = delta_row.signum();
    let step_col = delta_col.signum();

    (0..=steps)
        .map(|i| {
            Cell::new(
                (start.row as i64 + i * step_row) as usize,
                (start.col as i64 + i * step_col) as usize,
            )
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_diagonal_line() {
        let path = line_cells(Cell::new(0, 0), Cell::new(3, 3));
        assert_eq!(
            path,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 1),
                Cell::new(2, 2),
                Cell::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_invalid_direction_collapses_to_start() {
        let path = line_cells(Cell::new(0, 0), Cell::new(1, 2));
        assert_eq!(path, vec![Cell::new(0, 0)]);
    }

    #[test]
    fn test_reverse_directions() {
        let path = line_cells(Cell::new(5, 5), Cell::new(5, 2));
        assert_eq!(
            path,
            vec![
                Cell::new(5, 5),
                Cell::new(5, 4),
                Cell::new(5, 3),
                Cell::new(5, 2),
            ]
        );

        let path = line_cells(Cell::new(4, 1), Cell::new(1, 4));
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], Cell::new(4, 1));
        assert_eq!(path[3], Cell::new(1, 4));
    }

    #[test]
    fn test_tracker_start_update_end() {
        let mut tracker = SelectionTracker::new(8, 8);
        assert!(!tracker.is_dragging());

        tracker.start(Cell::new(2, 2));
        assert!(tracker.is_dragging());
        assert_eq!(tracker.selected_cells(), &[Cell::new(2, 2)]);

        tracker.update(Cell::new(2, 5));
        assert_eq!(tracker.selected_cells().len(), 4);
        assert_eq!(tracker.current_cell(), Some(Cell::new(2, 5)));

        let path = tracker.end();
        assert_eq!(path.len(), 4);
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.start_cell(), None);
        assert!(tracker.selected_cells().is_empty());
    }

    #[test]
    fn test_update_without_drag_is_noop() {
        let mut tracker = SelectionTracker::new(8, 8);
        tracker.update(Cell::new(3, 3));
        assert!(tracker.selected_cells().is_empty());
        assert!(tracker.end().is_empty());
    }

    #[test]
    fn test_invalid_direction_keeps_drag_alive() {
        let mut tracker = SelectionTracker::new(8, 8);
        tracker.start(Cell::new(0, 0));
        tracker.update(Cell::new(1, 2));

        assert!(tracker.is_dragging());
        assert_eq!(tracker.selected_cells(), &[Cell::new(0, 0)]);

        // A later legal target recovers the full line
        tracker.update(Cell::new(0, 3));
        assert_eq!(tracker.selected_cells().len(), 4);
    }

    #[test]
    fn test_out_of_grid_cells_ignored() {
        let mut tracker = SelectionTracker::new(8, 8);
        tracker.start(Cell::new(9, 0));
        assert!(!tracker.is_dragging());

        tracker.start(Cell::new(1, 1));
        tracker.update(Cell::new(1, 8));
        assert_eq!(tracker.selected_cells(), &[Cell::new(1, 1)]);
    }

    proptest! {
        #[test]
        fn prop_line_is_contiguous_straight_path(
            sr in 0usize..12, sc in 0usize..12,
            er in 0usize..12, ec in 0usize..12,
        ) {
            let start = Cell::new(sr, sc);
            let end = Cell::new(er, ec);
            let path = line_cells(start, end);

            prop_assert!(!path.is_empty());
            prop_assert_eq!(path[0], start);

            if path.len() == 1 {
                // Either a tap on the start cell or an illegal direction
                let illegal_direction = {
                    let dr = (er as i64 - sr as i64).abs();
                    let dc = (ec as i64 - sc as i64).abs();
                    dr != 0 && dc != 0 && dr != dc
                };
                prop_assert!(start == end || illegal_direction);
            } else {
                prop_assert_eq!(*path.last().unwrap(), end);
                let dr = path[1].row as i64 - path[0].row as i64;
                let dc = path[1].col as i64 - path[0].col as i64;
                prop_assert!(dr.abs() <= 1 && dc.abs() <= 1);
                for pair in path.windows(2) {
                    prop_assert_eq!(pair[1].row as i64 - pair[0].row as i64, dr);
                    prop_assert_eq!(pair[1].col as i64 - pair[0].col as i64, dc);
                }
            }
        }
    }
}
