//! Word-Search Engine
//!
//! Grid generation with hidden words along the 8 compass directions,
//! drag-selection path tracking, and selection-to-word matching.
//!
//! ## Module Structure
//!
//! - `grid`: letter grid generation and word placement
//! - `selection`: in-progress drag selection (straight-line paths)
//! - `state`: round state, match validation, win detection
//! - `rush`: timed one-word-at-a-time variant with combo scoring

pub mod grid;
pub mod rush;
pub mod selection;
pub mod state;

// Re-export key types
pub use grid::{Cell, Direction, GeneratedGrid, Grid, WordPlacement};
pub use rush::{RushPhase, RushState, WordTicket};
pub use selection::SelectionTracker;
pub use state::{Difficulty, FoundWord, WordSearchState};
