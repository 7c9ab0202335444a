//! Letter Grid Generation
//!
//! Builds the word-search grid: each hidden word is embedded along one of
//! the 8 compass directions, crossings between words are allowed wherever
//! letters agree, and every remaining cell is filled with a uniformly
//! random uppercase letter.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::hash::{StateHash, StateHasher};
use crate::core::rng::GameRng;

/// Maximum random (direction, start) attempts before a word is skipped.
pub(crate) const PLACE_ATTEMPTS: u32 = 100;

/// Integer coordinate pair into a grid. Row 0 is the top row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
}

impl Cell {
    /// Create a new cell coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One of the 8 unit step directions a word can run along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direction {
    /// Row step per letter (-1, 0, or 1)
    pub dr: i8,
    /// Column step per letter (-1, 0, or 1)
    pub dc: i8,
}

impl Direction {
    /// All 8 directions: the unit vectors with components in {-1, 0, 1},
    /// excluding (0, 0).
    pub const ALL: [Direction; 8] = [
        Direction { dr: 0, dc: 1 },   // east
        Direction { dr: 1, dc: 0 },   // south
        Direction { dr: 1, dc: 1 },   // south-east
        Direction { dr: -1, dc: 1 },  // north-east
        Direction { dr: 0, dc: -1 },  // west
        Direction { dr: -1, dc: 0 },  // north
        Direction { dr: -1, dc: -1 }, // north-west
        Direction { dr: 1, dc: -1 },  // south-west
    ];

    /// The cell `steps` unit steps from `start` along this direction, or
    /// None if it falls outside a `size`×`size` grid.
    pub fn offset(self, start: Cell, steps: usize, size: usize) -> Option<Cell> {
        let row = start.row as i64 + self.dr as i64 * steps as i64;
        let col = start.col as i64 + self.dc as i64 * steps as i64;
        if row < 0 || col < 0 || row >= size as i64 || col >= size as i64 {
            return None;
        }
        Some(Cell::new(row as usize, col as usize))
    }
}

/// The cell sequence a word occupies in the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPlacement {
    /// The placed word (uppercase)
    pub word: String,
    /// One cell per letter, in word order; consecutive cells differ by a
    /// constant unit step.
    pub cells: Vec<Cell>,
}

/// Square letter grid. Immutable for the life of a round; word discovery
/// tracks found positions separately and never rewrites letters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<char>>,
}

impl Grid {
    pub(crate) fn from_rows(cells: Vec<Vec<char>>) -> Self {
        Self {
            size: cells.len(),
            cells,
        }
    }

    /// Grid side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Letter at a cell. Out-of-range coordinates return None.
    pub fn letter(&self, cell: Cell) -> Option<char> {
        self.cells.get(cell.row)?.get(cell.col).copied()
    }

    /// Row-major access for rendering.
    pub fn rows(&self) -> &[Vec<char>] {
        &self.cells
    }

    /// Concatenate the letters at a cell path, in order.
    ///
    /// Returns None if any cell is out of range.
    pub fn word_at(&self, path: &[Cell]) -> Option<String> {
        path.iter().map(|&c| self.letter(c)).collect()
    }

    /// Deterministic digest of the layout, for reproducibility checks.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_word_grid();
        hasher.update_u32(self.size as u32);
        for row in &self.cells {
            for &letter in row {
                hasher.update_u8(letter as u8);
            }
        }
        hasher.finalize()
    }
}

/// Result of grid generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedGrid {
    /// The finished letter grid
    pub grid: Grid,
    /// One placement per successfully embedded word
    pub placements: Vec<WordPlacement>,
    /// Words that could not be placed within the attempt budget. The round's
    /// active word list must exclude these so it stays winnable.
    pub skipped: Vec<String>,
}

/// Generate a `size`×`size` grid embedding `words`.
///
/// Per word: up to 100 random (direction, start) attempts; a placement is
/// accepted when every cell along the path is in bounds and either empty or
/// already holding the word's letter at that offset, so words may cross.
/// Words that exhaust the budget are reported in `skipped` rather than
/// silently dropped.
pub fn generate(size: usize, words: &[&str], rng: &mut GameRng) -> GeneratedGrid {
    let mut scratch: Vec<Vec<Option<char>>> = vec![vec![None; size]; size];
    let mut placements = Vec::with_capacity(words.len());
    let mut skipped = Vec::new();

    for &raw in words {
        let word: String = raw.trim().to_ascii_uppercase();
        if word.is_empty() || word.len() > size {
            skipped.push(word);
            continue;
        }

        let mut placed = false;
        for _ in 0..PLACE_ATTEMPTS {
            let dir = *rng
                .choose(&Direction::ALL)
                .expect("direction table is non-empty");
            let start = Cell::new(
                rng.next_int(size as u32) as usize,
                rng.next_int(size as u32) as usize,
            );

            if let Some(cells) = try_place(&scratch, &word, start, dir, size) {
                for (cell, letter) in cells.iter().zip(word.chars()) {
                    scratch[cell.row][cell.col] = Some(letter);
                }
                placements.push(WordPlacement {
                    word: word.clone(),
                    cells,
                });
                placed = true;
                break;
            }
        }

        if !placed {
            warn!(word = %word, size, "word did not fit after {PLACE_ATTEMPTS} attempts; skipping");
            skipped.push(word);
        }
    }

    // Fill the remaining holes with random letters
    let cells = scratch
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|slot| slot.unwrap_or_else(|| rng.next_letter()))
                .collect()
        })
        .collect();

    GeneratedGrid {
        grid: Grid { size, cells },
        placements,
        skipped,
    }
}

/// Compute the cell path for a placement candidate, or None if it collides
/// with a conflicting letter or leaves the grid.
fn try_place(
    scratch: &[Vec<Option<char>>],
    word: &str,
    start: Cell,
    dir: Direction,
    size: usize,
) -> Option<Vec<Cell>> {
    let mut cells = Vec::with_capacity(word.len());

    for (i, letter) in word.chars().enumerate() {
        let cell = dir.offset(start, i, size)?;
        match scratch[cell.row][cell.col] {
            Some(existing) if existing != letter => return None,
            _ => cells.push(cell),
        }
    }

    Some(cells)
}

// =============================================================================
// TESTS
// =============================================================================
