//! Word-Search Round State
//!
//! Owns one round: the generated grid, the active word list, found words and
//! the win flag. Selection paths come in from the tracker, get read against
//! the grid, and are matched forward or reversed against the remaining words.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

use crate::core::hash::hash_hex;
use crate::core::rng::GameRng;
use crate::error::Error;

use super::grid::{self, Cell, GeneratedGrid, Grid, WordPlacement};

/// Round difficulty. Selects the grid size and the built-in word list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// 8×8 grid, short words
    Easy,
    /// 10×10 grid, five-letter words
    Medium,
    /// 12×12 grid, seven- and eight-letter words
    Hard,
}

impl Difficulty {
    /// Grid side length for this difficulty.
    pub fn grid_size(self) -> usize {
        match self {
            Difficulty::Easy => 8,
            Difficulty::Medium => 10,
            Difficulty::Hard => 12,
        }
    }

    /// The built-in word list for this difficulty.
    pub fn word_list(self) -> &'static [&'static str] {
        match self {
            Difficulty::Easy => &["CAT", "DOG", "SUN", "TREE", "BOOK", "FISH"],
            Difficulty::Medium => &[
                "HOUSE", "WATER", "NIGHT", "LIGHT", "PLANT", "MOUSE", "BIRDS",
            ],
            Difficulty::Hard => &[
                "COMPUTER", "ELEPHANT", "JOURNEY", "RAINBOW", "CRYSTAL", "MOUNTAIN", "FREEDOM",
            ],
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::UnknownDifficulty(s.to_string())),
        }
    }
}

/// A word the player has located, with the cells to highlight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundWord {
    /// The matched word (uppercase)
    pub word: String,
    /// The selected path, in selection order
    pub cells: Vec<Cell>,
}

/// State of a single word-search round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordSearchState {
    difficulty: Difficulty,
    seed: u64,
    grid: Grid,
    /// Active words only; placement failures are excluded so the round
    /// stays winnable.
    words: Vec<String>,
    placements: Vec<WordPlacement>,
    skipped: Vec<String>,
    found: Vec<FoundWord>,
    won: bool,
}

impl WordSearchState {
    /// Start a fresh round.
    pub fn new_round(difficulty: Difficulty, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let GeneratedGrid {
            grid,
            placements,
            skipped,
        } = grid::generate(difficulty.grid_size(), difficulty.word_list(), &mut rng);

        let words: Vec<String> = placements.iter().map(|p| p.word.clone()).collect();

        info!(
            ?difficulty,
            seed,
            words = words.len(),
            skipped = skipped.len(),
            grid_hash = %hash_hex(&grid.compute_hash()),
            "word-search round started"
        );

        Self {
            difficulty,
            seed,
            grid,
            words,
            placements,
            skipped,
            found: Vec::new(),
            won: false,
        }
    }

    /// Validate a finished selection path against the remaining words.
    ///
    /// Reads the letters at `cells` and compares the string, forward and
    /// reversed, against every active word not yet found. The first match is
    /// recorded and returned; anything else (no match, already found, cells
    /// out of range) returns None and leaves the round unchanged.
    pub fn check_selection(&mut self, cells: &[Cell]) -> Option<&str> {
        if self.won || cells.is_empty() {
            return None;
        }
        let selected = self.grid.word_at(cells)?;
        let reversed: String = selected.chars().rev().collect();

        let word = self
            .words
            .iter()
            .find(|w| {
                let w = w.as_str();
                !self.is_found(w) && (w == selected || w == reversed)
            })?
            .clone();

        debug!(word = %word, len = cells.len(), "word found");
        self.found.push(FoundWord {
            word,
            cells: cells.to_vec(),
        });

        if self.found.len() == self.words.len() {
            self.won = true;
            info!(seed = self.seed, found = self.found.len(), "round won");
        }

        Some(&self.found.last().expect("just pushed").word)
    }

    /// Has `word` already been found this round?
    pub fn is_found(&self, word: &str) -> bool {
        self.found.iter().any(|f| f.word == word)
    }

    /// The round's difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The seed the round was generated from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The letter grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Active words for this round (placement failures excluded).
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Placements, for hint rendering or debugging overlays.
    pub fn placements(&self) -> &[WordPlacement] {
        &self.placements
    }

    /// Words that did not fit during generation.
    pub fn skipped_words(&self) -> &[String] {
        &self.skipped
    }

    /// Words found so far, in discovery order.
    pub fn found_words(&self) -> &[FoundWord] {
        &self.found
    }

    /// True once every active word has been found.
    pub fn won(&self) -> bool {
        self.won
    }
}

// =============================================================================
// TESTS
// =============================================================================
