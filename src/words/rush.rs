//! One Word Rush
//!
//! A timed variant of the word search: one target word at a time against a
//! 30-second clock, a fresh grid per word, and a ten-word queue to clear.
//! Chained finds build a combo that multiplies into the score; a failed
//! selection breaks it, and running out the clock on any word ends the
//! game.
//!
//! Unlike the classic round, the grid is fully random letters with the one
//! target word written over them, so the word is guaranteed present and
//! its location is known for the timeout reveal.
//!
//! The pause between words is the shell's animation; [`RushState::schedule_advance`]
//! hands out a [`WordTicket`] and the shell calls [`RushState::advance_word`]
//! with it after the delay. Tickets from before a reset are stale and
//! ignored.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::rng::GameRng;

use super::grid::{Cell, Direction, Grid, WordPlacement, PLACE_ATTEMPTS};

/// Rush grid side length; also the longest word the pool may offer.
const GRID_SIZE: usize = 10;

/// Words per game.
const QUEUE_LEN: usize = 10;

/// Seconds on the clock for each word.
const ROUND_SECONDS: u32 = 30;

/// Flat points for any find.
const BASE_POINTS: u32 = 100;

/// Points per second left on the clock.
const TIME_BONUS_PER_SECOND: u32 = 10;

/// Points per combo step held when the word is found.
const COMBO_BONUS_PER_STEP: u32 = 50;

/// Candidate words, easiest first. Entries longer than the grid are
/// filtered out of the draw pool.
const WORD_POOL: &[&str] = &[
    "CAT", "DOG", "SUN", "MOON", "STAR", "TREE", "BOOK", "BALL", "FISH", "BIRD", "HOUSE", "WATER",
    "LIGHT", "MUSIC", "HAPPY", "DANCE", "SMILE", "HEART", "CLOUD", "RIVER", "COMPUTER", "RAINBOW",
    "BUTTERFLY", "MOUNTAIN", "ELEPHANT", "CHOCOLATE", "ADVENTURE", "FRIENDSHIP", "TELEPHONE",
    "BASKETBALL", "DISCOVERY", "FANTASTIC", "WONDERFUL", "BEAUTIFUL", "MYSTERIOUS", "CELEBRATE",
    "EXTRAORDINARY", "PHENOMENAL", "SPECTACULAR", "MAGNIFICENT", "REVOLUTIONARY", "SOPHISTICATED",
    "ENTERTAINMENT", "ORGANIZATION", "RESPONSIBILITY", "COMMUNICATION", "INTERNATIONAL",
    "ACHIEVEMENT",
];

/// Game phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RushPhase {
    /// The clock is running and selections are accepted
    Playing,
    /// A word was just found; waiting on the shell to advance
    Transitioning,
    /// Queue cleared or clock ran out
    GameOver,
}

/// Token for the shell's between-word animation delay.
///
/// Stale after a reset; `advance_word` ignores tickets whose generation no
/// longer matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordTicket {
    generation: u32,
}

/// Complete state of a rush game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RushState {
    phase: RushPhase,
    won: bool,
    grid: Grid,
    /// Where the current word sits, for the timeout reveal
    placement: WordPlacement,
    word_queue: Vec<String>,
    word_index: usize,
    score: u32,
    words_found: u32,
    combo: u32,
    max_combo: u32,
    time_left_s: u32,
    generation: u32,
    rng_seed: u64,
    #[serde(skip)]
    rng: GameRng,
}

impl RushState {
    /// Start a new game: draw a shuffled ten-word queue and build the
    /// first grid. The clock starts immediately.
    pub fn new_game(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let word_queue = draw_queue(&mut rng);
        let (grid, placement) = build_grid(&word_queue[0], &mut rng);

        info!(seed, "rush game started");
        Self {
            phase: RushPhase::Playing,
            won: false,
            grid,
            placement,
            word_queue,
            word_index: 0,
            score: 0,
            words_found: 0,
            combo: 0,
            max_combo: 0,
            time_left_s: ROUND_SECONDS,
            generation: 0,
            rng_seed: seed,
            rng,
        }
    }

    /// Restart with a fresh queue, continuing the RNG sequence. Bumps the
    /// generation, which invalidates outstanding tickets.
    pub fn reset(&mut self) {
        let word_queue = draw_queue(&mut self.rng);
        let (grid, placement) = build_grid(&word_queue[0], &mut self.rng);

        self.phase = RushPhase::Playing;
        self.won = false;
        self.grid = grid;
        self.placement = placement;
        self.word_queue = word_queue;
        self.word_index = 0;
        self.score = 0;
        self.words_found = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.time_left_s = ROUND_SECONDS;
        self.generation += 1;
    }

    /// Advance the countdown by one second.
    ///
    /// No-op outside Playing. Hitting zero ends the game as a loss; the
    /// shell can flash [`RushState::reveal_cells`] before its game-over
    /// screen.
    pub fn tick_second(&mut self) {
        if self.phase != RushPhase::Playing {
            return;
        }
        self.time_left_s = self.time_left_s.saturating_sub(1);
        if self.time_left_s == 0 {
            self.phase = RushPhase::GameOver;
            self.won = false;
            info!(
                score = self.score,
                words_found = self.words_found,
                "rush game over (time out)"
            );
        }
    }

    /// Validate a finished selection against the current word.
    ///
    /// A match (forward or reversed) scores
    /// `100 + seconds_left * 10 + combo * 50 + speed bonus` (200 with more
    /// than 20 seconds left, 100 with more than 10, 50 otherwise), extends
    /// the combo and moves the phase to Transitioning; the points are
    /// returned. Any other selection breaks the combo and returns None.
    pub fn check_selection(&mut self, cells: &[Cell]) -> Option<u32> {
        if self.phase != RushPhase::Playing {
            return None;
        }

        let matched = self
            .grid
            .word_at(cells)
            .map(|selected| {
                let reversed: String = selected.chars().rev().collect();
                selected == self.placement.word || reversed == self.placement.word
            })
            .unwrap_or(false);

        if !matched {
            self.combo = 0;
            return None;
        }

        let speed_bonus = if self.time_left_s > 20 {
            200
        } else if self.time_left_s > 10 {
            100
        } else {
            50
        };
        let points = BASE_POINTS
            + self.time_left_s * TIME_BONUS_PER_SECOND
            + self.combo * COMBO_BONUS_PER_STEP
            + speed_bonus;

        self.score += points;
        self.words_found += 1;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.phase = RushPhase::Transitioning;

        debug!(
            word = %self.placement.word,
            points,
            combo = self.combo,
            "rush word found"
        );
        Some(points)
    }

    /// Hand control to the shell for the between-word animation.
    ///
    /// Returns a ticket only while Transitioning.
    pub fn schedule_advance(&mut self) -> Option<WordTicket> {
        if self.phase != RushPhase::Transitioning {
            return None;
        }
        Some(WordTicket {
            generation: self.generation,
        })
    }

    /// Move to the next word in the queue with a fresh grid and a full
    /// clock, or end the game as a win when the queue is cleared.
    ///
    /// A stale ticket is a no-op.
    pub fn advance_word(&mut self, ticket: WordTicket) -> bool {
        if ticket.generation != self.generation || self.phase != RushPhase::Transitioning {
            return false;
        }

        let next_index = self.word_index + 1;
        if next_index >= self.word_queue.len() {
            self.phase = RushPhase::GameOver;
            self.won = true;
            info!(
                score = self.score,
                max_combo = self.max_combo,
                "rush game over (queue cleared)"
            );
            return true;
        }

        let (grid, placement) = build_grid(&self.word_queue[next_index], &mut self.rng);
        self.grid = grid;
        self.placement = placement;
        self.word_index = next_index;
        self.time_left_s = ROUND_SECONDS;
        self.phase = RushPhase::Playing;
        true
    }

    /// Current phase.
    pub fn phase(&self) -> RushPhase {
        self.phase
    }

    /// True when the game ended with the queue cleared.
    pub fn won(&self) -> bool {
        self.won
    }

    /// The letter grid for the current word.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The word to find right now.
    pub fn current_word(&self) -> &str {
        &self.placement.word
    }

    /// Where the current word sits, for the timeout reveal flash.
    pub fn reveal_cells(&self) -> &[Cell] {
        &self.placement.cells
    }

    /// Seconds left on the clock.
    pub fn time_left(&self) -> u32 {
        self.time_left_s
    }

    /// Total score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Words found so far.
    pub fn words_found(&self) -> u32 {
        self.words_found
    }

    /// Current combo streak.
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Best combo streak this game.
    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Position in the queue (0-based) and queue length.
    pub fn progress(&self) -> (usize, usize) {
        (self.word_index, self.word_queue.len())
    }

    /// The seed this game was created from.
    pub fn seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Shuffle the pool (entries that fit the grid) and take the queue.
fn draw_queue(rng: &mut GameRng) -> Vec<String> {
    let mut pool: Vec<&str> = WORD_POOL
        .iter()
        .copied()
        .filter(|w| w.len() <= GRID_SIZE)
        .collect();
    rng.shuffle(&mut pool);
    pool.iter().take(QUEUE_LEN).map(|w| w.to_string()).collect()
}

/// Build a grid of random letters with `word` written over it.
///
/// Overwriting is fine here: there is only one word per grid. Random
/// (direction, start) attempts need only a bounds check; if they all land
/// out of bounds the word goes across the top row.
fn build_grid(word: &str, rng: &mut GameRng) -> (Grid, WordPlacement) {
    let mut rows: Vec<Vec<char>> = (0..GRID_SIZE)
        .map(|_| (0..GRID_SIZE).map(|_| rng.next_letter()).collect())
        .collect();

    let cells = (0..PLACE_ATTEMPTS)
        .find_map(|_| {
            let dir = *rng
                .choose(&Direction::ALL)
                .expect("direction table is non-empty");
            let start = Cell::new(
                rng.next_int(GRID_SIZE as u32) as usize,
                rng.next_int(GRID_SIZE as u32) as usize,
            );
            straight_path(start, dir, word.len())
        })
        // Guaranteed to fit: pool words never exceed the grid side
        .unwrap_or_else(|| (0..word.len()).map(|i| Cell::new(0, i)).collect());

    for (cell, letter) in cells.iter().zip(word.chars()) {
        rows[cell.row][cell.col] = letter;
    }

    let placement = WordPlacement {
        word: word.to_string(),
        cells,
    };
    (Grid::from_rows(rows), placement)
}

/// The `len`-cell path from `start` along `dir`, or None if it leaves the
/// grid.
fn straight_path(start: Cell, dir: Direction, len: usize) -> Option<Vec<Cell>> {
    (0..len)
        .map(|i| dir.offset(start, i, GRID_SIZE))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
