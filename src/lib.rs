//! # Arcade Core
//!
//! Deterministic simulation engines for a collection of small
//! browser-playable games. A UI shell drives these engines from user input
//! and a fixed-interval timer, then renders the resulting state; the engines
//! themselves never render, block, or perform I/O.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ARCADE CORE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/             - Deterministic primitives                │
//! │  ├── fixed.rs      - Q16.16 fixed-point arithmetic           │
//! │  ├── vec2.rs       - 2D vector with fixed-point              │
//! │  ├── rng.rs        - Seeded Xorshift128+ PRNG                │
//! │  └── hash.rs       - State hashing for determinism checks    │
//! │                                                              │
//! │  words/            - Word-search engine                      │
//! │  ├── grid.rs       - Grid generation, 8-direction placement  │
//! │  ├── selection.rs  - Drag-selection path tracking            │
//! │  ├── state.rs      - Round state and selection matching      │
//! │  └── rush.rs       - Timed one-word rounds with combos       │
//! │                                                              │
//! │  defense/          - Tower-defense engine                    │
//! │  ├── map.rs        - Enemy path and board geometry           │
//! │  ├── state.rs      - Aggregate game state and placement      │
//! │  ├── tick.rs       - Fixed-timestep update pipeline          │
//! │  └── events.rs     - Per-tick event stream for the shell     │
//! │                                                              │
//! │  cards/            - Card-game engines                       │
//! │  ├── deck.rs       - Cards, deck construction, shuffling     │
//! │  ├── war.rs        - War: compare-and-war-on-tie             │
//! │  └── battler.rs    - Battler: race to 100 points             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Every engine is 100% deterministic:
//! - No floating-point arithmetic in game logic
//! - No system time; the tower-defense clock advances a fixed step per tick
//! - All randomness from a seeded Xorshift128+ owned by the game state
//!
//! Given identical seeds and operation sequences, an engine reproduces
//! identical state on any platform, which the test suite verifies through
//! SHA-256 state digests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cards;
pub mod core;
pub mod defense;
mod error;
pub mod words;

// Re-export commonly used types
pub use crate::core::fixed::{Fixed, FIXED_HALF, FIXED_ONE, FIXED_SCALE};
pub use crate::core::rng::GameRng;
pub use crate::core::vec2::FixedVec2;
pub use cards::battler::{BattlerState, BattlerStatus, Seat};
pub use cards::deck::Card;
pub use cards::war::{WarState, WarStatus};
pub use defense::state::{DefenseConfig, DefenseState, Phase, TowerKind};
pub use error::Error;
pub use words::rush::{RushPhase, RushState};
pub use words::selection::SelectionTracker;
pub use words::state::{Difficulty, WordSearchState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tower-defense simulation tick rate (Hz)
pub const TICK_RATE: u32 = 20;

/// Milliseconds of simulated time per tower-defense tick
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;
