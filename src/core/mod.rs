//! Deterministic Primitives
//!
//! Shared building blocks for every engine in the crate:
//!
//! - `fixed`: Q16.16 fixed-point arithmetic (no floats in game logic)
//! - `vec2`: 2D vectors over fixed-point
//! - `rng`: seeded Xorshift128+ PRNG and seed derivation
//! - `hash`: SHA-256 state digests for determinism checks

pub mod fixed;
pub mod hash;
pub mod rng;
pub mod vec2;

pub use fixed::{Fixed, FIXED_HALF, FIXED_ONE, FIXED_SCALE};
pub use hash::{StateHash, StateHasher};
pub use rng::GameRng;
pub use vec2::FixedVec2;
