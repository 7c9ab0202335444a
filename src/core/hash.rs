//! State Hashing for Determinism Checks
//!
//! Deterministic SHA-256 digests of game state. The test suite uses these
//! as an equality oracle (two identically-seeded simulations must digest
//! identically after any number of ticks), and a shell can surface them in
//! a debugging overlay.

use sha2::{Digest, Sha256};

use super::fixed::Fixed;
use super::vec2::FixedVec2;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for game state.
///
/// Wraps SHA-256 with helpers for the crate's fixed-point types.
/// Order of updates is part of the digest contract.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with a domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for tower-defense state.
    pub fn for_defense_state() -> Self {
        Self::new(b"ARCADE_DEFENSE_STATE_V1")
    }

    /// Create hasher for a word-search grid.
    pub fn for_word_grid() -> Self {
        Self::new(b"ARCADE_WORD_GRID_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a Fixed value.
    #[inline]
    pub fn update_fixed(&mut self, value: Fixed) {
        self.update_i32(value);
    }

    /// Update with a FixedVec2.
    #[inline]
    pub fn update_vec2(&mut self, value: FixedVec2) {
        self.update_fixed(value.x);
        self.update_fixed(value.y);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute a defense-state hash.
///
/// Called by `DefenseState::compute_hash()`. The closure adds the
/// state-specific fields; tick clock and seed are always hashed first.
pub fn compute_state_hash<F>(clock_ms: u64, rng_seed: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_defense_state();

    hasher.update_u64(clock_ms);
    hasher.update_u64(rng_seed);
    add_state(&mut hasher);

    hasher.finalize()
}

/// Render a digest as lowercase hex for log lines.
pub fn hash_hex(hash: &StateHash) -> String {
    hex::encode(hash)
}

// =============================================================================
// TESTS
// =============================================================================
