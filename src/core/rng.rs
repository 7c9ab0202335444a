//! Deterministic Random Number Generator
//!
//! Xorshift128+ seeded through SplitMix64. Given the same seed, produces an
//! identical sequence on every platform, so grid layouts, shuffles and spawn
//! rolls are reproducible from a round's seed alone.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::fixed::Fixed;

/// Deterministic PRNG using the Xorshift128+ algorithm.
///
/// Each game state owns one of these; engines never reach for ambient
/// randomness.
///
/// # Example
///
/// ```
/// use arcade_core::GameRng;
///
/// let mut a = GameRng::new(12345);
/// let mut b = GameRng::new(12345);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    state: [u64; 2],
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring good
    /// distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Xorshift state must never be all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random u32.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    /// Generate a random integer in range [0, max).
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Simple modulo - slight bias for very large max, but acceptable
        (self.next_u64() % max as u64) as u32
    }

    /// Generate a random integer in range [min, max].
    #[inline]
    pub fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let range = (max - min + 1) as u32;
        min + self.next_int(range) as i32
    }

    /// Generate a random Fixed in range [0, max).
    #[inline]
    pub fn next_fixed(&mut self, max: Fixed) -> Fixed {
        if max <= 0 {
            return 0;
        }
        // Use upper 32 bits to avoid overflow in multiplication
        let raw = (self.next_u64() >> 32) as u32;
        ((raw as i64 * max as i64) >> 32) as Fixed
    }

    /// Generate a random uppercase ASCII letter.
    #[inline]
    pub fn next_letter(&mut self) -> char {
        (b'A' + self.next_int(26) as u8) as char
    }

    /// Shuffle a slice in place using the Fisher-Yates algorithm.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        for i in (1..len).rev() {
            let j = self.next_int((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Select a random element from a slice.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            let idx = self.next_int(slice.len() as u32) as usize;
            Some(&slice[idx])
        }
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> [u64; 2] {
        self.state
    }

    /// Restore from saved state.
    pub fn set_state(&mut self, state: [u64; 2]) {
        self.state = state;
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a round seed from a domain tag and caller-supplied parts.
///
/// Lets a UI shell turn a session string (match id, room name, replay tag)
/// into a reproducible `u64` seed. The same tag and parts always derive the
/// same seed; distinct domains never collide.
pub fn derive_seed(domain: &str, parts: &[&[u8]]) -> u64 {
    let mut hasher = Sha256::new();

    hasher.update(b"ARCADE_CORE_SEED_V1");
    hasher.update(domain.as_bytes());
    for part in parts {
        hasher.update(part);
    }

    let hash = hasher.finalize();
    u64::from_le_bytes(hash[0..8].try_into().expect("sha256 output is 32 bytes"))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(54321);

        // Very unlikely to match
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_next_int() {
        let mut rng = GameRng::new(1234);

        for _ in 0..1000 {
            assert!(rng.next_int(100) < 100);
        }

        assert_eq!(rng.next_int(0), 0);
        assert_eq!(rng.next_int(1), 0);
    }

    #[test]
    fn test_next_int_range() {
        let mut rng = GameRng::new(5678);

        for _ in 0..1000 {
            let val = rng.next_int_range(-10, 10);
            assert!((-10..=10).contains(&val));
        }

        assert_eq!(rng.next_int_range(5, 5), 5);
    }

    #[test]
    fn test_next_letter() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let c = rng.next_letter();
            assert!(c.is_ascii_uppercase());
        }
    }

    #[test]
    fn test_shuffle_determinism() {
        let mut rng1 = GameRng::new(1111);
        let mut rng2 = GameRng::new(1111);

        let mut arr1 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut arr2 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        rng1.shuffle(&mut arr1);
        rng2.shuffle(&mut arr2);

        assert_eq!(arr1, arr2);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = GameRng::new(99);
        let mut arr: Vec<u32> = (0..52).collect();
        rng.shuffle(&mut arr);

        let mut sorted = arr.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..52).collect::<Vec<u32>>());
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(7);
        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty), None);

        let items = [1, 2, 3];
        for _ in 0..100 {
            assert!(items.contains(rng.choose(&items).unwrap()));
        }
    }

    #[test]
    fn test_derive_seed() {
        let seed1 = derive_seed("word-search", &[b"session-42"]);
        let seed2 = derive_seed("word-search", &[b"session-42"]);
        assert_eq!(seed1, seed2);

        // Different domain or parts = different seed
        assert_ne!(seed1, derive_seed("defense", &[b"session-42"]));
        assert_ne!(seed1, derive_seed("word-search", &[b"session-43"]));
    }

    #[test]
    fn test_state_checkpoint() {
        let mut rng = GameRng::new(5555);

        for _ in 0..50 {
            rng.next_u64();
        }

        let saved_state = rng.state();
        let next_values: Vec<u64> = (0..10).map(|_| rng.next_u64()).collect();

        rng.set_state(saved_state);
        for expected in next_values {
            assert_eq!(rng.next_u64(), expected);
        }
    }
}
