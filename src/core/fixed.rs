//! Q16.16 Fixed-Point Arithmetic
//!
//! Deterministic fixed-point math for game simulation. All tower-defense
//! positions, distances and speeds use this representation; integer
//! arithmetic only, so every platform computes identical results.
//!
//! ## Format: Q16.16
//!
//! 32-bit signed integer, 16 integer bits, 16 fractional bits.
//! Range ±32767.99998, precision 1/65536. The 800×600 board fits with
//! plenty of headroom.

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE;

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1;

// =============================================================================
// BOARD CONSTANTS (All as integer literals - NO float conversion!)
// =============================================================================

/// Tower-defense board width: 800.0 = 800 * 65536
pub const BOARD_WIDTH: Fixed = 52428800;

/// Tower-defense board height: 600.0 = 600 * 65536
pub const BOARD_HEIGHT: Fixed = 39321600;

/// Placement grid cell size: 40.0 = 40 * 65536
pub const CELL_SIZE: Fixed = 2621440;

// =============================================================================
// CORE OPERATIONS (All deterministic, wrapping semantics)
// =============================================================================

/// Convert a compile-time float to fixed-point.
///
/// Only use at compile time or initialization, never in the tick loop.
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert fixed-point to float for display/rendering.
///
/// Render-only; the result must never feed back into game logic.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Multiply two fixed-point numbers.
///
/// Uses an i64 intermediate to prevent overflow, then truncates.
#[inline]
pub fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    let wide = (a as i64) * (b as i64);
    (wide >> FIXED_SCALE) as Fixed
}

/// Divide two fixed-point numbers.
///
/// Pre-shifts the numerator to maintain precision.
/// Divide-by-zero returns 0 rather than panicking.
#[inline]
pub fn fixed_div(a: Fixed, b: Fixed) -> Fixed {
    if b == 0 {
        return 0;
    }
    let wide = (a as i64) << FIXED_SCALE;
    (wide / b as i64) as Fixed
}

/// Square root using Newton-Raphson iteration.
///
/// Returns 0 for non-positive inputs. Uses exactly 6 iterations so every
/// platform converges to the same value. Prefer squared distances where a
/// comparison is all that is needed.
#[inline]
pub fn fixed_sqrt(x: Fixed) -> Fixed {
    if x <= 0 {
        return 0;
    }

    let mut guess = (x >> 1).max(1);

    for _ in 0..6 {
        let div = fixed_div(x, guess);
        guess = (guess.wrapping_add(div)) >> 1;
        if guess == 0 {
            guess = 1;
        }
    }

    guess
}

/// Absolute value of a fixed-point number.
#[inline]
pub fn fixed_abs(x: Fixed) -> Fixed {
    if x < 0 {
        x.wrapping_neg()
    } else {
        x
    }
}

/// Clamp a fixed-point number to a range.
#[inline]
pub fn fixed_clamp(value: Fixed, min: Fixed, max: Fixed) -> Fixed {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_constants() {
        assert_eq!(FIXED_ONE, 65536);
        assert_eq!(FIXED_HALF, 32768);
        assert_eq!(BOARD_WIDTH, 800 * FIXED_ONE);
        assert_eq!(BOARD_HEIGHT, 600 * FIXED_ONE);
        assert_eq!(CELL_SIZE, 40 * FIXED_ONE);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.0), FIXED_ONE);
        assert_eq!(to_fixed(0.5), FIXED_HALF);
        assert_eq!(to_fixed(-2.0), -2 * FIXED_ONE);
    }

    #[test]
    fn test_fixed_mul() {
        assert_eq!(fixed_mul(to_fixed(2.0), to_fixed(3.0)), to_fixed(6.0));
        assert_eq!(fixed_mul(FIXED_HALF, FIXED_HALF), to_fixed(0.25));
        assert_eq!(fixed_mul(to_fixed(-2.0), to_fixed(3.0)), to_fixed(-6.0));
    }

    #[test]
    fn test_fixed_div() {
        assert_eq!(fixed_div(to_fixed(6.0), to_fixed(2.0)), to_fixed(3.0));
        assert_eq!(fixed_div(FIXED_ONE, to_fixed(4.0)), to_fixed(0.25));
        // Divide by zero returns 0
        assert_eq!(fixed_div(FIXED_ONE, 0), 0);
    }

    #[test]
    fn test_fixed_sqrt() {
        let result = fixed_sqrt(to_fixed(4.0));
        assert!((result - to_fixed(2.0)).abs() < 100, "sqrt(4) should be ~2.0");

        let result2 = fixed_sqrt(FIXED_ONE);
        assert!((result2 - FIXED_ONE).abs() < 100, "sqrt(1) should be ~1.0");

        assert_eq!(fixed_sqrt(0), 0);
        assert_eq!(fixed_sqrt(-FIXED_ONE), 0);
        assert!(fixed_sqrt(1) >= 0);
    }

    #[test]
    fn test_fixed_clamp() {
        assert_eq!(fixed_clamp(to_fixed(5.0), 0, to_fixed(4.0)), to_fixed(4.0));
        assert_eq!(fixed_clamp(to_fixed(-1.0), 0, to_fixed(4.0)), 0);
        assert_eq!(fixed_clamp(to_fixed(2.0), 0, to_fixed(4.0)), to_fixed(2.0));
    }

    #[test]
    fn test_fixed_determinism() {
        let a = 12345678;
        let b = 87654321;
        for _ in 0..1000 {
            assert_eq!(fixed_mul(a, b), fixed_mul(a, b));
            assert_eq!(fixed_div(a, b), fixed_div(a, b));
            assert_eq!(fixed_sqrt(a), fixed_sqrt(a));
        }
    }
}
