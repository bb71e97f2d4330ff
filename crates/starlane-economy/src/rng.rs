//! Deterministic pseudo-random numbers from string seeds.
//!
//! Every random outcome in the economy (event triggers, durations, glut
//! commodities, ship quirks) is drawn from a [`SeededRng`] built from a
//! descriptive seed string such as `event_festival_0_12`. The same string
//! always yields the same sequence, on every platform, forever.
//!
//! # Algorithm
//!
//! The seed is folded into a 32-bit signed hash over its UTF-16 code units:
//!
//! ```text
//! hash = wrap_i32((hash << 5) - hash + unit)
//! ```
//!
//! Each draw then advances the state with
//!
//! ```text
//! state = (state * 9301 + 49297) rem 233280
//! ```
//!
//! using truncated remainder (the sign follows the dividend, so a negative
//! hash produces negative states), and returns `|state| / 233280`.

/// Modulus of the linear congruential step.
const MODULUS: i64 = 233_280;

/// Multiplier of the linear congruential step.
const MULTIPLIER: i64 = 9301;

/// Increment of the linear congruential step.
const INCREMENT: i64 = 49_297;

/// A reproducible generator of values in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    /// Current state. Bounded by `MODULUS` in magnitude after the first draw.
    state: i64,
}

impl SeededRng {
    /// Build a generator from a seed string. Any string is valid.
    pub fn new(seed: &str) -> Self {
        Self {
            state: i64::from(hash_seed(seed)),
        }
    }

    /// Draw the next value in `[0, 1)`.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn next(&mut self) -> f64 {
        // |state| < 2^31 before the first draw and < MODULUS afterwards, so
        // the product stays far inside i64.
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state.unsigned_abs() as f64 / MODULUS as f64
    }

    /// Draw an integer uniformly from `[min, max]` (inclusive).
    ///
    /// If `max < min` the bounds are swapped.
    /// Any pair of `i64` bounds is accepted, including the full range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = if max < min { (max, min) } else { (min, max) };
        // At most 2^64, which fits i128 with room to spare.
        let span = i128::from(hi)
            .saturating_sub(i128::from(lo))
            .saturating_add(1);
        // next() < 1, but the product can round up to span on very wide
        // ranges, so clamp to hi.
        let offset = (self.next() * span as f64).floor() as i128;
        let value = i128::from(lo).saturating_add(offset).min(i128::from(hi));
        i64::try_from(value).unwrap_or(hi)
    }

    /// Draw a float uniformly from `[min, max)`.
    #[allow(clippy::suboptimal_flops)]
    pub fn next_float(&mut self, min: f64, max: f64) -> f64 {
        self.next() * (max - min) + min
    }

    /// Draw an index uniformly from `[0, len)`. Returns `None` when `len` is 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn next_index(&mut self, len: usize) -> Option<usize> {
        let last = i64::try_from(len).ok()?.checked_sub(1)?;
        if last < 0 {
            return None;
        }
        usize::try_from(self.next_int(0, last)).ok()
    }
}

/// Fold a seed string into a 32-bit signed hash.
fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}
