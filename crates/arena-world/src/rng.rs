//! Salted, stateless randomness.
//!
//! Every draw is a pure function of `(seed, day, salt)`: the key
//! `"{seed}|{day}|{salt}"` is hashed with FNV-1a over its UTF-16 code units,
//! folded through an xorshift finisher, and divided by 2^32. There is no
//! generator state to thread through the engine, so any two calls with the
//! same inputs agree regardless of call order, and draws stay bit-compatible
//! with saves produced by the browser client.

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Hash an arbitrary key into `[0, 1)`.
pub fn hash_to_unit(key: &str) -> f64 {
    let mut h = FNV_OFFSET;
    for unit in key.encode_utf16() {
        h ^= u32::from(unit);
        h = h.wrapping_mul(FNV_PRIME);
    }
    h ^= h.wrapping_shl(13);
    h ^= h.wrapping_shr(17);
    h ^= h.wrapping_shl(5);
    f64::from(h) / TWO_POW_32
}

/// A draw scoped to one day of one game.
pub fn random(seed: u64, day: u32, salt: &str) -> f64 {
    hash_to_unit(&format!("{seed}|{day}|{salt}"))
}

/// A draw outside any day, used while the world is being created.
pub fn random_unscoped(seed: u64, salt: &str) -> f64 {
    hash_to_unit(&format!("{seed}|{salt}"))
}

/// Scale a unit draw to an integer in `min..=max`.
///
/// Returns `min` when the range is empty or inverted.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_inclusive(r: f64, min: u32, max: u32) -> u32 {
    let Some(span) = max.checked_sub(min).and_then(|s| s.checked_add(1)) else {
        return min;
    };
    let offset = (r.clamp(0.0, 1.0) * f64::from(span)).floor() as u32;
    min.saturating_add(offset.min(span.saturating_sub(1)))
}

/// Scale a unit draw to an index into a collection of `len` elements.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn scale_index(r: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let idx = (r.clamp(0.0, 1.0) * len as f64).floor() as usize;
    Some(idx.min(len.saturating_sub(1)))
}

/// Convenience wrapper binding a seed and day for a run of draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRng {
    seed: u64,
    day: u32,
}

impl DayRng {
    /// Bind draws to a seed and day.
    pub const fn new(seed: u64, day: u32) -> Self {
        Self { seed, day }
    }

    /// The day these draws belong to.
    pub const fn day(self) -> u32 {
        self.day
    }

    /// Raw draw in `[0, 1)`.
    pub fn unit(self, salt: &str) -> f64 {
        random(self.seed, self.day, salt)
    }

    /// `true` with probability `p`.
    pub fn chance(self, salt: &str, p: f64) -> bool {
        self.unit(salt) < p
    }

    /// Integer in `min..=max`.
    pub fn range(self, salt: &str, min: u32, max: u32) -> u32 {
        scale_inclusive(self.unit(salt), min, max)
    }

    /// Uniform index into `len` elements.
    pub fn pick(self, salt: &str, len: usize) -> Option<usize> {
        scale_index(self.unit(salt), len)
    }
}
