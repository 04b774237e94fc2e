//! Stochastic bit-flip perturbation of weight words.
//!
//! `rate` in `[-1, 1]` sets both the amount and the direction of the noise.
//! The number of flips is drawn uniformly from `0 .. floor(W::BITS * |rate|)`.
//! Each flip picks a random bit position and drives it to `1` when
//! `rate > 0` or to `0` otherwise, so a non-positive rate can only clear
//! bits. Magnitudes beyond 1 are clamped; `0` and NaN are no-ops.

use crate::packed::PackedBits;
use crate::word::{BitWord, Word};
use rand::Rng;
use tracing::trace;

/// Randomly flip bits of `word` toward `1` (`rate > 0`) or `0` (`rate <= 0`).
///
/// # Examples
///
/// ```
/// use binnet::perturb::stochastic_perturb;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let w: u64 = 99_484_776_326;
/// let out = stochastic_perturb(w, -1.0, &mut rng);
/// assert!(out.count_ones() <= w.count_ones());
/// assert_eq!(out & !w, 0);
/// ```
pub fn stochastic_perturb<W: BitWord, R: Rng + ?Sized>(word: W, rate: f64, rng: &mut R) -> W {
    let span = flip_span::<W>(rate);
    if span == 0 {
        return word;
    }
    let flips = rng.gen_range(0..span);
    let mut out = word;
    for _ in 0..flips {
        let pos = rng.gen_range(0..W::BITS);
        out = if rate > 0.0 {
            out.with_bit(pos)
        } else {
            out.without_bit(pos)
        };
    }
    out
}

/// Apply [`stochastic_perturb`] to every storage word of a column.
///
/// Bits at or beyond `num_bits` keep their previous value.
pub fn perturb_column<R: Rng + ?Sized>(column: &mut PackedBits, rate: f64, rng: &mut R) {
    let mask = column.tail_mask();
    let last = column.num_words().saturating_sub(1);
    let before = column.num_set();
    for (k, word) in column.words_mut().iter_mut().enumerate() {
        let perturbed: Word = stochastic_perturb(*word, rate, rng);
        *word = if k == last {
            (perturbed & mask) | (*word & !mask)
        } else {
            perturbed
        };
    }
    trace!(rate, before, after = column.num_set(), "perturbed weight column");
}

/// Upper bound (exclusive) on the number of flips for one word.
fn flip_span<W: BitWord>(rate: f64) -> u32 {
    if rate.is_nan() || rate == 0.0 {
        return 0;
    }
    (f64::from(W::BITS) * rate.abs().min(1.0)).floor() as u32
}
