//! Binarizer - threshold a fixed-point vector into packed bits.
//!
//! Bit `i` of the result is `1` when `x[i] > threshold` and `0` otherwise;
//! equality binarizes to `0`. The threshold is either shared by every element
//! or given per element.
//!
//! # Examples
//!
//! ```
//! use binnet::binarize::{binarize, binarize_per_element};
//!
//! let x: [i8; 5] = [5, -2, 0, 3, -1];
//! assert_eq!(binarize(&x, 2).words(), &[9]);
//!
//! let t: [i8; 5] = [4, -3, 0, 3, -2];
//! assert_eq!(binarize_per_element(&x, &t).get_acts(), vec![0, 1, 4]);
//! ```

use crate::packed::PackedBits;
use crate::word::{Word, BITS_PER_WORD};

/// Binarize `x` against a shared scalar threshold.
pub fn binarize<T: Copy + PartialOrd>(x: &[T], threshold: T) -> PackedBits {
    let mut out = PackedBits::new(x.len());
    fill_words(x, &mut out, |_| threshold);
    out
}

/// Binarize `x` against one threshold per element.
///
/// # Panics
///
/// Panics if `thresholds.len() != x.len()`.
pub fn binarize_per_element<T: Copy + PartialOrd>(x: &[T], thresholds: &[T]) -> PackedBits {
    assert_eq!(x.len(), thresholds.len(), "one threshold per element required");
    let mut out = PackedBits::new(x.len());
    fill_words(x, &mut out, |i| thresholds[i]);
    out
}

/// Binarize `x` into an existing buffer against a shared threshold.
///
/// # Panics
///
/// Panics if `out.num_bits() != x.len()`.
pub fn binarize_into<T: Copy + PartialOrd>(x: &[T], threshold: T, out: &mut PackedBits) {
    assert_eq!(x.len(), out.num_bits(), "output length must match input length");
    fill_words(x, out, |_| threshold);
}

/// Binarize `x` into an existing buffer against per-element thresholds.
///
/// # Panics
///
/// Panics if the three lengths differ.
pub fn binarize_per_element_into<T: Copy + PartialOrd>(x: &[T], thresholds: &[T], out: &mut PackedBits) {
    assert_eq!(x.len(), thresholds.len(), "one threshold per element required");
    assert_eq!(x.len(), out.num_bits(), "output length must match input length");
    fill_words(x, out, |i| thresholds[i]);
}

/// Build each storage word from up to 64 consecutive elements.
///
/// Whole words are written, so padding bits of the last word end up cleared.
#[inline]
fn fill_words<T, F>(x: &[T], out: &mut PackedBits, threshold_at: F)
where
    T: Copy + PartialOrd,
    F: Fn(usize) -> T,
{
    let words = out.words_mut();
    for (k, chunk) in x.chunks(BITS_PER_WORD).enumerate() {
        let base = k * BITS_PER_WORD;
        let mut word: Word = 0;
        for (pos, &v) in chunk.iter().enumerate() {
            if v > threshold_at(base + pos) {
                word |= 1 << pos;
            }
        }
        words[k] = word;
    }
}
