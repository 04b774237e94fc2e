//! Linear transform over packed binary vectors.
//!
//! # Bitwise matrix multiplication
//!
//! With activations `x ∈ {0, 1}` and weights `w ∈ {-1, +1}` (bit `1` is
//! `+1`), the product `x * w` for one position is `+1`, `-1` or `0`. Summed
//! over a word this is
//!
//! ```text
//! popcount(x & w) - popcount(x & !w)
//! ```
//!
//! [`forward`] accumulates that difference over every word of the column. It
//! returns the pre-activation for one output unit; the caller loops over
//! columns and applies the nonlinearity.
//!
//! [`forward_xnor`] is the variant where a cleared input bit encodes `-1`
//! instead of `0`, giving the full +/-1 dot product `m - 2 * popcount(x ^ w)`.
//!
//! Padding bits in the last word are masked off in both kernels.

use crate::matrix::WeightMatrix;
use crate::packed::PackedBits;
use crate::popcount::{DefaultPopcount, Popcount};
use crate::word::Word;

/// Signed sum of `w_i` over the positions where `x_i` is set.
///
/// # Panics
///
/// Panics if `x` and `w` have different lengths.
///
/// # Examples
///
/// ```
/// use binnet::{forward, PackedBits};
///
/// let x = PackedBits::from_words(&[9], 5).unwrap();
/// let w = PackedBits::from_words(&[31], 5).unwrap();
/// assert_eq!(forward(&x, &w), 2);
/// ```
#[inline]
pub fn forward(x: &PackedBits, w: &PackedBits) -> i32 {
    forward_with::<DefaultPopcount>(x, w)
}

/// [`forward`] with an explicit popcount strategy.
pub fn forward_with<P: Popcount>(x: &PackedBits, w: &PackedBits) -> i32 {
    assert_eq!(
        x.num_bits(),
        w.num_bits(),
        "input and weight column must have the same length"
    );
    let last = x.num_words().saturating_sub(1);
    let mask = x.tail_mask();
    x.words()
        .iter()
        .zip(w.words())
        .enumerate()
        .map(|(k, (&xk, &wk))| {
            let xk = if k == last { xk & mask } else { xk };
            word_forward::<P>(xk, wk)
        })
        .sum()
}

#[inline(always)]
fn word_forward<P: Popcount>(x: Word, w: Word) -> i32 {
    let pos = P::count(x & w) as i32;
    let neg = P::count(x & !w) as i32;
    pos - neg
}

/// Full +/-1 dot product: a cleared bit in either vector encodes `-1`.
///
/// # Panics
///
/// Panics if `x` and `w` have different lengths.
///
/// ```
/// use binnet::{forward_xnor, PackedBits};
///
/// let x = PackedBits::from_bools(&[true, false, true]);
/// let w = PackedBits::from_bools(&[true, true, false]);
/// // (+1)(+1) + (-1)(+1) + (+1)(-1)
/// assert_eq!(forward_xnor(&x, &w), -1);
/// ```
pub fn forward_xnor(x: &PackedBits, w: &PackedBits) -> i32 {
    assert_eq!(
        x.num_bits(),
        w.num_bits(),
        "input and weight column must have the same length"
    );
    let m = x.num_bits() as i32;
    let last = x.num_words().saturating_sub(1);
    let mask = x.tail_mask();
    let disagree: u32 = x
        .words()
        .iter()
        .zip(w.words())
        .enumerate()
        .map(|(k, (&xk, &wk))| {
            let diff = xk ^ wk;
            DefaultPopcount::count(if k == last { diff & mask } else { diff })
        })
        .sum();
    m - 2 * disagree as i32
}

/// Pre-activation of every output unit: [`forward`] once per column.
///
/// # Panics
///
/// Panics if `x.num_bits() != weights.num_rows()`.
pub fn forward_columns(x: &PackedBits, weights: &WeightMatrix) -> Vec<i32> {
    assert_eq!(
        x.num_bits(),
        weights.num_rows(),
        "input length must match weight rows"
    );
    weights.columns().iter().map(|w| forward(x, w)).collect()
}
