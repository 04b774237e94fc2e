//! Sign-based error back-propagation.
//!
//! The binarization step has no useful gradient, so the error of an output
//! unit is pushed back to each input scaled by the sign of the connecting
//! weight (straight-through estimate). One call handles one column; calling it
//! for every column into the same zeroed accumulator yields the delta for the
//! previous layer. Integer addition makes the column order irrelevant.

use crate::matrix::WeightMatrix;
use crate::packed::PackedBits;
use crate::word::BITS_PER_WORD;

/// Add `sign(w_i) * output_error` to `accumulate[i]` for every `i < m`.
///
/// # Panics
///
/// Panics if `accumulate.len() != weight_column.num_bits()`.
///
/// # Examples
///
/// ```
/// use binnet::{backward, PackedBits};
///
/// let w = PackedBits::from_bools(&[true, false, true]);
/// let mut acc = vec![0; 3];
/// backward(&w, 4, &mut acc);
/// backward(&w, -1, &mut acc);
/// assert_eq!(acc, vec![3, -3, 3]);
/// ```
pub fn backward(weight_column: &PackedBits, output_error: i32, accumulate: &mut [i32]) {
    assert_eq!(
        accumulate.len(),
        weight_column.num_bits(),
        "accumulator length must match weight column length"
    );
    if output_error == 0 {
        return;
    }
    // Chunks line up with storage words, so the short final chunk never
    // reaches the padding bits.
    for (chunk, &word) in accumulate.chunks_mut(BITS_PER_WORD).zip(weight_column.words()) {
        for (pos, acc) in chunk.iter_mut().enumerate() {
            if (word >> pos) & 1 == 1 {
                *acc += output_error;
            } else {
                *acc -= output_error;
            }
        }
    }
}

/// Delta for the previous layer from one error per output unit.
///
/// Zeroes a fresh accumulator and runs [`backward`] once per column.
///
/// # Panics
///
/// Panics if `errors.len() != weights.num_cols()`.
pub fn backward_columns(weights: &WeightMatrix, errors: &[i32]) -> Vec<i32> {
    assert_eq!(
        errors.len(),
        weights.num_cols(),
        "one error per weight column required"
    );
    let mut acc = vec![0; weights.num_rows()];
    for (column, &err) in weights.columns().iter().zip(errors) {
        backward(column, err, &mut acc);
    }
    acc
}
