//! Weight and activation-parameter updates.
//!
//! # Weight rule
//!
//! For each row `i` of a column, with `s_i = ±1` the current weight,
//!
//! ```text
//! target_i = s_i * learning_rate - input[i] * delta
//! bit_i    = target_i > 0
//! ```
//!
//! `learning_rate` acts as inertia: a weight keeps its sign unless
//! `input[i] * delta` outweighs it. Inputs of any supported width go through
//! [`UpdateInput`], which widens them losslessly before the arithmetic.
//!
//! # Activation-parameter rule
//!
//! Each learnable parameter `p` of [`param_activation`](crate::activation::param_activation)
//! moves by `learning_rate / m * Σ e_i * ∂f/∂p (x_i)`, where `e_i` is the
//! target-minus-output error of unit `i`.

use crate::activation::ActivationParams;
use crate::packed::PackedBits;
use crate::word::BITS_PER_WORD;

/// Element type accepted by [`update_weights`].
///
/// Implemented once per signed integer width; the caller picks the width
/// statically at the call site.
pub trait UpdateInput: Copy {
    /// Lossless widening for the update arithmetic.
    fn widen(self) -> i64;
}

macro_rules! impl_update_input {
    ($($t:ty),*) => {
        $(
            impl UpdateInput for $t {
                #[inline(always)]
                fn widen(self) -> i64 {
                    i64::from(self)
                }
            }
        )*
    };
}

impl_update_input!(i8, i16, i32);

/// Re-binarize a weight column in place from an input vector and a delta.
///
/// Only rows `< m` are written; padding bits keep whatever they held.
///
/// # Panics
///
/// Panics if `input.len() != weight_column.num_bits()`.
///
/// # Examples
///
/// ```
/// use binnet::{update_weights, PackedBits};
///
/// let mut w = PackedBits::from_words(&[9], 5).unwrap();
/// update_weights(&[13i8, 9, 127, 6, 3], 20, 103, &mut w);
/// assert_eq!(w.words(), &[0]);
/// ```
pub fn update_weights<T: UpdateInput>(
    input: &[T],
    delta: i32,
    learning_rate: i32,
    weight_column: &mut PackedBits,
) {
    assert_eq!(
        input.len(),
        weight_column.num_bits(),
        "input length must match weight column length"
    );
    let delta = i64::from(delta);
    let rate = i64::from(learning_rate);

    for (chunk, word) in input
        .chunks(BITS_PER_WORD)
        .zip(weight_column.words_mut().iter_mut())
    {
        let mut updated = *word;
        for (pos, &x) in chunk.iter().enumerate() {
            let bit = 1u64 << pos;
            let sign = if updated & bit != 0 { rate } else { -rate };
            if sign - x.widen() * delta > 0 {
                updated |= bit;
            } else {
                updated &= !bit;
            }
        }
        *word = updated;
    }
}

/// Adjust the parametric activation from pre-activations and their errors.
///
/// `errors[i]` is `target - output` for unit `i`. Empty inputs leave the
/// parameters unchanged.
///
/// # Panics
///
/// Panics if `pre_activations.len() != errors.len()`.
pub fn update_activation_params(
    params: &mut ActivationParams,
    pre_activations: &[f32],
    errors: &[f32],
    learning_rate: f32,
) {
    assert_eq!(
        pre_activations.len(),
        errors.len(),
        "one error per pre-activation required"
    );
    if errors.is_empty() {
        return;
    }

    let (mut g_slope, mut g_level, mut g_offset) = (0.0f32, 0.0f32, 0.0f32);
    for (&x, &e) in pre_activations.iter().zip(errors) {
        if x <= params.level {
            g_slope += e * (x - params.level);
            g_level -= e * params.slope;
        } else {
            g_level -= e;
        }
        g_offset += e;
    }

    let scale = learning_rate / errors.len() as f32;
    params.slope += scale * g_slope;
    params.level += scale * g_level;
    params.offset += scale * g_offset;
}
