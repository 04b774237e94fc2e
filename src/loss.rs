//! Loss and delta utilities.
//!
//! Delta sign convention: `delta[i] = target[i] - output[i]`, so a positive
//! delta means the target exceeds the output. Deltas are computed in `i32`;
//! 8-bit operands never wrap.

/// Mean of squared elementwise differences. Empty input yields `0.0`.
///
/// # Panics
///
/// Panics if the slices differ in length.
///
/// ```
/// use binnet::loss::mean_squared_error;
///
/// assert_eq!(mean_squared_error(&[1i8, 2, 3], &[1i8, 4, 0]), 13.0 / 3.0);
/// ```
pub fn mean_squared_error<T: Copy + Into<i32>>(output: &[T], target: &[T]) -> f64 {
    assert_eq!(output.len(), target.len(), "output and target must have the same length");
    if output.is_empty() {
        return 0.0;
    }
    let sum: f64 = output
        .iter()
        .zip(target)
        .map(|(&o, &t)| {
            let d = f64::from(t.into() - o.into());
            d * d
        })
        .sum();
    sum / output.len() as f64
}

/// `target[i] - output[i]` for every index.
///
/// # Panics
///
/// Panics if the slices differ in length.
///
/// ```
/// use binnet::loss::elementwise_delta;
///
/// assert_eq!(elementwise_delta(&[-128i8, 5], &[127i8, 1]), vec![255, -4]);
/// ```
pub fn elementwise_delta<T: Copy + Into<i32>>(output: &[T], target: &[T]) -> Vec<i32> {
    assert_eq!(output.len(), target.len(), "output and target must have the same length");
    output
        .iter()
        .zip(target)
        .map(|(&o, &t)| t.into() - o.into())
        .collect()
}

/// Write the delta into `delta` and return the mean squared error.
///
/// # Panics
///
/// Panics if the three slices differ in length.
pub fn delta_into<T: Copy + Into<i32>>(output: &[T], target: &[T], delta: &mut [i32]) -> f64 {
    assert_eq!(output.len(), target.len(), "output and target must have the same length");
    assert_eq!(output.len(), delta.len(), "delta buffer must match output length");
    if output.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0f64;
    for ((&o, &t), d) in output.iter().zip(target).zip(delta.iter_mut()) {
        *d = t.into() - o.into();
        sum += f64::from(*d) * f64::from(*d);
    }
    sum / output.len() as f64
}
