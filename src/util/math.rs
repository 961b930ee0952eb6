//! Arithmetic helpers shared by normalization, scaling and cropping.

/// Scales a pixel dimension by `factor`, truncating toward zero.
///
/// Negative or NaN products saturate to zero.
pub(crate) fn scaled_dim(dim: usize, factor: f64) -> usize {
    let scaled = dim as f64 * factor;
    if scaled.is_finite() && scaled > 0.0 {
        scaled as usize
    } else {
        0
    }
}

/// Rounds half away from zero and saturates into the `u8` range.
pub(crate) fn saturate_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Returns true when `value` is a usable physical length.
pub(crate) fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
