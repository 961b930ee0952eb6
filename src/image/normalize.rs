//! Min-max intensity normalization.
//!
//! Every image is stretched independently so that its darkest sample maps to
//! `0` and its brightest to `255`, which makes ZNCC scores comparable between
//! captures taken under different exposure. A constant image has no range to
//! stretch and maps to all zeros.

use crate::image::{ImageView, OwnedImage};
use crate::util::math::saturate_u8;

/// Stretches the intensity range of `src` linearly onto `[0, 255]`.
///
/// Uses `dst = round(v * scale + shift)` with
/// `scale = 255 / (max - min)` and `shift = -min * scale`. Halves round away
/// from zero; OpenCV's `cvRound` rounds them to even, so exact `.5` products
/// can land one level higher than in OpenCV.
pub fn normalize_min_max(src: ImageView<'_, u8>) -> OwnedImage {
    let (lo, hi) = src.min_max();
    let width = src.width();
    let height = src.height();

    if hi == lo {
        return OwnedImage::new(vec![0u8; width * height], width, height)
            .expect("dimensions come from a valid view");
    }

    let scale = 255.0 / f64::from(hi - lo);
    let shift = -f64::from(lo) * scale;
    let mut lut = [0u8; 256];
    for (value, slot) in lut.iter_mut().enumerate() {
        *slot = saturate_u8(value as f64 * scale + shift);
    }

    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = src.row(y).expect("row within view bounds");
        data.extend(row.iter().map(|&v| lut[v as usize]));
    }
    OwnedImage::new(data, width, height).expect("dimensions come from a valid view")
}
