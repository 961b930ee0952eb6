//! Bilinear resampling for grayscale `u8` images.
//!
//! Destination pixel centers are mapped to the source with half-pixel
//! alignment: `sx = (dx + 0.5) * src_w / dst_w - 0.5`. Coordinates left of the
//! first or right of the last source sample are clamped to the edge, so
//! resizing to the same dimensions is an exact copy.

use crate::image::{ImageView, OwnedImage};
use crate::util::math::saturate_u8;
use crate::util::{ScaleBarError, ScaleBarResult};

#[derive(Clone, Copy)]
struct Tap {
    i0: usize,
    i1: usize,
    frac: f32,
}

fn taps(src_len: usize, dst_len: usize) -> Vec<Tap> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len - 1;
    (0..dst_len)
        .map(|d| {
            let pos = (d as f64 + 0.5) * scale - 0.5;
            let floor = pos.floor();
            if floor < 0.0 {
                return Tap {
                    i0: 0,
                    i1: 0,
                    frac: 0.0,
                };
            }
            let i0 = floor as usize;
            if i0 >= last {
                return Tap {
                    i0: last,
                    i1: last,
                    frac: 0.0,
                };
            }
            Tap {
                i0,
                i1: i0 + 1,
                frac: (pos - floor) as f32,
            }
        })
        .collect()
}

/// Resizes `src` to `dst_width` x `dst_height` with bilinear interpolation.
pub fn resize_u8_bilinear(
    src: ImageView<'_, u8>,
    dst_width: usize,
    dst_height: usize,
) -> ScaleBarResult<OwnedImage> {
    if dst_width == 0 || dst_height == 0 {
        return Err(ScaleBarError::InvalidDimensions {
            width: dst_width,
            height: dst_height,
        });
    }
    if dst_width == src.width() && dst_height == src.height() {
        return Ok(OwnedImage::from_view(src));
    }

    let x_taps = taps(src.width(), dst_width);
    let y_taps = taps(src.height(), dst_height);
    let mut out = Vec::with_capacity(dst_width * dst_height);

    for ty in &y_taps {
        let row0 = src.row(ty.i0).expect("row in bounds");
        let row1 = src.row(ty.i1).expect("row in bounds");
        let fy = ty.frac;
        for tx in &x_taps {
            let fx = tx.frac;
            let a = row0[tx.i0] as f32;
            let b = row0[tx.i1] as f32;
            let c = row1[tx.i0] as f32;
            let d = row1[tx.i1] as f32;
            let top = a + (b - a) * fx;
            let bottom = c + (d - c) * fx;
            let value = top + (bottom - top) * fy;
            out.push(saturate_u8(f64::from(value)));
        }
    }

    OwnedImage::new(out, dst_width, dst_height)
}

#[cfg(test)]
mod tests {
    use super::resize_u8_bilinear;
    use crate::util::ScaleBarError;
    use crate::ImageView;

    #[test]
    fn same_size_is_identity() {
        let data: Vec<u8> = (0u8..12).map(|v| v * 20).collect();
        let view = ImageView::from_slice(&data, 4, 3).unwrap();
        let out = resize_u8_bilinear(view, 4, 3).unwrap();
        assert_eq!(out.data(), data.as_slice());
    }

    #[test]
    fn upscale_interpolates_between_samples() {
        let data = [0u8, 100];
        let view = ImageView::from_slice(&data, 2, 1).unwrap();
        let out = resize_u8_bilinear(view, 4, 1).unwrap();
        // sx = -0.25, 0.25, 0.75, 1.25 -> clamp, 25, 75, clamp
        assert_eq!(out.data(), &[0, 25, 75, 100]);
    }

    #[test]
    fn downscale_by_two_averages_pairs() {
        let data = [10u8, 30, 50, 70];
        let view = ImageView::from_slice(&data, 4, 1).unwrap();
        let out = resize_u8_bilinear(view, 2, 1).unwrap();
        assert_eq!(out.data(), &[20, 60]);
    }

    #[test]
    fn constant_image_stays_constant() {
        let data = [42u8; 35];
        let view = ImageView::from_slice(&data, 7, 5).unwrap();
        let out = resize_u8_bilinear(view, 11, 3).unwrap();
        assert!(out.data().iter().all(|&v| v == 42));
    }

    #[test]
    fn rejects_empty_target() {
        let data = [1u8; 4];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        let err = resize_u8_bilinear(view, 0, 2).unwrap_err();
        assert_eq!(
            err,
            ScaleBarError::InvalidDimensions {
                width: 0,
                height: 2
            }
        );
    }
}
