//! SIMD-accelerated kernel using the `wide` crate.
//!
//! The inner template row loop is vectorized to process 8 pixels at a time
//! using `f32x8`; each row is reduced horizontally and accumulated in `f64`.

use crate::image::ImageView;
use crate::kernel::Kernel;
use crate::template::TemplatePlan;
use wide::f32x8;

const LANES: usize = 8;

/// Load 8 u8 values and convert to f32x8.
#[inline]
fn load_u8x8_as_f32x8(slice: &[u8]) -> f32x8 {
    f32x8::from([
        slice[0] as f32,
        slice[1] as f32,
        slice[2] as f32,
        slice[3] as f32,
        slice[4] as f32,
        slice[5] as f32,
        slice[6] as f32,
        slice[7] as f32,
    ])
}

/// Load 8 f32 values into f32x8.
#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

/// Horizontal sum of f32x8.
#[inline]
fn hsum(v: f32x8) -> f32 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3] + arr[4] + arr[5] + arr[6] + arr[7]
}

/// SIMD ZNCC kernel.
pub struct ZnccSimd;

impl Kernel for ZnccSimd {
    fn dot_at(image: ImageView<'_, u8>, tpl: &TemplatePlan, x: usize, y: usize) -> f64 {
        let tpl_width = tpl.width();
        let t_prime = tpl.t_prime();
        let simd_end = tpl_width / LANES * LANES;
        let mut dot = 0.0f64;

        for ty in 0..tpl.height() {
            let img_row = image.row(y + ty).expect("row within bounds for scan");
            let base = ty * tpl_width;
            let mut acc = f32x8::ZERO;

            let mut tx = 0;
            while tx < simd_end {
                let img_vals = load_u8x8_as_f32x8(&img_row[x + tx..]);
                let tpl_vals = load_f32x8(&t_prime[base + tx..]);
                acc += tpl_vals * img_vals;
                tx += LANES;
            }

            let mut row_dot = hsum(acc);
            while tx < tpl_width {
                row_dot += t_prime[base + tx] * img_row[x + tx] as f32;
                tx += 1;
            }
            dot += f64::from(row_dot);
        }
        dot
    }
}
