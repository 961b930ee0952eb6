#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scalebar::{resize_u8_bilinear, ImageView};

/// Random texture that spans the full `[0, 255]` range.
pub fn noise(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
    data[0] = 0;
    data[1] = 255;
    data
}

/// Copies a `width x height` patch into `scene` at `(x0, y0)`.
pub fn paste(
    scene: &mut [u8],
    scene_width: usize,
    patch: &[u8],
    width: usize,
    height: usize,
    x0: usize,
    y0: usize,
) {
    for y in 0..height {
        let dst = (y0 + y) * scene_width + x0;
        scene[dst..dst + width].copy_from_slice(&patch[y * width..(y + 1) * width]);
    }
}

/// Resizes a template buffer with the library's bilinear resampler.
pub fn scaled(data: &[u8], width: usize, height: usize, dst_w: usize, dst_h: usize) -> Vec<u8> {
    let view = ImageView::from_slice(data, width, height).unwrap();
    resize_u8_bilinear(view, dst_w, dst_h).unwrap().into_data()
}
