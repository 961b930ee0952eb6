//! Summed-area tables for O(1) window statistics.

use crate::image::ImageView;

/// Integral images of sample values and squared sample values.
///
/// Both tables carry a zero row and column, so they are `(W + 1) x (H + 1)`.
/// Sums are exact `u64` integers, which makes the flat-window test exact.
#[derive(Clone, Debug)]
pub struct IntegralImage {
    width: usize,
    height: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl IntegralImage {
    /// Builds the tables for `image`.
    pub fn from_view(image: ImageView<'_, u8>) -> Self {
        let width = image.width();
        let height = image.height();
        let stride = width + 1;
        let mut sum = vec![0u64; stride * (height + 1)];
        let mut sum_sq = vec![0u64; stride * (height + 1)];

        for y in 0..height {
            let row = image.row(y).expect("row within image bounds");
            let mut row_sum = 0u64;
            let mut row_sum_sq = 0u64;
            for (x, &value) in row.iter().enumerate() {
                let v = u64::from(value);
                row_sum += v;
                row_sum_sq += v * v;
                let idx = (y + 1) * stride + x + 1;
                sum[idx] = sum[idx - stride] + row_sum;
                sum_sq[idx] = sum_sq[idx - stride] + row_sum_sq;
            }
        }

        Self {
            width,
            height,
            sum,
            sum_sq,
        }
    }

    /// Returns the width of the source image.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the source image.
    pub fn height(&self) -> usize {
        self.height
    }

    fn rect(table: &[u64], stride: usize, x: usize, y: usize, w: usize, h: usize) -> u64 {
        let a = table[y * stride + x];
        let b = table[y * stride + x + w];
        let c = table[(y + h) * stride + x];
        let d = table[(y + h) * stride + x + w];
        d + a - b - c
    }

    /// Returns `(Σ I, Σ I²)` over the `w x h` window at `(x, y)`.
    pub fn window_sums(&self, x: usize, y: usize, w: usize, h: usize) -> (u64, u64) {
        let stride = self.width + 1;
        (
            Self::rect(&self.sum, stride, x, y, w, h),
            Self::rect(&self.sum_sq, stride, x, y, w, h),
        )
    }

    /// Returns `Σ (I - mean)²` over the window.
    ///
    /// Evaluated as `(n·ΣI² - (ΣI)²) / n` in integer arithmetic first, so a
    /// constant window yields exactly zero.
    pub fn window_variance(&self, x: usize, y: usize, w: usize, h: usize) -> f64 {
        let (s, s2) = self.window_sums(x, y, w, h);
        let n = (w * h) as u128;
        let scaled = n * u128::from(s2) - u128::from(s) * u128::from(s);
        scaled as f64 / n as f64
    }
}
