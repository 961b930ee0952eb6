//! Template plan precomputation for ZNCC.

use crate::image::ImageView;

/// Variance below which a template or window is treated as flat.
pub(crate) const FLAT_VARIANCE_EPS: f64 = 1e-8;

/// Precomputed statistics and zero-mean buffer for template matching.
///
/// `var_t` is the sum of squared deviations `Σ(t - mean)²`, not the
/// per-pixel variance, so the ZNCC denominator is `sqrt(var_t * var_i)`.
#[derive(Clone, Debug)]
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f32,
    var_t: f64,
    t_prime: Vec<f32>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> Self {
        let width = tpl.width();
        let height = tpl.height();
        let count = width * height;

        let mut sum = 0.0f64;
        for y in 0..height {
            let row = tpl.row(y).expect("row within template bounds");
            sum += row.iter().map(|&v| f64::from(v)).sum::<f64>();
        }
        let mean = sum / count as f64;

        let mut var_t = 0.0f64;
        let mut t_prime = Vec::with_capacity(count);
        for y in 0..height {
            let row = tpl.row(y).expect("row within template bounds");
            for &value in row {
                let d = f64::from(value) - mean;
                var_t += d * d;
                t_prime.push(d as f32);
            }
        }

        Self {
            width,
            height,
            mean: mean as f32,
            var_t,
            t_prime,
        }
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of template samples.
    pub fn len(&self) -> usize {
        self.t_prime.len()
    }

    /// Returns true when the plan holds no samples.
    pub fn is_empty(&self) -> bool {
        self.t_prime.is_empty()
    }

    /// Returns the mean intensity of the template.
    pub fn mean(&self) -> f32 {
        self.mean
    }

    /// Returns the sum of squared deviations from the mean.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }

    /// Returns true when the template has no intensity variation.
    pub fn is_flat(&self) -> bool {
        self.var_t <= FLAT_VARIANCE_EPS
    }

    /// Returns the zero-mean template buffer in row-major order.
    pub fn t_prime(&self) -> &[f32] {
        &self.t_prime
    }
}
