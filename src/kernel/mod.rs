//! ZNCC correlation kernels.
//!
//! A kernel only supplies the correlation numerator `Σ t'(x, y) · I(x, y)` for
//! one placement; window statistics come from an [`IntegralImage`] built once
//! per scene, so the per-placement cost is a single dot product.

use crate::image::ImageView;
use crate::template::TemplatePlan;
use crate::util::{ScaleBarError, ScaleBarResult};

pub mod integral;
pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use integral::IntegralImage;

/// Best placement of a template inside an image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the template's top-left corner.
    pub x: usize,
    /// Y coordinate (row) of the template's top-left corner.
    pub y: usize,
    /// ZNCC score at this placement.
    pub score: f32,
}

/// Dense map of ZNCC scores over every valid placement.
///
/// The map is `(W - w + 1) x (H - h + 1)` for a `W x H` image and a `w x h`
/// template, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreMap {
    width: usize,
    height: usize,
    scores: Vec<f32>,
}

impl ScoreMap {
    pub(crate) fn from_vec(scores: Vec<f32>, width: usize, height: usize) -> Self {
        debug_assert_eq!(scores.len(), width * height);
        Self {
            width,
            height,
            scores,
        }
    }

    /// Returns the number of placement columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of placement rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the score at placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Returns all scores in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.scores
    }

    /// Returns the first maximum in row-major order.
    pub fn max_loc(&self) -> Option<Peak> {
        let mut best: Option<Peak> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            if best.map_or(true, |b| score > b.score) {
                best = Some(Peak {
                    x: idx % self.width,
                    y: idx / self.width,
                    score,
                });
            }
        }
        best
    }
}

/// Kernel trait for ZNCC evaluation.
///
/// Implementors provide the correlation numerator; scoring, dense maps and
/// best-placement scans are shared.
pub trait Kernel {
    /// Returns `Σ t' · I` for the template placed with its top-left at `(x, y)`.
    ///
    /// Callers guarantee the placement lies fully inside the image.
    fn dot_at(image: ImageView<'_, u8>, tpl: &TemplatePlan, x: usize, y: usize) -> f64;

    /// Computes the ZNCC coefficient at a single placement.
    ///
    /// Flat templates and flat windows score `0.0`. Scores are clamped to
    /// `[-1, 1]` to absorb rounding.
    fn score_at(
        image: ImageView<'_, u8>,
        integral: &IntegralImage,
        tpl: &TemplatePlan,
        x: usize,
        y: usize,
    ) -> f32 {
        if tpl.is_flat() {
            return 0.0;
        }
        let var_i = integral.window_variance(x, y, tpl.width(), tpl.height());
        if var_i <= 0.0 {
            return 0.0;
        }
        let dot = Self::dot_at(image, tpl, x, y);
        let score = dot / (tpl.var_t() * var_i).sqrt();
        if score.is_finite() {
            score.clamp(-1.0, 1.0) as f32
        } else {
            0.0
        }
    }

    /// Scores every valid placement and returns the dense map.
    fn score_map(
        image: ImageView<'_, u8>,
        integral: &IntegralImage,
        tpl: &TemplatePlan,
    ) -> ScaleBarResult<ScoreMap> {
        let (max_x, max_y) = placement_range(image, integral, tpl)?;
        let map_width = max_x + 1;
        let map_height = max_y + 1;
        let mut scores = Vec::with_capacity(map_width * map_height);
        for y in 0..=max_y {
            for x in 0..=max_x {
                scores.push(Self::score_at(image, integral, tpl, x, y));
            }
        }
        Ok(ScoreMap::from_vec(scores, map_width, map_height))
    }

    /// Returns the first row-major placement with the highest score.
    fn scan_best(
        image: ImageView<'_, u8>,
        integral: &IntegralImage,
        tpl: &TemplatePlan,
    ) -> ScaleBarResult<Peak> {
        let (max_x, max_y) = placement_range(image, integral, tpl)?;
        let mut best = Peak {
            x: 0,
            y: 0,
            score: f32::NEG_INFINITY,
        };
        for y in 0..=max_y {
            for x in 0..=max_x {
                let score = Self::score_at(image, integral, tpl, x, y);
                if score > best.score {
                    best = Peak { x, y, score };
                }
            }
        }
        Ok(best)
    }
}

/// Validates that the template fits and returns the last valid placement.
pub(crate) fn placement_range(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    tpl: &TemplatePlan,
) -> ScaleBarResult<(usize, usize)> {
    let img_width = image.width();
    let img_height = image.height();
    if integral.width() != img_width || integral.height() != img_height {
        return Err(ScaleBarError::InvalidDimensions {
            width: integral.width(),
            height: integral.height(),
        });
    }
    if img_width < tpl.width() || img_height < tpl.height() {
        return Err(ScaleBarError::RoiOutOfBounds {
            x: 0,
            y: 0,
            width: tpl.width(),
            height: tpl.height(),
            img_width,
            img_height,
        });
    }
    Ok((img_width - tpl.width(), img_height - tpl.height()))
}

/// Computes the dense ZNCC map of `tpl` over `image` with the scalar kernel.
///
/// Both views are used as-is; callers normalize beforehand if needed.
pub fn zncc_score_map(
    image: ImageView<'_, u8>,
    tpl: ImageView<'_, u8>,
) -> ScaleBarResult<ScoreMap> {
    let integral = IntegralImage::from_view(image);
    let plan = TemplatePlan::from_view(tpl);
    <scalar::ZnccScalar as Kernel>::score_map(image, &integral, &plan)
}

#[cfg(test)]
mod tests {
    use super::{zncc_score_map, Peak, ScoreMap};
    use crate::util::ScaleBarError;
    use crate::ImageView;

    #[test]
    fn hand_computed_three_by_three() {
        let scene = [0u8, 0, 0, 0, 9, 0, 0, 0, 0];
        let tpl = [9u8, 0, 0, 0];
        let scene = ImageView::from_slice(&scene, 3, 3).unwrap();
        let tpl = ImageView::from_slice(&tpl, 2, 2).unwrap();
        let map = zncc_score_map(scene, tpl).unwrap();

        assert_eq!((map.width(), map.height()), (2, 2));
        let third = -1.0f32 / 3.0;
        for (x, y) in [(0, 0), (1, 0), (0, 1)] {
            assert!((map.get(x, y).unwrap() - third).abs() < 1e-6);
        }
        assert!((map.get(1, 1).unwrap() - 1.0).abs() < 1e-6);
        let best = map.max_loc().unwrap();
        assert_eq!((best.x, best.y), (1, 1));
    }

    #[test]
    fn linear_ramp_matches_everywhere_and_first_wins() {
        let scene = [1u8, 2, 3, 4, 5, 6, 7, 8, 9];
        let tpl = [1u8, 2, 4, 5];
        let scene = ImageView::from_slice(&scene, 3, 3).unwrap();
        let tpl = ImageView::from_slice(&tpl, 2, 2).unwrap();
        let map = zncc_score_map(scene, tpl).unwrap();
        assert!(map.as_slice().iter().all(|s| (s - 1.0).abs() < 1e-6));
        let best = map.max_loc().unwrap();
        assert_eq!((best.x, best.y), (0, 0));
    }

    #[test]
    fn flat_windows_score_zero() {
        let scene = [5u8; 16];
        let tpl = [0u8, 255, 255, 0];
        let scene = ImageView::from_slice(&scene, 4, 4).unwrap();
        let tpl = ImageView::from_slice(&tpl, 2, 2).unwrap();
        let map = zncc_score_map(scene, tpl).unwrap();
        assert!(map.as_slice().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn oversized_template_is_rejected() {
        let scene = [0u8; 4];
        let tpl = [0u8; 6];
        let scene = ImageView::from_slice(&scene, 2, 2).unwrap();
        let tpl = ImageView::from_slice(&tpl, 3, 2).unwrap();
        let err = zncc_score_map(scene, tpl).unwrap_err();
        assert!(matches!(err, ScaleBarError::RoiOutOfBounds { .. }));
    }

    #[test]
    fn max_loc_prefers_first_maximum() {
        let map = ScoreMap::from_vec(vec![0.1, 0.7, 0.7, 0.2], 2, 2);
        assert_eq!(
            map.max_loc(),
            Some(Peak {
                x: 1,
                y: 0,
                score: 0.7
            })
        );
    }
}
