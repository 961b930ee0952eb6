//! Multi-scale search for a scale bar and the resulting calibration.
//!
//! The matcher normalizes both images, walks the [`ScaleSchedule`], scores a
//! resized template at every candidate factor and keeps the strictly best
//! ZNCC peak. The winning template width then yields the physical length
//! represented by one pixel.

mod matcher;
pub mod schedule;

pub use matcher::{match_scale_bar, ScaleBarMatcher};
pub use schedule::{ScaleCandidate, ScaleSchedule, ScaleSweep, SweepDirection};

use crate::overlay::Rect;

/// Configuration for the scale search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchConfig {
    /// Step size and budget of the two sweeps.
    pub sweep: ScaleSweep,
    /// Evaluate scale candidates in parallel when the `rayon` feature is on.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            sweep: ScaleSweep::default(),
            parallel: false,
        }
    }
}

/// Best placement of the template at one scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchResult {
    /// Resize factor applied to the template.
    pub resize_factor: f64,
    /// Peak ZNCC score in `[-1, 1]`.
    pub score: f32,
    /// Top-left corner `(x, y)` of the matched region in scene pixels.
    pub top_left: (usize, usize),
    /// Width of the resized template in pixels.
    pub width: usize,
    /// Height of the resized template in pixels.
    pub height: usize,
}

impl MatchResult {
    /// Returns the exclusive bottom-right corner of the matched region.
    pub fn bottom_right(&self) -> (usize, usize) {
        (self.top_left.0 + self.width, self.top_left.1 + self.height)
    }

    /// Returns the matched region as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.top_left.0,
            y: self.top_left.1,
            width: self.width,
            height: self.height,
        }
    }
}

/// Outcome of a successful scale search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    /// Physical units represented by one pixel (e.g. mils per pixel).
    pub units_per_pixel: f64,
    /// Winning match.
    pub best: MatchResult,
    /// Number of candidates that were scored.
    pub evaluated: usize,
    /// Number of candidates skipped because the resized template did not fit.
    pub skipped: usize,
}

impl Calibration {
    /// Derives the calibration from the template's physical length and the best match.
    pub fn from_match(physical_length: f64, best: MatchResult) -> Self {
        Self {
            units_per_pixel: physical_length / best.width as f64,
            best,
            evaluated: 0,
            skipped: 0,
        }
    }

    /// Converts a pixel distance to physical units.
    pub fn to_physical(&self, pixels: f64) -> f64 {
        pixels * self.units_per_pixel
    }

    /// Converts a physical distance to pixels.
    pub fn to_pixels(&self, length: f64) -> f64 {
        length / self.units_per_pixel
    }
}
