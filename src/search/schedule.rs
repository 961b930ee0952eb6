//! Scale candidate enumeration.
//!
//! Both sweeps start at `1.0` and are materialized upfront as one ordered
//! list: the full upward sweep first, then the downward sweep. Factors are
//! accumulated step by step rather than computed as `1.0 ± k * step`, so the
//! truncated template sizes follow the accumulated floating-point values.

use crate::util::math::scaled_dim;
use crate::util::{ScaleBarError, ScaleBarResult};

/// Largest accepted per-direction step budget.
pub const MAX_SWEEP_STEPS: usize = 100_000;

/// Step size and step budget shared by both sweeps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSweep {
    /// Factor increment per step.
    pub step: f64,
    /// Maximum number of steps in each direction.
    pub steps: usize,
}

impl Default for ScaleSweep {
    fn default() -> Self {
        Self {
            step: 0.01,
            steps: 90,
        }
    }
}

/// Direction of the sweep that produced a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepDirection {
    /// Enlarging the template.
    Up,
    /// Shrinking the template.
    Down,
}

/// A single resize factor to evaluate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleCandidate {
    /// Position in the schedule.
    pub index: usize,
    /// Resize factor applied to both template dimensions.
    pub factor: f64,
    /// Sweep the factor came from.
    pub direction: SweepDirection,
}

impl ScaleCandidate {
    /// Returns the resized `(width, height)` for a template, truncated toward zero.
    pub fn scaled_size(&self, width: usize, height: usize) -> (usize, usize) {
        (scaled_dim(width, self.factor), scaled_dim(height, self.factor))
    }
}

/// Ordered list of scale candidates.
#[derive(Clone, Debug)]
pub struct ScaleSchedule {
    candidates: Vec<ScaleCandidate>,
}

impl ScaleSchedule {
    /// Builds the schedule for `sweep`.
    ///
    /// The downward sweep stops as soon as the factor would drop to zero or
    /// below; the upward sweep always runs its full budget. Budgets above
    /// [`MAX_SWEEP_STEPS`] are rejected with [`ScaleBarError::InvalidConfig`].
    pub fn new(sweep: ScaleSweep) -> ScaleBarResult<Self> {
        if !sweep.step.is_finite() || sweep.step <= 0.0 {
            return Err(ScaleBarError::InvalidConfig("sweep step must be positive"));
        }
        if sweep.steps > MAX_SWEEP_STEPS {
            return Err(ScaleBarError::InvalidConfig("sweep steps too large"));
        }

        let mut candidates = Vec::with_capacity(sweep.steps * 2);
        let mut factor = 1.0f64;
        for _ in 0..sweep.steps {
            factor += sweep.step;
            candidates.push(ScaleCandidate {
                index: candidates.len(),
                factor,
                direction: SweepDirection::Up,
            });
        }

        let mut factor = 1.0f64;
        for _ in 0..sweep.steps {
            factor -= sweep.step;
            if factor <= 0.0 {
                break;
            }
            candidates.push(ScaleCandidate {
                index: candidates.len(),
                factor,
                direction: SweepDirection::Down,
            });
        }

        Ok(Self { candidates })
    }

    /// Returns the candidates in evaluation order.
    pub fn candidates(&self) -> &[ScaleCandidate] {
        &self.candidates
    }

    /// Returns the number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true when the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Iterates over the candidates in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &ScaleCandidate> {
        self.candidates.iter()
    }
}
