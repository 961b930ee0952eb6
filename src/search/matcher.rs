//! Scale-bar matcher: normalization, per-scale scoring and best-match selection.

use crate::image::normalize::normalize_min_max;
use crate::image::resize::resize_u8_bilinear;
use crate::image::{ImageView, OwnedImage};
use crate::kernel::{IntegralImage, Kernel};
use crate::search::schedule::{ScaleCandidate, ScaleSchedule};
use crate::search::{Calibration, MatchConfig, MatchResult};
use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_event, trace_span};
use crate::util::{ScaleBarError, ScaleBarResult};
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::ZnccScalar as Zncc;
#[cfg(feature = "simd")]
use crate::kernel::simd::ZnccSimd as Zncc;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Normalized scene plus its integral tables, shared by every candidate.
struct PreparedScene {
    img: OwnedImage,
    integral: IntegralImage,
}

/// Locates a scale-bar template in scene images over a range of scales.
pub struct ScaleBarMatcher {
    template: Template,
    normalized: OwnedImage,
    cfg: MatchConfig,
}

impl ScaleBarMatcher {
    /// Creates a matcher with the default configuration.
    pub fn new(template: Template) -> Self {
        let normalized = normalize_min_max(template.view());
        Self {
            template,
            normalized,
            cfg: MatchConfig::default(),
        }
    }

    /// Replaces the matcher configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the template being searched for.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Searches `scene` for the template and derives the calibration.
    ///
    /// Returns [`ScaleBarError::NoMatchFound`] when no scale candidate fits
    /// inside the scene.
    pub fn match_image(&self, scene: ImageView<'_, u8>) -> ScaleBarResult<Calibration> {
        self.search(scene, None)
    }

    /// Like [`match_image`](Self::match_image), but stops with
    /// [`ScaleBarError::Cancelled`] once `cancel` is set.
    ///
    /// The flag is checked before each candidate is scored.
    pub fn match_image_cancellable(
        &self,
        scene: ImageView<'_, u8>,
        cancel: &AtomicBool,
    ) -> ScaleBarResult<Calibration> {
        self.search(scene, Some(cancel))
    }

    /// Scores a single candidate against `scene`.
    ///
    /// Returns `Ok(None)` when the resized template is empty or does not fit.
    pub fn evaluate_candidate(
        &self,
        scene: ImageView<'_, u8>,
        candidate: &ScaleCandidate,
    ) -> ScaleBarResult<Option<MatchResult>> {
        let prepared = prepare_scene(scene);
        self.evaluate(&prepared, candidate)
    }

    fn search(
        &self,
        scene: ImageView<'_, u8>,
        cancel: Option<&AtomicBool>,
    ) -> ScaleBarResult<Calibration> {
        let schedule = ScaleSchedule::new(self.cfg.sweep)?;
        let _span = trace_span!(
            "scale_search",
            scene_width = scene.width(),
            scene_height = scene.height(),
            template_width = self.template.width(),
            template_height = self.template.height(),
            candidates = schedule.len()
        )
        .entered();

        let prepared = prepare_scene(scene);
        let results = self.evaluate_all(&prepared, &schedule, cancel)?;

        let mut best: Option<MatchResult> = None;
        let mut evaluated = 0usize;
        for result in results.into_iter().flatten() {
            evaluated += 1;
            if best.map_or(true, |b| result.score > b.score) {
                best = Some(result);
            }
        }

        let best = best.ok_or(ScaleBarError::NoMatchFound {
            candidates: schedule.len(),
        })?;
        let mut calibration = Calibration::from_match(self.template.physical_length(), best);
        calibration.evaluated = evaluated;
        calibration.skipped = schedule.len() - evaluated;

        trace_event!(
            "best_match",
            resize_factor = best.resize_factor,
            score = best.score,
            x = best.top_left.0,
            y = best.top_left.1,
            width = best.width,
            units_per_pixel = calibration.units_per_pixel
        );
        Ok(calibration)
    }

    /// Scores every candidate, returning results in schedule order.
    fn evaluate_all(
        &self,
        prepared: &PreparedScene,
        schedule: &ScaleSchedule,
        cancel: Option<&AtomicBool>,
    ) -> ScaleBarResult<Vec<Option<MatchResult>>> {
        if self.cfg.parallel {
            self.evaluate_parallel(prepared, schedule, cancel)
        } else {
            self.evaluate_sequential(prepared, schedule, cancel)
        }
    }

    fn evaluate_sequential(
        &self,
        prepared: &PreparedScene,
        schedule: &ScaleSchedule,
        cancel: Option<&AtomicBool>,
    ) -> ScaleBarResult<Vec<Option<MatchResult>>> {
        let mut results = Vec::with_capacity(schedule.len());
        for candidate in schedule.iter() {
            check_cancel(cancel)?;
            results.push(self.evaluate(prepared, candidate)?);
        }
        Ok(results)
    }

    #[cfg(feature = "rayon")]
    fn evaluate_parallel(
        &self,
        prepared: &PreparedScene,
        schedule: &ScaleSchedule,
        cancel: Option<&AtomicBool>,
    ) -> ScaleBarResult<Vec<Option<MatchResult>>> {
        schedule
            .candidates()
            .par_iter()
            .map(|candidate| {
                check_cancel(cancel)?;
                self.evaluate(prepared, candidate)
            })
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn evaluate_parallel(
        &self,
        prepared: &PreparedScene,
        schedule: &ScaleSchedule,
        cancel: Option<&AtomicBool>,
    ) -> ScaleBarResult<Vec<Option<MatchResult>>> {
        self.evaluate_sequential(prepared, schedule, cancel)
    }

    fn evaluate(
        &self,
        prepared: &PreparedScene,
        candidate: &ScaleCandidate,
    ) -> ScaleBarResult<Option<MatchResult>> {
        let scene = prepared.img.view();
        let (width, height) =
            candidate.scaled_size(self.normalized.width(), self.normalized.height());
        if width < 1 || height < 1 || width > scene.width() || height > scene.height() {
            trace_event!(
                "scale_skipped",
                resize_factor = candidate.factor,
                width = width,
                height = height
            );
            return Ok(None);
        }

        let resized = resize_u8_bilinear(self.normalized.view(), width, height)?;
        let plan = TemplatePlan::from_view(resized.view());
        let peak = <Zncc as Kernel>::scan_best(scene, &prepared.integral, &plan)?;

        Ok(Some(MatchResult {
            resize_factor: candidate.factor,
            score: peak.score,
            top_left: (peak.x, peak.y),
            width,
            height,
        }))
    }
}

fn prepare_scene(scene: ImageView<'_, u8>) -> PreparedScene {
    let img = normalize_min_max(scene);
    let integral = IntegralImage::from_view(img.view());
    PreparedScene { img, integral }
}

fn check_cancel(cancel: Option<&AtomicBool>) -> ScaleBarResult<()> {
    match cancel {
        Some(flag) if flag.load(Ordering::Relaxed) => Err(ScaleBarError::Cancelled),
        _ => Ok(()),
    }
}

/// Searches `scene` for `template` with the default configuration.
pub fn match_scale_bar(
    scene: ImageView<'_, u8>,
    template: Template,
) -> ScaleBarResult<Calibration> {
    ScaleBarMatcher::new(template).match_image(scene)
}
