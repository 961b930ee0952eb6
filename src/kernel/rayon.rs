//! Rayon-parallel scans (feature-gated).
//!
//! Rows of placements are scored in parallel and merged in row order, so the
//! output is identical to the sequential kernel methods.

use crate::image::ImageView;
use crate::kernel::{placement_range, IntegralImage, Kernel, Peak, ScoreMap};
use crate::template::TemplatePlan;
use crate::util::ScaleBarResult;
use rayon::prelude::*;

/// Row-parallel dense score map.
pub fn score_map_par<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    tpl: &TemplatePlan,
) -> ScaleBarResult<ScoreMap> {
    let (max_x, max_y) = placement_range(image, integral, tpl)?;
    let map_width = max_x + 1;
    let map_height = max_y + 1;
    let mut scores = vec![0.0f32; map_width * map_height];
    scores
        .par_chunks_mut(map_width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = K::score_at(image, integral, tpl, x, y);
            }
        });
    Ok(ScoreMap::from_vec(scores, map_width, map_height))
}

/// Row-parallel best-placement scan.
///
/// Each row reports its first maximum; rows are then reduced in order with a
/// strict comparison, preserving row-major tie-breaking.
pub fn scan_best_par<K: Kernel>(
    image: ImageView<'_, u8>,
    integral: &IntegralImage,
    tpl: &TemplatePlan,
) -> ScaleBarResult<Peak> {
    let (max_x, max_y) = placement_range(image, integral, tpl)?;
    let row_best: Vec<Peak> = (0..=max_y)
        .into_par_iter()
        .map(|y| {
            let mut best = Peak {
                x: 0,
                y,
                score: f32::NEG_INFINITY,
            };
            for x in 0..=max_x {
                let score = K::score_at(image, integral, tpl, x, y);
                if score > best.score {
                    best = Peak { x, y, score };
                }
            }
            best
        })
        .collect();

    let mut best = row_best[0];
    for peak in row_best.into_iter().skip(1) {
        if peak.score > best.score {
            best = peak;
        }
    }
    Ok(best)
}
