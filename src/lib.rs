//! Scalebar locates a scale-bar marker of known physical length in a large
//! image and converts the matched size into a physical-units-per-pixel ratio.
//!
//! The search stretches both images to the full `[0, 255]` range, sweeps the
//! template size up and down in fixed steps, scores each size with zero-mean
//! normalized cross-correlation (ZNCC) and keeps the strictly best peak.
//! Optional features add parallel candidate evaluation (`rayon`), a SIMD
//! correlation kernel (`simd`), file loading and overlay output (`image-io`)
//! and structured spans/events (`tracing`).
//!
//! ```
//! use scalebar::{ImageView, MatchConfig, ScaleBarMatcher, ScaleSweep, Template};
//!
//! let tpl: Vec<u8> = (0..16 * 6u32).map(|i| ((i * i * 7 + i * 13) % 256) as u8).collect();
//! let mut scene = vec![0u8; 48 * 24];
//! for y in 0..6 {
//!     for x in 0..16 {
//!         scene[(10 + y) * 48 + 5 + x] = tpl[y * 16 + x];
//!     }
//! }
//! let template = Template::new(tpl, 16, 6, 200.0).unwrap();
//! let cfg = MatchConfig {
//!     sweep: ScaleSweep { step: 0.01, steps: 20 },
//!     ..MatchConfig::default()
//! };
//! let scene = ImageView::from_slice(&scene, 48, 24).unwrap();
//! let cal = ScaleBarMatcher::new(template).with_config(cfg).match_image(scene).unwrap();
//! assert_eq!(cal.best.top_left, (5, 10));
//! assert_eq!(cal.best.width, 16);
//! assert_eq!(cal.units_per_pixel, 200.0 / 16.0);
//! ```

pub mod crop;
#[cfg(feature = "image-io")]
pub mod detect;
pub mod image;
pub mod kernel;
pub mod overlay;
pub mod search;
pub mod template;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crop::{CropController, CropRequest, PointerEvent};
pub use crate::image::normalize::normalize_min_max;
pub use crate::image::resize::resize_u8_bilinear;
pub use crate::image::{ImageView, OwnedImage};
pub use kernel::{zncc_score_map, Kernel, Peak, ScoreMap};
pub use overlay::{draw_rectangle, OverlayStyle, Rect, RgbImage};
pub use search::{
    match_scale_bar, Calibration, MatchConfig, MatchResult, ScaleBarMatcher, ScaleCandidate,
    ScaleSchedule, ScaleSweep, SweepDirection,
};
pub use template::{Template, TemplatePlan};
pub use util::{ScaleBarError, ScaleBarResult};
