//! Path-level entry points: load images, search, and write the overlay.
//!
//! Available when the `image-io` feature is enabled.

use crate::crop::{CropController, CropRequest, PointerEvent};
use crate::image::io::{load_gray_image, load_rgb_image, save_rgb_crop, save_rgb_image};
use crate::overlay::{draw_rectangle, OverlayStyle};
use crate::search::{Calibration, MatchConfig, ScaleBarMatcher};
use crate::template::Template;
use crate::util::{ScaleBarError, ScaleBarResult};
use std::path::{Path, PathBuf};

/// File name of the visualization written next to the scene image.
pub const OVERLAY_FILE_NAME: &str = "scale_bar_detected.jpg";

/// Result of [`detect_scale_bar`].
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Calibration derived from the best match.
    pub calibration: Calibration,
    /// Path of the written overlay, when visualization was requested.
    pub overlay_path: Option<PathBuf>,
}

/// Detects the scale bar in `image_path` using the template at `template_path`.
///
/// `physical_length` is the real-world length of the template's width. With
/// `visualize`, the match is outlined on the original color image and saved as
/// [`OVERLAY_FILE_NAME`] in the scene's directory.
pub fn detect_scale_bar<P: AsRef<Path>, Q: AsRef<Path>>(
    image_path: P,
    template_path: Q,
    physical_length: f64,
    visualize: bool,
) -> ScaleBarResult<Detection> {
    detect_scale_bar_with_config(
        image_path,
        template_path,
        physical_length,
        visualize,
        MatchConfig::default(),
    )
}

/// Like [`detect_scale_bar`] with an explicit search configuration.
pub fn detect_scale_bar_with_config<P: AsRef<Path>, Q: AsRef<Path>>(
    image_path: P,
    template_path: Q,
    physical_length: f64,
    visualize: bool,
    cfg: MatchConfig,
) -> ScaleBarResult<Detection> {
    let image_path = image_path.as_ref();
    let scene = load_gray_image(image_path)?;
    let template = Template::from_image(load_gray_image(template_path)?, physical_length)?;

    let calibration = ScaleBarMatcher::new(template)
        .with_config(cfg)
        .match_image(scene.view())?;

    let overlay_path = if visualize {
        Some(write_overlay(image_path, &calibration)?)
    } else {
        None
    };

    Ok(Detection {
        calibration,
        overlay_path,
    })
}

/// Outlines the best match on the original image and saves it beside it.
pub fn write_overlay(image_path: &Path, calibration: &Calibration) -> ScaleBarResult<PathBuf> {
    let mut canvas = load_rgb_image(image_path)?;
    draw_rectangle(&mut canvas, calibration.best.rect(), OverlayStyle::default());
    let out = image_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(OVERLAY_FILE_NAME);
    save_rgb_image(&canvas, &out)?;
    Ok(out)
}

/// Applies a pointer event to `controller` and saves the resulting crop.
///
/// Returns the next controller state and the written file, if any.
pub fn crop_and_save<P: AsRef<Path>, Q: AsRef<Path>>(
    image_path: P,
    controller: &CropController,
    event: PointerEvent,
    output_dir: Q,
) -> ScaleBarResult<(CropController, Option<PathBuf>)> {
    let (next, request) = controller.handle(event);
    let Some(CropRequest { region, file_name }) = request else {
        return Ok((next, None));
    };

    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir).map_err(|err| ScaleBarError::ImageIo {
        reason: err.to_string(),
    })?;
    let out = output_dir.join(file_name);
    save_rgb_crop(image_path, region, &out)?;
    Ok((next, Some(out)))
}
