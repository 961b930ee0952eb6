//! Region-of-interest cropping driven by pointer events.
//!
//! [`CropController`] holds the state of an interactive cropper: the crop
//! half-size as a fraction of the longer image side, the number of crops
//! produced so far and the scale of the preview the user clicks on. Events are
//! applied by [`CropController::handle`], which returns the next state and, for
//! clicks, a [`CropRequest`] describing what to extract and where to save it.

use crate::image::{ImageView, OwnedImage};
use crate::overlay::Rect;
use crate::util::ScaleBarResult;

/// Scroll increment applied to the half-size factor.
pub const SCROLL_STEP: f64 = 0.005;
/// Smallest allowed half-size factor.
pub const MIN_HALF_SIZE_FACTOR: f64 = 0.01;
/// Largest allowed half-size factor.
pub const MAX_HALF_SIZE_FACTOR: f64 = 0.2;

/// Pointer input in preview (display) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Primary click at a preview pixel.
    Click { x: f64, y: f64 },
    /// Wheel movement; positive grows the crop, negative shrinks it.
    Scroll { delta: i32 },
}

/// Crop to extract from the full-resolution image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CropRequest {
    /// Clamped region in full-resolution pixels.
    pub region: Rect,
    /// File name for the saved crop.
    pub file_name: String,
}

/// Cropper state.
#[derive(Clone, Debug, PartialEq)]
pub struct CropController {
    stem: String,
    image_width: usize,
    image_height: usize,
    display_scale: f64,
    half_size_factor: f64,
    saved_count: usize,
}

impl CropController {
    /// Creates a controller for an image of the given size.
    ///
    /// `stem` is the source file name without extension, used to name crops.
    pub fn new(stem: impl Into<String>, image_width: usize, image_height: usize) -> Self {
        Self {
            stem: stem.into(),
            image_width,
            image_height,
            display_scale: 0.3,
            half_size_factor: 0.05,
            saved_count: 0,
        }
    }

    /// Sets the preview scale used to map clicks back to full resolution.
    pub fn with_display_scale(mut self, display_scale: f64) -> Self {
        self.display_scale = display_scale;
        self
    }

    /// Sets the initial half-size factor, clamped to the allowed range.
    pub fn with_half_size_factor(mut self, factor: f64) -> Self {
        self.half_size_factor = factor.clamp(MIN_HALF_SIZE_FACTOR, MAX_HALF_SIZE_FACTOR);
        self
    }

    /// Returns the crop half-size as a fraction of the longer image side.
    pub fn half_size_factor(&self) -> f64 {
        self.half_size_factor
    }

    /// Returns how many crops have been requested so far.
    pub fn saved_count(&self) -> usize {
        self.saved_count
    }

    /// Returns the preview-to-full-resolution scale.
    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }

    /// Half of the crop side in full-resolution pixels.
    pub fn half_size(&self) -> usize {
        let longest = self.image_width.max(self.image_height) as f64;
        (longest * self.half_size_factor).round() as usize
    }

    /// Applies `event`, returning the next state and an optional crop request.
    pub fn handle(&self, event: PointerEvent) -> (Self, Option<CropRequest>) {
        match event {
            PointerEvent::Click { x, y } => self.on_click(x, y),
            PointerEvent::Scroll { delta } => (self.on_scroll(delta), None),
        }
    }

    fn on_click(&self, x: f64, y: f64) -> (Self, Option<CropRequest>) {
        let cx = (x / self.display_scale).trunc();
        let cy = (y / self.display_scale).trunc();
        if !cx.is_finite() || !cy.is_finite() || cx < 0.0 || cy < 0.0 {
            return (self.clone(), None);
        }
        let region = match crop_square(
            self.image_width,
            self.image_height,
            cx as usize,
            cy as usize,
            self.half_size(),
        ) {
            Some(region) => region,
            None => return (self.clone(), None),
        };

        let mut next = self.clone();
        next.saved_count += 1;
        let file_name = format!("{}_crop{}.jpg", self.stem, next.saved_count);
        (next, Some(CropRequest { region, file_name }))
    }

    fn on_scroll(&self, delta: i32) -> Self {
        let step = if delta > 0 { SCROLL_STEP } else { -SCROLL_STEP };
        let mut next = self.clone();
        next.half_size_factor =
            (self.half_size_factor + step).clamp(MIN_HALF_SIZE_FACTOR, MAX_HALF_SIZE_FACTOR);
        next
    }
}

/// Square region of half-size `half` centered on `(cx, cy)`, clamped to the image.
///
/// Returns `None` when the clamped region is empty.
pub fn crop_square(
    image_width: usize,
    image_height: usize,
    cx: usize,
    cy: usize,
    half: usize,
) -> Option<Rect> {
    let x0 = cx.saturating_sub(half);
    let y0 = cy.saturating_sub(half);
    let x1 = cx.saturating_add(half).min(image_width);
    let y1 = cy.saturating_add(half).min(image_height);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(Rect {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    })
}

/// Copies `region` out of `image`.
pub fn extract(image: ImageView<'_, u8>, region: Rect) -> ScaleBarResult<OwnedImage> {
    let roi = image.roi(region.x, region.y, region.width, region.height)?;
    Ok(OwnedImage::from_view(roi))
}
