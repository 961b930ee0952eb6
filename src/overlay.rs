//! Match visualization: rectangle outlines on RGB buffers.

use crate::image::ImageView;
use crate::util::{ScaleBarError, ScaleBarResult};

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left column.
    pub x: usize,
    /// Top row.
    pub y: usize,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

/// Color and line thickness of an outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayStyle {
    /// Line color as `[r, g, b]`.
    pub color: [u8; 3],
    /// Line width in pixels; `0` draws nothing.
    pub thickness: usize,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            thickness: 3,
        }
    }
}

/// Owned interleaved 8-bit RGB image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl RgbImage {
    /// Wraps an interleaved RGB buffer of exactly `width * height * 3` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> ScaleBarResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScaleBarError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(3))
            .ok_or(ScaleBarError::InvalidDimensions { width, height })?;
        if data.len() != needed {
            return Err(ScaleBarError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Expands a grayscale view into RGB.
    pub fn from_gray(view: ImageView<'_, u8>) -> Self {
        let mut data = Vec::with_capacity(view.width() * view.height() * 3);
        for y in 0..view.height() {
            for &v in view.row(y).expect("row within view bounds") {
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Self {
            data,
            width: view.width(),
            height: view.height(),
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the interleaved RGB samples, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 3;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    fn fill_span(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3]) {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.width as i64 - 1);
        let y1 = y1.min(self.height as i64 - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let idx = (y as usize * self.width + x as usize) * 3;
                self.data[idx..idx + 3].copy_from_slice(&color);
            }
        }
    }
}

/// Draws the outline of `rect` onto `img`.
///
/// The corners are `(x, y)` and `(x + width, y + height)`, both inclusive.
/// Each line is `thickness` pixels wide and centered on the rectangle edge;
/// parts falling outside the image are clipped.
pub fn draw_rectangle(img: &mut RgbImage, rect: Rect, style: OverlayStyle) {
    if style.thickness == 0 {
        return;
    }
    let lo = -((style.thickness / 2) as i64);
    let hi = ((style.thickness - 1) / 2) as i64;
    let left = rect.x as i64;
    let top = rect.y as i64;
    let right = left + rect.width as i64;
    let bottom = top + rect.height as i64;

    img.fill_span(left + lo, top + lo, right + hi, top + hi, style.color);
    img.fill_span(left + lo, bottom + lo, right + hi, bottom + hi, style.color);
    img.fill_span(left + lo, top + lo, left + hi, bottom + hi, style.color);
    img.fill_span(right + lo, top + lo, right + hi, bottom + hi, style.color);
}
