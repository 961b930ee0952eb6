//! Scale-bar templates and their precomputed correlation plans.

use crate::image::{ImageView, OwnedImage};
use crate::util::math::is_positive_finite;
use crate::util::{ScaleBarError, ScaleBarResult};

mod plan;

pub use plan::TemplatePlan;

/// Owned scale-bar template with the physical length spanned by its width.
#[derive(Clone, Debug)]
pub struct Template {
    img: OwnedImage,
    physical_length: f64,
}

impl Template {
    /// Creates a template from a contiguous grayscale buffer.
    ///
    /// `physical_length` is the real-world length (e.g. in mils) covered by
    /// the template's horizontal extent and must be positive and finite.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        physical_length: f64,
    ) -> ScaleBarResult<Self> {
        let img = OwnedImage::new(data, width, height)?;
        Self::from_image(img, physical_length)
    }

    /// Wraps an owned image as a template.
    pub fn from_image(img: OwnedImage, physical_length: f64) -> ScaleBarResult<Self> {
        if !is_positive_finite(physical_length) {
            return Err(ScaleBarError::InvalidPhysicalLength {
                value: physical_length,
            });
        }
        Ok(Self {
            img,
            physical_length,
        })
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns the physical length covered by the template width.
    pub fn physical_length(&self) -> f64 {
        self.physical_length
    }
}
