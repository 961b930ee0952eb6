//! Grayscale image views and owned buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. ROI slices are zero-copy
//! views into the same backing slice and retain the original stride.

use crate::util::{ScaleBarError, ScaleBarResult};

#[cfg(feature = "image-io")]
pub mod io;
pub mod normalize;
pub mod resize;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> ScaleBarResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> ScaleBarResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(ScaleBarError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> ScaleBarResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(ScaleBarError::InvalidDimensions { width, height });
        }

        let out_of_bounds = ScaleBarError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .ok_or(ScaleBarError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self
            .data
            .get(start..)
            .ok_or(ScaleBarError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new(data, width, height, self.stride)
    }
}

impl ImageView<'_, u8> {
    /// Returns the minimum and maximum sample values.
    pub fn min_max(&self) -> (u8, u8) {
        let mut lo = u8::MAX;
        let mut hi = u8::MIN;
        for y in 0..self.height {
            let row = self.row(y).expect("row within view bounds");
            for &value in row {
                lo = lo.min(value);
                hi = hi.max(value);
            }
        }
        (lo, hi)
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> ScaleBarResult<usize> {
    if width == 0 || height == 0 {
        return Err(ScaleBarError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(ScaleBarError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(ScaleBarError::InvalidDimensions { width, height })?;
    Ok(needed)
}

/// Owned contiguous grayscale image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Wraps a contiguous row-major buffer of exactly `width * height` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> ScaleBarResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScaleBarError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(ScaleBarError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(ScaleBarError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ScaleBarError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_, u8>) -> Self {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            data.extend_from_slice(view.row(y).expect("row within view bounds"));
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
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

    /// Returns the row-major sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image and returns its sample buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
