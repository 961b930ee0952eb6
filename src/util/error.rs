//! Error types for scalebar.

use thiserror::Error;

/// Result alias for scalebar operations.
pub type ScaleBarResult<T> = std::result::Result<T, ScaleBarError>;

/// Errors that can occur while loading images or searching for a scale bar.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ScaleBarError {
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer cannot hold the described image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region does not fit inside the image.
    #[error("roi {width}x{height} at ({x}, {y}) exceeds image {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The physical length attached to a template is not a positive number.
    #[error("physical length must be positive and finite, got {value}")]
    InvalidPhysicalLength { value: f64 },
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// An input image could not be opened or decoded.
    #[error("resource not found at {path}: {reason}")]
    ResourceNotFound { path: String, reason: String },
    /// An image could not be encoded or written.
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
    /// No scale candidate produced a template that fits inside the scene.
    #[error("failed to detect the scale bar: none of {candidates} scale candidates fit the scene")]
    NoMatchFound { candidates: usize },
    /// The search was cancelled through its cancel flag.
    #[error("scale search cancelled")]
    Cancelled,
}
