//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::OwnedImage;
use crate::overlay::{Rect, RgbImage};
use crate::util::{ScaleBarError, ScaleBarResult};
use std::path::Path;

/// Creates an owned image from a grayscale image buffer.
pub fn owned_from_gray_image(img: &image::GrayImage) -> ScaleBarResult<OwnedImage> {
    OwnedImage::new(
        img.as_raw().clone(),
        img.width() as usize,
        img.height() as usize,
    )
}

/// Creates an owned grayscale image from a dynamic image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> ScaleBarResult<OwnedImage> {
    owned_from_gray_image(&img.to_luma8())
}

fn open<P: AsRef<Path>>(path: P) -> ScaleBarResult<image::DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|err| ScaleBarError::ResourceNotFound {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Loads an image from disk and converts it to a grayscale owned image.
///
/// Color images are reduced with the `image` crate's luma conversion, which
/// weights channels with Rec. 709 coefficients (0.2126, 0.7152, 0.0722)
/// rather than the Rec. 601 weights (0.299, 0.587, 0.114) used by OpenCV's
/// `BGR2GRAY`, so gray levels of color inputs can differ by a few units.
///
/// Any failure to open or decode the file is reported as
/// [`ScaleBarError::ResourceNotFound`].
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> ScaleBarResult<OwnedImage> {
    owned_from_dynamic_image(&open(path)?)
}

/// Loads an image from disk as 8-bit RGB, used as the overlay canvas.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> ScaleBarResult<RgbImage> {
    let rgb = open(path)?.to_rgb8();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    RgbImage::new(rgb.into_raw(), width, height)
}

/// Writes an RGB buffer to `path`; the format follows the file extension.
pub fn save_rgb_image<P: AsRef<Path>>(img: &RgbImage, path: P) -> ScaleBarResult<()> {
    let buf = image::RgbImage::from_raw(
        img.width() as u32,
        img.height() as u32,
        img.data().to_vec(),
    )
    .ok_or_else(|| ScaleBarError::ImageIo {
        reason: "rgb buffer does not match its dimensions".to_string(),
    })?;
    buf.save(path).map_err(|err| ScaleBarError::ImageIo {
        reason: err.to_string(),
    })
}

/// Reads the pixel dimensions of an image file without decoding it.
pub fn image_size<P: AsRef<Path>>(path: P) -> ScaleBarResult<(usize, usize)> {
    let path = path.as_ref();
    let (width, height) =
        image::image_dimensions(path).map_err(|err| ScaleBarError::ResourceNotFound {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
    Ok((width as usize, height as usize))
}

/// Crops `region` out of the RGB image at `src` and writes it to `dst`.
///
/// Fails with [`ScaleBarError::RoiOutOfBounds`] when `region` is not fully
/// inside the image.
pub fn save_rgb_crop<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    region: Rect,
    dst: Q,
) -> ScaleBarResult<()> {
    let rgb = open(src)?.to_rgb8();
    let img_width = rgb.width() as usize;
    let img_height = rgb.height() as usize;
    let fits = region.width > 0
        && region.height > 0
        && region
            .x
            .checked_add(region.width)
            .is_some_and(|end| end <= img_width)
        && region
            .y
            .checked_add(region.height)
            .is_some_and(|end| end <= img_height);
    if !fits {
        return Err(ScaleBarError::RoiOutOfBounds {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
            img_width,
            img_height,
        });
    }

    let crop = image::imageops::crop_imm(
        &rgb,
        region.x as u32,
        region.y as u32,
        region.width as u32,
        region.height as u32,
    )
    .to_image();
    crop.save(dst).map_err(|err| ScaleBarError::ImageIo {
        reason: err.to_string(),
    })
}
