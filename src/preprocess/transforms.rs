use image::imageops::{self, FilterType};
use image::metadata::Orientation;
use image::{DynamicImage, GrayImage};
use imageproc::contrast::{ThresholdType, threshold};
use std::borrow::Cow;

use crate::error::PreprocessError;

fn ensure_non_empty(width: u32, height: u32) -> Result<(), PreprocessError> {
    if width == 0 || height == 0 {
        return Err(PreprocessError::EmptyImage { width, height });
    }
    Ok(())
}

/// Re-render the buffer so that row 0 is the visual top.
///
/// Upright input comes back as the same `Cow`, untouched. Any rotation or
/// mirror yields a new buffer whose width and height may be swapped.
pub fn correct_orientation<'a>(
    image: Cow<'a, DynamicImage>,
    orientation: Orientation,
) -> Result<Cow<'a, DynamicImage>, PreprocessError> {
    ensure_non_empty(image.width(), image.height())?;

    if matches!(orientation, Orientation::NoTransforms) {
        return Ok(image);
    }

    let mut upright = image.into_owned();
    upright.apply_orientation(orientation);
    Ok(Cow::Owned(upright))
}

/// Luminance, then `0` where luma > threshold and `255` everywhere else.
///
/// A bright paper background becomes 0 and dark ink becomes 255, which is
/// the white-on-black polarity digit classifiers are trained on.
pub fn to_inverted_binary(image: &DynamicImage, luma_threshold: u8) -> GrayImage {
    let gray = image.to_luma8();
    threshold(&gray, luma_threshold, ThresholdType::BinaryInverted)
}

/// Luminance inverted without thresholding (`255 - luma`)
pub fn to_inverted_grayscale(image: &DynamicImage) -> GrayImage {
    let mut gray = image.to_luma8();
    imageops::invert(&mut gray);
    gray
}

/// Resample to exactly `width` x `height`
pub fn resize_to(
    image: &GrayImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<GrayImage, PreprocessError> {
    if width == 0 || height == 0 {
        return Err(PreprocessError::InvalidTargetSize { width, height });
    }
    ensure_non_empty(image.width(), image.height())?;

    Ok(imageops::resize(image, width, height, filter))
}
