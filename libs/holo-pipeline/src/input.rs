//! # Input Adaptation
//!
//! Decodes request bytes into the fixed in-memory types the pipeline works
//! on: 8-bit RGB images, binary masks and float depth fields.

use crate::error::{PipelineError, PipelineResult};
use holo_mesh::{DepthField, Mask};
use image::imageops::{self, FilterType};
use image::RgbImage;
use log::debug;

/// Decodes any supported image format to 8-bit RGB.
pub fn decode_image(bytes: &[u8]) -> PipelineResult<RgbImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|source| PipelineError::decode("image", source))?
        .into_rgb8();
    if image.width() == 0 || image.height() == 0 {
        return Err(PipelineError::invalid_input("image has no pixels"));
    }
    Ok(image)
}

/// Decodes a mask image and binarizes it: luma above `threshold` is
/// foreground.
pub fn decode_mask(bytes: &[u8], threshold: u8) -> PipelineResult<Mask> {
    let gray = image::load_from_memory(bytes)
        .map_err(|source| PipelineError::decode("mask", source))?
        .into_luma8();
    Ok(Mask::from_luma(&gray, threshold))
}

/// Decodes a grayscale depth image, keeping 16-bit precision when present.
pub fn decode_depth(bytes: &[u8]) -> PipelineResult<DepthField> {
    let gray = image::load_from_memory(bytes)
        .map_err(|source| PipelineError::decode("depth", source))?
        .into_luma16();
    let data = gray.as_raw().iter().map(|&v| f32::from(v)).collect();
    Ok(DepthField::new(
        gray.width() as usize,
        gray.height() as usize,
        data,
    )?)
}

/// Downscales an image so its longest side is at most `max_side`, keeping
/// the aspect ratio. Images already within the cap are returned as is.
///
/// # Example
///
/// ```rust
/// use holo_pipeline::input::prepare_inference_image;
/// use image::RgbImage;
///
/// let small = prepare_inference_image(&RgbImage::new(1024, 768), 512);
/// assert_eq!(small.dimensions(), (512, 384));
/// ```
pub fn prepare_inference_image(image: &RgbImage, max_side: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    let longest = width.max(height);
    if longest <= max_side || max_side == 0 {
        return image.clone();
    }

    let scale = f64::from(max_side) / f64::from(longest);
    let new_width = ((f64::from(width) * scale).round() as u32).clamp(1, max_side);
    let new_height = ((f64::from(height) * scale).round() as u32).clamp(1, max_side);
    debug!("inference image {width}x{height} -> {new_width}x{new_height}");
    imageops::resize(image, new_width, new_height, FilterType::Lanczos3)
}
