//! Base-colour preparation.

use crate::error::{AssetError, AssetResult};
use config::AlbedoConfig;
use image::RgbImage;
use rayon::prelude::*;

/// ITU-R BT.601 luma weights.
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Contrast then brightness adjustment of the source photograph.
///
/// Contrast stretches each channel around the mean luminance,
/// `mean + (p − mean) × contrast`; brightness then scales the result. Values
/// are rounded and clamped to 8 bits. Returns a new image; the input is
/// unchanged.
///
/// # Example
///
/// ```rust
/// use holo_asset::texture::adjust_albedo;
/// use config::AlbedoConfig;
/// use image::{Rgb, RgbImage};
///
/// let flat = RgbImage::from_pixel(2, 2, Rgb([100, 100, 100]));
/// let out = adjust_albedo(&flat, &AlbedoConfig::default()).unwrap();
/// assert_eq!(out.get_pixel(0, 0), &Rgb([105, 105, 105]));
/// ```
pub fn adjust_albedo(image: &RgbImage, config: &AlbedoConfig) -> AssetResult<RgbImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(AssetError::empty_texture(format!(
            "albedo source is {}x{}",
            image.width(),
            image.height()
        )));
    }

    let pixel_count = f64::from(image.width()) * f64::from(image.height());
    let mean = image
        .pixels()
        .map(|p| {
            p.0.iter()
                .zip(LUMA_WEIGHTS)
                .map(|(&c, w)| f64::from(c) * w)
                .sum::<f64>()
        })
        .sum::<f64>()
        / pixel_count;

    let contrast = config.contrast;
    let brightness = config.brightness;
    let mut out = image.clone();
    out.par_chunks_mut(3).for_each(|pixel| {
        for channel in pixel {
            let stretched = mean + (f64::from(*channel) - mean) * contrast;
            *channel = (stretched * brightness).round().clamp(0.0, 255.0) as u8;
        }
    });
    Ok(out)
}
