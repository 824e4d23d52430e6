//! # Silhouette Mask
//!
//! Binary single-channel mask: every pixel is either 0 or 255.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

/// Value of a foreground mask pixel.
pub const FOREGROUND: u8 = 255;
/// Value of a background mask pixel.
pub const BACKGROUND: u8 = 0;

/// Binarized silhouette mask.
///
/// # Example
///
/// ```rust
/// use holo_mesh::Mask;
/// use image::GrayImage;
///
/// let gray = GrayImage::from_fn(4, 4, |x, _| image::Luma([if x < 2 { 200 } else { 40 }]));
/// let mask = Mask::from_luma(&gray, 127);
/// assert!(mask.is_foreground(0, 0));
/// assert!(!mask.is_foreground(3, 0));
/// assert_eq!(mask.foreground_count(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    pixels: GrayImage,
}

impl Mask {
    /// Binarizes a grayscale image: values strictly above `threshold` become
    /// foreground.
    pub fn from_luma(gray: &GrayImage, threshold: u8) -> Self {
        let pixels = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            let Luma([value]) = *gray.get_pixel(x, y);
            Luma([if value > threshold { FOREGROUND } else { BACKGROUND }])
        });
        Self { pixels }
    }

    /// Builds a mask from a predicate over pixel coordinates.
    pub fn from_fn(width: u32, height: u32, mut inside: impl FnMut(u32, u32) -> bool) -> Self {
        let pixels = GrayImage::from_fn(width, height, |x, y| {
            Luma([if inside(x, y) { FOREGROUND } else { BACKGROUND }])
        });
        Self { pixels }
    }

    /// A mask covering the whole frame.
    pub fn full(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// True for foreground pixels. Coordinates outside the mask are background.
    #[inline]
    pub fn is_foreground(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return false;
        }
        self.pixels.get_pixel(x as u32, y as u32).0[0] == FOREGROUND
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.pixels.as_raw().iter().filter(|&&v| v == FOREGROUND).count()
    }

    /// True if at least one pixel is foreground.
    pub fn has_foreground(&self) -> bool {
        self.pixels.as_raw().iter().any(|&v| v == FOREGROUND)
    }

    /// Nearest-neighbour resample, so the result stays binary.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if width == self.width() && height == self.height() {
            return self.clone();
        }
        Self {
            pixels: imageops::resize(&self.pixels, width, height, FilterType::Nearest),
        }
    }

    /// Row-major coverage weights: 1.0 for foreground, 0.0 for background.
    pub fn weights(&self) -> Vec<f32> {
        self.pixels
            .as_raw()
            .iter()
            .map(|&v| if v == FOREGROUND { 1.0 } else { 0.0 })
            .collect()
    }

    /// Borrows the underlying 0/255 image.
    pub fn as_image(&self) -> &GrayImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let gray = GrayImage::from_raw(3, 1, vec![127, 128, 255]).unwrap();
        let mask = Mask::from_luma(&gray, 127);
        assert!(!mask.is_foreground(0, 0));
        assert!(mask.is_foreground(1, 0));
        assert!(mask.is_foreground(2, 0));
    }

    #[test]
    fn test_out_of_bounds_is_background() {
        let mask = Mask::full(2, 2);
        assert!(!mask.is_foreground(-1, 0));
        assert!(!mask.is_foreground(0, 2));
    }

    #[test]
    fn test_resized_stays_binary() {
        let mask = Mask::from_fn(8, 8, |x, y| x >= 2 && x < 6 && y >= 2 && y < 6);
        let resized = mask.resized(32, 32);
        assert_eq!(resized.width(), 32);
        assert!(resized
            .as_image()
            .as_raw()
            .iter()
            .all(|&v| v == FOREGROUND || v == BACKGROUND));
        let count = resized.foreground_count();
        assert!((15 * 15..=17 * 17).contains(&count));
    }

    #[test]
    fn test_empty_mask_has_no_foreground() {
        let mask = Mask::from_fn(4, 4, |_, _| false);
        assert!(!mask.has_foreground());
        assert!(mask.weights().iter().all(|&w| w == 0.0));
    }
}
