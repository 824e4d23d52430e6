//! # Depth Fields
//!
//! Per-pixel depth buffers and the preparation steps applied before mesh
//! construction:
//!
//! - **normalized**: min/max normalization to [0, 1]
//! - **with_convention**: depth sign policy (see [`DepthConvention`])
//! - **filter::bilateral**: edge-preserving smoothing
//! - **masked**: silhouette masking
//! - **variance**: flatness measure used for strategy selection

pub mod filter;


pub use filter::bilateral;

use crate::error::{MeshError, MeshResult};
use crate::mask::Mask;
use config::DepthConvention;
use image::GrayImage;

/// Row-major float depth buffer.
///
/// Raw values have no fixed scale until [`DepthField::normalized`] maps them
/// into [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct DepthField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl DepthField {
    /// Wraps a raw buffer, checking its length and rejecting non-finite values.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> MeshResult<Self> {
        if width == 0 || height == 0 {
            return Err(MeshError::invalid_depth(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        if data.len() != width * height {
            return Err(MeshError::invalid_depth(format!(
                "expected {} samples for {width}x{height}, got {}",
                width * height,
                data.len()
            )));
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(MeshError::invalid_depth(format!(
                "non-finite sample at index {index}"
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a field from a function of `(col, row)`, validated like [`DepthField::new`].
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> MeshResult<Self> {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(col, row));
            }
        }
        Self::new(width, height, data)
    }

    /// A field with the same value everywhere.
    pub fn constant(width: usize, height: usize, value: f32) -> MeshResult<Self> {
        Self::new(width, height, vec![value; width * height])
    }

    /// Reads an 8-bit depth image (as produced by most estimators' previews).
    pub fn from_luma(gray: &GrayImage) -> MeshResult<Self> {
        let data = gray.as_raw().iter().map(|&v| f32::from(v)).collect();
        Self::new(gray.width() as usize, gray.height() as usize, data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Sample at `(col, row)`.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f32 {
        self.data[row * self.width + col]
    }

    /// Sample with coordinates clamped to the field.
    #[inline]
    pub fn get_clamped(&self, col: isize, row: isize) -> f32 {
        let c = col.clamp(0, self.width as isize - 1) as usize;
        let r = row.clamp(0, self.height as isize - 1) as usize;
        self.get(c, r)
    }

    /// Smallest and largest sample.
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// True when every sample has the same value.
    pub fn is_constant(&self) -> bool {
        let (lo, hi) = self.min_max();
        hi <= lo
    }

    /// Maps samples to [0, 1] via `(v − min) / (max − min)`.
    ///
    /// A constant field maps to all zeros.
    pub fn normalized(&self) -> Self {
        let (lo, hi) = self.min_max();
        let range = hi - lo;
        let data = if range > 0.0 {
            self.data.iter().map(|&v| (v - lo) / range).collect()
        } else {
            vec![0.0; self.data.len()]
        };
        self.with_data(data)
    }

    /// Applies the estimator's sign convention to a normalized field.
    pub fn with_convention(&self, convention: DepthConvention) -> Self {
        match convention {
            DepthConvention::Inverted => self.map(|v| 1.0 - v),
            DepthConvention::Direct => self.clone(),
        }
    }

    /// Multiplies every sample by the mask's coverage.
    ///
    /// The mask is resampled to this field's dimensions first.
    pub fn masked(&self, mask: &Mask) -> Self {
        let weights = mask.resized(self.width as u32, self.height as u32).weights();
        let data = self
            .data
            .iter()
            .zip(weights)
            .map(|(&v, w)| v * w)
            .collect();
        self.with_data(data)
    }

    /// Population variance of all samples, computed in f64.
    pub fn variance(&self) -> f64 {
        let n = self.data.len() as f64;
        let mean = self.data.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
        self.data
            .iter()
            .map(|&v| {
                let d = f64::from(v) - mean;
                d * d
            })
            .sum::<f64>()
            / n
    }

    /// Bilinear resample to `width × height`, aligning pixel centres.
    pub fn resampled(&self, width: usize, height: usize) -> MeshResult<Self> {
        if width == 0 || height == 0 {
            return Err(MeshError::invalid_depth(format!(
                "cannot resample to {width}x{height}"
            )));
        }
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }

        let scale_x = self.width as f64 / width as f64;
        let scale_y = self.height as f64 / height as f64;
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;

        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            let sy = ((row as f64 + 0.5) * scale_y - 0.5).clamp(0.0, max_y);
            let y0 = sy.floor() as usize;
            let y1 = (y0 + 1).min(self.height - 1);
            let ty = sy - y0 as f64;
            for col in 0..width {
                let sx = ((col as f64 + 0.5) * scale_x - 0.5).clamp(0.0, max_x);
                let x0 = sx.floor() as usize;
                let x1 = (x0 + 1).min(self.width - 1);
                let tx = sx - x0 as f64;

                let top = lerp(f64::from(self.get(x0, y0)), f64::from(self.get(x1, y0)), tx);
                let bottom = lerp(f64::from(self.get(x0, y1)), f64::from(self.get(x1, y1)), tx);
                data.push(lerp(top, bottom, ty) as f32);
            }
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Applies `f` to every sample.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        self.with_data(self.data.iter().map(|&v| f(v)).collect())
    }

    fn with_data(&self, data: Vec<f32>) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
