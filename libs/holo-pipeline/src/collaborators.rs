//! # External Collaborators
//!
//! Segmentation and depth estimation happen outside this workspace. The
//! pipeline only sees these traits; model handles are created once by the
//! caller and passed in.

use holo_mesh::{DepthField, Mask};
use image::RgbImage;
use thiserror::Error;

/// Failure reported by a segmenter or depth estimator.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("{name} is unavailable")]
    Unavailable { name: &'static str },

    #[error("{name} failed: {message}")]
    Failed { name: &'static str, message: String },
}

impl CollaboratorError {
    pub fn failed(name: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            name,
            message: message.into(),
        }
    }
}

/// Produces a silhouette mask for an image.
///
/// The mask may be smaller than the image; it is resampled before use.
pub trait Segmenter: Send + Sync {
    fn segment(&self, image: &RgbImage) -> Result<Mask, CollaboratorError>;
}

/// Produces a raw depth field for an image.
pub trait DepthEstimator: Send + Sync {
    fn estimate(&self, image: &RgbImage) -> Result<DepthField, CollaboratorError>;
}

/// Segmenter that returns a mask computed ahead of time.
#[derive(Debug, Clone)]
pub struct PrecomputedSegmenter {
    mask: Mask,
}

impl PrecomputedSegmenter {
    pub fn new(mask: Mask) -> Self {
        Self { mask }
    }
}

impl Segmenter for PrecomputedSegmenter {
    fn segment(&self, _image: &RgbImage) -> Result<Mask, CollaboratorError> {
        Ok(self.mask.clone())
    }
}

/// Depth estimator that returns a depth field computed ahead of time.
#[derive(Debug, Clone)]
pub struct PrecomputedDepth {
    depth: DepthField,
}

impl PrecomputedDepth {
    pub fn new(depth: DepthField) -> Self {
        Self { depth }
    }
}

impl DepthEstimator for PrecomputedDepth {
    fn estimate(&self, _image: &RgbImage) -> Result<DepthField, CollaboratorError> {
        Ok(self.depth.clone())
    }
}
