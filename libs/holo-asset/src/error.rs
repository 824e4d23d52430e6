//! # Asset Errors

use holo_mesh::MeshError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while texturing, encoding or storing an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Texture source has no pixels
    #[error("Empty texture: {message}")]
    EmptyTexture { message: String },

    /// Depth field has no variation to derive normals from
    #[error("Flat depth field: {message}")]
    FlatDepth { message: String },

    /// Mesh rejected for export
    #[error("Invalid mesh for export: {message}")]
    InvalidMesh { message: String },

    /// Byte stream is not a well-formed GLB container
    #[error("Malformed GLB: {message}")]
    MalformedGlb { message: String },

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    pub fn empty_texture(message: impl Into<String>) -> Self {
        Self::EmptyTexture {
            message: message.into(),
        }
    }

    pub fn flat_depth(message: impl Into<String>) -> Self {
        Self::FlatDepth {
            message: message.into(),
        }
    }

    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    pub fn malformed_glb(message: impl Into<String>) -> Self {
        Self::MalformedGlb {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;
