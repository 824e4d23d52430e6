//! # Mesh Errors
//!
//! Error types for mesh synthesis operations.

use thiserror::Error;

/// Errors that can occur during mesh synthesis.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The mask has no foreground pixels, so there is no silhouette to extrude.
    #[error("No contour found in mask")]
    NoContourFound,

    /// Polygon cannot be extruded (too few points, zero area, self-intersecting)
    #[error("Degenerate polygon: {message}")]
    DegeneratePolygon { message: String },

    /// Invalid depth field dimensions or values
    #[error("Invalid depth field: {message}")]
    InvalidDepthField { message: String },

    /// Grid too small or inconsistent with its depth field
    #[error("Invalid grid {rows}x{cols}: {message}")]
    InvalidGrid {
        rows: usize,
        cols: usize,
        message: String,
    },

    /// Invalid mesh topology
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// Operation would produce, or was given, a mesh without faces
    #[error("Empty mesh: {message}")]
    EmptyMesh { message: String },

    /// Operation produced non-finite coordinates
    #[error("Non-finite geometry: {message}")]
    NonFinite { message: String },
}

impl MeshError {
    /// Creates a degenerate polygon error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegeneratePolygon {
            message: message.into(),
        }
    }

    /// Creates an invalid depth field error.
    pub fn invalid_depth(message: impl Into<String>) -> Self {
        Self::InvalidDepthField {
            message: message.into(),
        }
    }

    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates an empty mesh error.
    pub fn empty(message: impl Into<String>) -> Self {
        Self::EmptyMesh {
            message: message.into(),
        }
    }

    /// Creates a non-finite geometry error.
    pub fn non_finite(message: impl Into<String>) -> Self {
        Self::NonFinite {
            message: message.into(),
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(MeshError::NoContourFound.to_string(), "No contour found in mask");

        let err = MeshError::InvalidGrid {
            rows: 1,
            cols: 4,
            message: "need two rows".to_string(),
        };
        assert!(err.to_string().contains("1x4"));
        assert!(err.to_string().contains("need two rows"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}
