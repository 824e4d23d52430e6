//! # Pipeline Errors

use crate::collaborators::CollaboratorError;
use config::ConfigError;
use holo_asset::AssetError;
use holo_mesh::MeshError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a hologram request.
///
/// Degraded steps never surface here; they are reported as diagnostics on a
/// successful outcome instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Neither a usable mask nor a depth field was supplied
    #[error("No strategy applies: mask is empty and no depth is available")]
    NoStrategy,

    /// The depth-based path was requested without a depth field
    #[error("Depth model unavailable")]
    DepthUnavailable,

    /// Input bytes or buffers are unusable
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn decode(what: &'static str, source: image::ImageError) -> Self {
        Self::Decode { what, source }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
