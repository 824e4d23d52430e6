//! # Response Model

use crate::error::PipelineError;
use crate::strategy::StrategyTag;
use holo_asset::StoredAsset;
use holo_mesh::Diagnostic;
use serde::Serialize;

/// Message sent with a low-variance fallback.
pub const LOW_VARIANCE_MESSAGE: &str = "Low depth variance, switch to extrusion";

/// Result of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub enum HologramOutcome {
    /// An asset was built and stored.
    Exported {
        asset: StoredAsset,
        strategy: StrategyTag,
        diagnostics: Vec<Diagnostic>,
    },
    /// The depth was too flat; the caller should retry with extrusion.
    LowVarianceFallback { variance: f64 },
}

impl HologramOutcome {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Exported { diagnostics, .. } => diagnostics,
            Self::LowVarianceFallback { .. } => &[],
        }
    }

    /// Puts `earlier` in front of this outcome's diagnostics.
    pub(crate) fn with_leading_diagnostics(mut self, earlier: Vec<Diagnostic>) -> Self {
        if let Self::Exported { diagnostics, .. } = &mut self {
            let later = std::mem::replace(diagnostics, earlier);
            diagnostics.extend(later);
        }
        self
    }
}

/// Transport-facing JSON view of an outcome or error.
///
/// ```rust
/// use holo_pipeline::{HologramOutcome, HologramResponse};
///
/// let outcome = HologramOutcome::LowVarianceFallback { variance: 0.0 };
/// let json = serde_json::to_value(HologramResponse::from(&outcome)).unwrap();
/// assert_eq!(json["hologram_type"], "extrusion");
/// assert_eq!(json["variance"], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HologramResponse {
    Exported {
        #[serde(rename = "modelUrl")]
        model_url: String,
        #[serde(rename = "type")]
        strategy: StrategyTag,
    },
    Fallback {
        hologram_type: StrategyTag,
        variance: f64,
        message: String,
    },
    Error {
        error: String,
    },
}

impl From<&HologramOutcome> for HologramResponse {
    fn from(outcome: &HologramOutcome) -> Self {
        match outcome {
            HologramOutcome::Exported {
                asset, strategy, ..
            } => Self::Exported {
                model_url: asset.url.clone(),
                strategy: *strategy,
            },
            HologramOutcome::LowVarianceFallback { variance } => Self::Fallback {
                hologram_type: StrategyTag::Extrusion,
                variance: *variance,
                message: LOW_VARIANCE_MESSAGE.to_string(),
            },
        }
    }
}

impl From<&PipelineError> for HologramResponse {
    fn from(err: &PipelineError) -> Self {
        Self::Error {
            error: err.to_string(),
        }
    }
}
