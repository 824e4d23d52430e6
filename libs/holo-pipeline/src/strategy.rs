//! # Strategy Selection
//!
//! Chooses between the extruded cutout and the volumetric hull.
//!
//! ```text
//! request      depth   mask     variance         decision
//! Extrusion    any     any      -                Extrusion
//! Auto         none    filled   -                Extrusion
//! Auto         none    empty    -                NoStrategy
//! DepthMesh    none    any      -                DepthUnavailable
//! Auto|Depth   some    any      < threshold      LowVarianceFallback
//! Auto|Depth   some    any      >= threshold     VolumetricHull
//! ```

use crate::error::{PipelineError, PipelineResult};
use config::HologramConfig;
use holo_mesh::depth::bilateral;
use holo_mesh::{DepthField, Diagnostic, Mask, MeshResult};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Strategy requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyRequest {
    #[default]
    Auto,
    Extrusion,
    DepthMesh,
}

/// Geometry strategy, serialized as the transport tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyTag {
    #[serde(rename = "extrusion")]
    Extrusion,
    #[serde(rename = "depth_mesh")]
    VolumetricHull,
}

/// Outcome of strategy selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrategyDecision {
    Extrusion,
    VolumetricHull,
    /// Depth is too flat for relief; the caller should retry with extrusion.
    LowVarianceFallback { variance: f64 },
}

/// Picks a strategy from the request and what the inputs offer.
///
/// `variance` is the variance of the prepared depth field, or `None` when no
/// depth is available. Variance strictly below `threshold` falls back.
///
/// # Example
///
/// ```rust
/// use holo_pipeline::strategy::{select_strategy, StrategyDecision, StrategyRequest};
///
/// let hull = select_strategy(StrategyRequest::Auto, true, Some(0.005), 0.005).unwrap();
/// assert_eq!(hull, StrategyDecision::VolumetricHull);
///
/// let flat = select_strategy(StrategyRequest::Auto, true, Some(0.0049), 0.005).unwrap();
/// assert_eq!(flat, StrategyDecision::LowVarianceFallback { variance: 0.0049 });
/// ```
pub fn select_strategy(
    request: StrategyRequest,
    mask_has_foreground: bool,
    variance: Option<f64>,
    threshold: f64,
) -> PipelineResult<StrategyDecision> {
    let decision = match (request, variance) {
        (StrategyRequest::Extrusion, _) => StrategyDecision::Extrusion,
        (StrategyRequest::Auto, None) if mask_has_foreground => StrategyDecision::Extrusion,
        (StrategyRequest::Auto, None) => return Err(PipelineError::NoStrategy),
        (StrategyRequest::DepthMesh, None) => return Err(PipelineError::DepthUnavailable),
        (_, Some(variance)) if variance < threshold => {
            info!("depth variance {variance:.4} below {threshold}, signalling extrusion fallback");
            StrategyDecision::LowVarianceFallback { variance }
        }
        (_, Some(_)) => StrategyDecision::VolumetricHull,
    };
    debug!("strategy {request:?} -> {decision:?}");
    Ok(decision)
}

/// Depth field ready for hull construction.
#[derive(Debug, Clone)]
pub struct PreparedDepth {
    pub field: DepthField,
    pub variance: f64,
    pub diagnostics: Vec<Diagnostic>,
}

/// Prepares raw depth for the hull and measures its variance.
///
/// Order: resample to the working grid, normalize, apply the depth
/// convention, bilateral filter, mask, variance. A failing filter is skipped
/// with a diagnostic.
pub fn prepare_depth(
    raw: &DepthField,
    mask: &Mask,
    config: &HologramConfig,
) -> MeshResult<PreparedDepth> {
    let mut diagnostics = Vec::new();

    let mut field = raw
        .resampled(config.mesh.grid_cols as usize, config.mesh.grid_rows as usize)?
        .normalized()
        .with_convention(config.depth.convention);

    if config.depth.bilateral.enabled {
        match bilateral(&field, &config.depth.bilateral) {
            Ok(filtered) => field = filtered,
            Err(err) => {
                warn!("adaptive smoothing failed: {err}");
                diagnostics.push(Diagnostic::warning("bilateral", err.to_string()));
            }
        }
    }

    let field = field.masked(mask);
    let variance = field.variance();
    debug!(
        "prepared depth {}x{}, variance {variance:.6}",
        field.width(),
        field.height()
    );

    Ok(PreparedDepth {
        field,
        variance,
        diagnostics,
    })
}
