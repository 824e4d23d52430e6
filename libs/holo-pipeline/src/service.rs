//! # Hologram Service
//!
//! Long-lived entry point holding the pipeline and the collaborator handles.
//! Model handles are constructed once by the caller and injected here.

use crate::collaborators::{DepthEstimator, Segmenter};
use crate::error::PipelineResult;
use crate::input::{decode_image, prepare_inference_image};
use crate::pipeline::{Pipeline, PipelineInput};
use crate::response::HologramOutcome;
use crate::strategy::StrategyRequest;
use holo_mesh::{DepthField, Diagnostic};
use image::RgbImage;
use log::{info, warn};

/// Turns uploaded image bytes into a stored hologram.
pub struct HologramService {
    pipeline: Pipeline,
    segmenter: Box<dyn Segmenter>,
    depth: Option<Box<dyn DepthEstimator>>,
}

impl HologramService {
    /// A service without a depth estimator; requests route to extrusion.
    pub fn new(pipeline: Pipeline, segmenter: impl Segmenter + 'static) -> Self {
        Self {
            pipeline,
            segmenter: Box::new(segmenter),
            depth: None,
        }
    }

    pub fn with_depth_estimator(mut self, estimator: impl DepthEstimator + 'static) -> Self {
        self.depth = Some(Box::new(estimator));
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn has_depth_estimator(&self) -> bool {
        self.depth.is_some()
    }

    /// Decodes, segments, estimates depth when possible, and runs the
    /// pipeline.
    ///
    /// A failing depth estimator is logged and treated as "no depth".
    pub fn generate(
        &self,
        image_bytes: &[u8],
        request: StrategyRequest,
    ) -> PipelineResult<HologramOutcome> {
        let image = decode_image(image_bytes)?;
        let mask = self.segmenter.segment(&image)?;

        let mut diagnostics = Vec::new();
        let depth = if request == StrategyRequest::Extrusion {
            None
        } else {
            self.estimate_depth(&image, &mut diagnostics)
        };

        let input = PipelineInput::new(image, mask, depth);
        let outcome = self.pipeline.run(&input, request)?;
        Ok(outcome.with_leading_diagnostics(diagnostics))
    }

    fn estimate_depth(
        &self,
        image: &RgbImage,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<DepthField> {
        let estimator = self.depth.as_ref()?;
        let max_side = self.pipeline.config().depth.inference_max_side;
        let inference = prepare_inference_image(image, max_side);

        match estimator.estimate(&inference) {
            Ok(depth) => {
                info!("depth estimated at {}x{}", depth.width(), depth.height());
                Some(depth)
            }
            Err(err) => {
                warn!("depth estimation failed: {err}");
                diagnostics.push(Diagnostic::warning("depth", err.to_string()));
                None
            }
        }
    }
}

impl std::fmt::Debug for HologramService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HologramService")
            .field("pipeline", &self.pipeline)
            .field("depth", &self.has_depth_estimator())
            .finish()
    }
}
