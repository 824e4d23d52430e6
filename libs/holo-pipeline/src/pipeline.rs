//! # Request Pipeline
//!
//! ```text
//! PipelineInput ─► prepare_depth ─► select_strategy ─┬─► build_extrusion ─────────────┐
//!                                                    └─► build_hull ║ bake_normal_map ─┤
//!                                  adjust_albedo ─► Material ─► Finisher ─► HologramAsset
//!                                                         ─► AssetEncoder ─► AssetStore
//! ```
//!
//! Every request builds fresh values; a [`Pipeline`] holds only read-only
//! configuration and can serve concurrent requests.

use crate::error::{PipelineError, PipelineResult};
use crate::response::HologramOutcome;
use crate::strategy::{
    prepare_depth, select_strategy, PreparedDepth, StrategyDecision, StrategyRequest, StrategyTag,
};
use config::constants::{DEPTH_MESH_FILE_PREFIX, EXTRUSION_FILE_PREFIX};
use config::HologramConfig;
use holo_asset::{
    adjust_albedo, bake_normal_map, content_hash, AssetEncoder, AssetResult, AssetStore,
    GlbEncoder, HologramAsset, Material,
};
use holo_mesh::{
    build_extrusion, build_hull, DepthField, Diagnostic, ExtrusionParams, Finisher, HullParams,
    Mask, Mesh,
};
use image::RgbImage;
use log::{info, warn};

/// Decoded inputs of one request.
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub image: RgbImage,
    pub mask: Mask,
    /// Raw estimator output, if any.
    pub depth: Option<DepthField>,
}

impl PipelineInput {
    pub fn new(image: RgbImage, mask: Mask, depth: Option<DepthField>) -> Self {
        Self { image, mask, depth }
    }
}

/// In-memory result of a request, before encoding.
#[derive(Debug, Clone)]
pub enum Synthesis {
    Asset {
        asset: HologramAsset,
        strategy: StrategyTag,
        diagnostics: Vec<Diagnostic>,
    },
    LowVarianceFallback {
        variance: f64,
    },
}

/// Per-request mesh synthesis and export.
pub struct Pipeline {
    config: HologramConfig,
    store: AssetStore,
    encoder: Box<dyn AssetEncoder>,
}

impl Pipeline {
    /// Validates `config` and builds a pipeline that writes GLB files to
    /// the configured output directory.
    pub fn new(config: HologramConfig) -> PipelineResult<Self> {
        config.validate()?;
        let store = AssetStore::from_config(&config.export);
        Ok(Self {
            config,
            store,
            encoder: Box::new(GlbEncoder),
        })
    }

    pub fn with_store(mut self, store: AssetStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_encoder(mut self, encoder: impl AssetEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn config(&self) -> &HologramConfig {
        &self.config
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Builds the asset, or the low-variance decision, without writing
    /// anything.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::NoStrategy`] / [`PipelineError::DepthUnavailable`]
    ///   from strategy selection
    /// - [`holo_mesh::MeshError::NoContourFound`] when extruding an empty mask
    pub fn synthesize(
        &self,
        input: &PipelineInput,
        request: StrategyRequest,
    ) -> PipelineResult<Synthesis> {
        let (width, height) = input.image.dimensions();
        if width == 0 || height == 0 {
            return Err(PipelineError::invalid_input("image has no pixels"));
        }

        let prepared = match &input.depth {
            Some(raw) if request != StrategyRequest::Extrusion => {
                Some(prepare_depth(raw, &input.mask, &self.config)?)
            }
            _ => None,
        };

        let decision = select_strategy(
            request,
            input.mask.has_foreground(),
            prepared.as_ref().map(|p| p.variance),
            self.config.strategy.low_variance_threshold,
        )?;
        info!("{width}x{height} request {request:?}: {decision:?}");

        match decision {
            StrategyDecision::LowVarianceFallback { variance } => {
                Ok(Synthesis::LowVarianceFallback { variance })
            }
            StrategyDecision::Extrusion => self.extrusion(input),
            StrategyDecision::VolumetricHull => match (&input.depth, prepared) {
                (Some(raw), Some(prepared)) => self.hull(input, raw, prepared),
                _ => Err(PipelineError::DepthUnavailable),
            },
        }
    }

    /// Runs [`Pipeline::synthesize`], then encodes and stores the asset under
    /// its content-derived name.
    pub fn run(
        &self,
        input: &PipelineInput,
        request: StrategyRequest,
    ) -> PipelineResult<HologramOutcome> {
        let (asset, strategy, diagnostics) = match self.synthesize(input, request)? {
            Synthesis::LowVarianceFallback { variance } => {
                return Ok(HologramOutcome::LowVarianceFallback { variance })
            }
            Synthesis::Asset {
                asset,
                strategy,
                diagnostics,
            } => (asset, strategy, diagnostics),
        };

        let bytes = self.encoder.encode(&asset)?;
        let hash = content_hash(&input.image, &input.mask, input.depth.as_ref());
        let prefix = match strategy {
            StrategyTag::Extrusion => EXTRUSION_FILE_PREFIX,
            StrategyTag::VolumetricHull => DEPTH_MESH_FILE_PREFIX,
        };
        let stored = self
            .store
            .write(prefix, hash, self.encoder.extension(), &bytes)?;

        Ok(HologramOutcome::Exported {
            asset: stored,
            strategy,
            diagnostics,
        })
    }

    fn extrusion(&self, input: &PipelineInput) -> PipelineResult<Synthesis> {
        let mut diagnostics = Vec::new();
        let (width, height) = input.image.dimensions();

        let output = build_extrusion(
            &input.mask,
            width,
            height,
            &ExtrusionParams::from(&self.config.extrusion),
        )?;
        if output.used_fallback {
            diagnostics.push(Diagnostic::warning(
                "extrusion",
                "degenerate silhouette, exported its bounding box",
            ));
        }

        let base_color = self.albedo(&input.image, &mut diagnostics);
        let material = Material::new(base_color, &self.config.material);
        let smooth = self.config.finish.smooth_extrusion;
        self.finish(output.mesh, smooth, material, StrategyTag::Extrusion, diagnostics)
    }

    fn hull(
        &self,
        input: &PipelineInput,
        raw: &DepthField,
        prepared: PreparedDepth,
    ) -> PipelineResult<Synthesis> {
        let mut diagnostics = prepared.diagnostics;
        let (width, height) = input.image.dimensions();
        let aspect = f64::from(width) / f64::from(height);
        let params = HullParams::from(&self.config.mesh);
        let field = &prepared.field;

        let normal_config = &self.config.normal_map;
        let convention = self.config.depth.convention;
        let (mesh, normal_map) = rayon::join(
            || build_hull(field, aspect, &params),
            || -> AssetResult<Option<RgbImage>> {
                if !normal_config.enabled {
                    return Ok(None);
                }
                bake_normal_map(raw, normal_config, convention).map(Some)
            },
        );
        let mesh = mesh?;

        let normal_map = match normal_map {
            Ok(map) => map,
            Err(err) => {
                warn!("normal map bake failed: {err}");
                diagnostics.push(Diagnostic::warning("normal_map", err.to_string()));
                None
            }
        };

        let base_color = self.albedo(&input.image, &mut diagnostics);
        let material = Material::new(base_color, &self.config.material)
            .with_normal_map(normal_map)
            .double_sided(true);
        self.finish(mesh, true, material, StrategyTag::VolumetricHull, diagnostics)
    }

    /// De-lit base colour, or the untouched photograph when adjustment fails.
    fn albedo(&self, image: &RgbImage, diagnostics: &mut Vec<Diagnostic>) -> RgbImage {
        match adjust_albedo(image, &self.config.albedo) {
            Ok(adjusted) => adjusted,
            Err(err) => {
                warn!("albedo adjustment failed: {err}");
                diagnostics.push(Diagnostic::warning("albedo", err.to_string()));
                image.clone()
            }
        }
    }

    fn finish(
        &self,
        mesh: Mesh,
        smooth: bool,
        material: Material,
        strategy: StrategyTag,
        mut diagnostics: Vec<Diagnostic>,
    ) -> PipelineResult<Synthesis> {
        let finished = Finisher::standard(&self.config.finish, smooth).run(mesh);
        diagnostics.extend(finished.diagnostics);

        let asset = HologramAsset::new(finished.mesh, material)?;
        info!(
            "{strategy:?}: {} vertices, {} triangles, {} diagnostic(s)",
            asset.mesh().vertex_count(),
            asset.mesh().triangle_count(),
            diagnostics.len()
        );
        Ok(Synthesis::Asset {
            asset,
            strategy,
            diagnostics,
        })
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("encoder", &self.encoder.extension())
            .finish()
    }
}
