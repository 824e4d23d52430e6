//! # Holo Pipeline
//!
//! Request orchestration for single-image holograms: decode the inputs,
//! pick a geometry strategy, build and finish the mesh, texture it, and
//! store it as a GLB file.
//!
//! ## Architecture
//!
//! ```text
//! HologramService
//!   ├── Segmenter        (injected)
//!   ├── DepthEstimator   (injected, optional)
//!   └── Pipeline
//!         ├── strategy   (prepare_depth, select_strategy)
//!         ├── holo_mesh  (build_extrusion | build_hull, Finisher)
//!         └── holo_asset (textures, GLB, AssetStore)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use config::HologramConfig;
//! use holo_mesh::{DepthField, Mask};
//! use holo_pipeline::{Pipeline, PipelineInput, StrategyRequest, Synthesis};
//! use image::RgbImage;
//!
//! let pipeline = Pipeline::new(HologramConfig::default()).unwrap();
//! let input = PipelineInput::new(
//!     RgbImage::new(64, 64),
//!     Mask::full(64, 64),
//!     Some(DepthField::constant(64, 64, 1.0).unwrap()),
//! );
//!
//! match pipeline.synthesize(&input, StrategyRequest::Auto).unwrap() {
//!     Synthesis::LowVarianceFallback { variance } => assert_eq!(variance, 0.0),
//!     Synthesis::Asset { .. } => unreachable!("a flat depth field cannot make a hull"),
//! }
//! ```

pub mod collaborators;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod response;
pub mod service;
pub mod strategy;

pub use collaborators::{
    CollaboratorError, DepthEstimator, PrecomputedDepth, PrecomputedSegmenter, Segmenter,
};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, PipelineInput, Synthesis};
pub use response::{HologramOutcome, HologramResponse};
pub use service::HologramService;
pub use strategy::{StrategyDecision, StrategyRequest, StrategyTag};
