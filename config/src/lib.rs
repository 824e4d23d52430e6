//! # Config Crate
//!
//! Centralized configuration for the hologram pipeline. Every tunable value
//! used by the mesh builders, texture bakers and exporter is named once in
//! [`constants`] and grouped into the deserializable [`HologramConfig`] tree
//! in [`settings`].
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{LOW_VARIANCE_THRESHOLD, DEFAULT_GRID_RESOLUTION};
//! use config::HologramConfig;
//!
//! let config = HologramConfig::default();
//! assert_eq!(config.strategy.low_variance_threshold, LOW_VARIANCE_THRESHOLD);
//! assert_eq!(config.mesh.grid_rows, DEFAULT_GRID_RESOLUTION);
//!
//! // Any subset of fields can be overridden from JSON.
//! let json = r#"{ "mesh": { "depth_scale_factor": 0.3 } }"#;
//! let tuned = HologramConfig::from_json_str(json).unwrap();
//! assert_eq!(tuned.mesh.depth_scale_factor, 0.3);
//! assert_eq!(tuned.mesh.grid_cols, DEFAULT_GRID_RESOLUTION);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Partial Overrides**: Every settings section falls back to its defaults
//! - **Validated**: Settings are checked before a pipeline is built from them

pub mod constants;
pub mod settings;

pub use settings::{
    AlbedoConfig, BilateralConfig, ConfigError, DepthConfig, DepthConvention, ExportConfig,
    ExtrusionConfig, FinishConfig, HologramConfig, MaterialConfig, MeshConfig, NormalMapConfig,
    StrategyConfig,
};

#[cfg(test)]
mod tests;
