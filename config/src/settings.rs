//! Deserializable settings tree for a hologram pipeline.
//!
//! Every section derives `Deserialize` with `#[serde(default)]`, so a JSON
//! document only needs to name the values it overrides.

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error returned when configuration cannot be loaded or is invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid JSON for the settings tree.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its accepted range.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Sign convention of the depth estimator's output.
///
/// `Inverted` flips normalized depth (`1 − v`) so that raw low values end up
/// nearest to the viewer. Swap to `Direct` for estimators whose output
/// already grows towards the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthConvention {
    #[default]
    Inverted,
    Direct,
}

/// Volumetric hull construction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Working grid rows.
    pub grid_rows: u32,
    /// Working grid columns.
    pub grid_cols: u32,
    /// Front depth scale relative to the hull width.
    pub depth_scale_factor: f64,
    /// Back-surface depth as a fraction of the front depth.
    pub back_taper_ratio: f64,
    /// UV crop margin on each edge.
    pub uv_crop: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            grid_rows: DEFAULT_GRID_RESOLUTION,
            grid_cols: DEFAULT_GRID_RESOLUTION,
            depth_scale_factor: DEFAULT_DEPTH_SCALE_FACTOR,
            back_taper_ratio: DEFAULT_BACK_TAPER_RATIO,
            uv_crop: UV_CROP_MARGIN,
        }
    }
}

/// Strategy selection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Variance strictly below this value triggers the extrusion fallback.
    pub low_variance_threshold: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            low_variance_threshold: LOW_VARIANCE_THRESHOLD,
        }
    }
}

/// Edge-preserving filter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilateralConfig {
    pub enabled: bool,
    pub diameter: u32,
    pub sigma_color: f64,
    pub sigma_space: f64,
}

impl Default for BilateralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            diameter: BILATERAL_DIAMETER,
            sigma_color: BILATERAL_SIGMA_COLOR,
            sigma_space: BILATERAL_SIGMA_SPACE,
        }
    }
}

/// Depth preparation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthConfig {
    pub convention: DepthConvention,
    pub bilateral: BilateralConfig,
    /// Longest image side handed to a depth estimator.
    pub inference_max_side: u32,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            convention: DepthConvention::default(),
            bilateral: BilateralConfig::default(),
            inference_max_side: DEPTH_INFERENCE_MAX_SIDE,
        }
    }
}

/// Silhouette extrusion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionConfig {
    pub target_height: f64,
    pub thickness: f64,
    /// Simplification epsilon as a fraction of the contour perimeter.
    pub epsilon_ratio: f64,
    pub mask_threshold: u8,
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            target_height: EXTRUSION_TARGET_HEIGHT,
            thickness: EXTRUSION_THICKNESS,
            epsilon_ratio: CONTOUR_EPSILON_RATIO,
            mask_threshold: MASK_THRESHOLD,
        }
    }
}

/// Normal-map bake settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalMapConfig {
    pub enabled: bool,
    pub resolution: u32,
    pub strength: f64,
    /// Green points up the image (glTF, OpenGL). Off by default, where green
    /// follows image rows downward as the depth estimators emit them.
    pub green_up: bool,
}

impl Default for NormalMapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            resolution: DEFAULT_NORMAL_MAP_RESOLUTION,
            strength: NORMAL_MAP_STRENGTH,
            green_up: false,
        }
    }
}

/// De-lighting heuristic settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbedoConfig {
    pub contrast: f64,
    pub brightness: f64,
}

impl Default for AlbedoConfig {
    fn default() -> Self {
        Self {
            contrast: ALBEDO_CONTRAST,
            brightness: ALBEDO_BRIGHTNESS,
        }
    }
}

/// Mesh finishing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishConfig {
    pub smoothing_iterations: u32,
    pub smoothing_lambda: f64,
    /// Rescale smoothed meshes so their enclosed volume is unchanged.
    pub preserve_volume: bool,
    /// Apply smoothing to extruded prisms as well as hulls.
    pub smooth_extrusion: bool,
}

impl Default for FinishConfig {
    fn default() -> Self {
        Self {
            smoothing_iterations: SMOOTHING_ITERATIONS,
            smoothing_lambda: LAPLACIAN_LAMBDA,
            preserve_volume: true,
            smooth_extrusion: false,
        }
    }
}

/// Exported material factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub metallic: f64,
    pub roughness: f64,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            metallic: MATERIAL_METALLIC,
            roughness: MATERIAL_ROUGHNESS,
        }
    }
}

/// Asset storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    /// Base URL under which `output_dir` is served, if any.
    pub public_base_url: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            public_base_url: None,
        }
    }
}

/// Complete settings tree for one pipeline instance.
///
/// # Examples
/// ```
/// use config::HologramConfig;
/// let config = HologramConfig::default();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HologramConfig {
    pub mesh: MeshConfig,
    pub strategy: StrategyConfig,
    pub depth: DepthConfig,
    pub extrusion: ExtrusionConfig,
    pub normal_map: NormalMapConfig,
    pub albedo: AlbedoConfig,
    pub finish: FinishConfig,
    pub material: MaterialConfig,
    pub export: ExportConfig,
}

impl HologramConfig {
    /// Parses and validates a JSON settings document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Checks every value against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mesh.grid_rows < MIN_GRID_RESOLUTION || self.mesh.grid_cols < MIN_GRID_RESOLUTION {
            return Err(ConfigError::invalid(
                "mesh.grid",
                format!(
                    "grid must be at least {MIN_GRID_RESOLUTION}x{MIN_GRID_RESOLUTION}, got {}x{}",
                    self.mesh.grid_rows, self.mesh.grid_cols
                ),
            ));
        }
        positive("mesh.depth_scale_factor", self.mesh.depth_scale_factor)?;
        non_negative("mesh.back_taper_ratio", self.mesh.back_taper_ratio)?;
        if !(0.0..0.5).contains(&self.mesh.uv_crop) {
            return Err(ConfigError::invalid(
                "mesh.uv_crop",
                format!("must be in [0, 0.5): {}", self.mesh.uv_crop),
            ));
        }
        non_negative("strategy.low_variance_threshold", self.strategy.low_variance_threshold)?;
        if self.depth.bilateral.diameter == 0 {
            return Err(ConfigError::invalid("depth.bilateral.diameter", "must be positive"));
        }
        positive("depth.bilateral.sigma_color", self.depth.bilateral.sigma_color)?;
        positive("depth.bilateral.sigma_space", self.depth.bilateral.sigma_space)?;
        if self.depth.inference_max_side == 0 {
            return Err(ConfigError::invalid("depth.inference_max_side", "must be positive"));
        }
        positive("extrusion.target_height", self.extrusion.target_height)?;
        positive("extrusion.thickness", self.extrusion.thickness)?;
        non_negative("extrusion.epsilon_ratio", self.extrusion.epsilon_ratio)?;
        if self.normal_map.resolution < MIN_GRID_RESOLUTION {
            return Err(ConfigError::invalid(
                "normal_map.resolution",
                format!("must be at least {MIN_GRID_RESOLUTION}: {}", self.normal_map.resolution),
            ));
        }
        positive("normal_map.strength", self.normal_map.strength)?;
        positive("albedo.contrast", self.albedo.contrast)?;
        positive("albedo.brightness", self.albedo.brightness)?;
        non_negative("finish.smoothing_lambda", self.finish.smoothing_lambda)?;
        unit_interval("material.metallic", self.material.metallic)?;
        unit_interval("material.roughness", self.material.roughness)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive and finite: {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be non-negative and finite: {value}")))
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be in [0, 1]: {value}")))
    }
}
