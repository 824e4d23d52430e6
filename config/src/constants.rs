//! # Configuration Constants
//!
//! Centralized constants for the hologram pipeline. Geometry construction,
//! texture baking and export parameters are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Working grid, bake and inference resolutions
//! - **Geometry**: Extrusion and hull shape factors
//! - **Strategy**: Depth-variance heuristic
//! - **Texture**: Albedo and normal-map parameters
//! - **Finishing**: Cleanup and smoothing parameters
//! - **Export**: Material factors and file naming

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Triangles with an area at or below this value are treated as degenerate
/// by the mesh finisher.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-12;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default working grid resolution (rows and columns) for the volumetric hull.
///
/// 256×256 gives roughly 65k front vertices, a balance between relief detail
/// and asset size.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_GRID_RESOLUTION;
/// assert_eq!(DEFAULT_GRID_RESOLUTION * DEFAULT_GRID_RESOLUTION, 65_536);
/// ```
pub const DEFAULT_GRID_RESOLUTION: u32 = 256;

/// Default normal-map bake resolution (width and height).
///
/// Independent of the mesh grid so the normal map can recover detail lost by
/// mesh downsampling.
pub const DEFAULT_NORMAL_MAP_RESOLUTION: u32 = 512;

/// Longest side, in pixels, of the image handed to a depth estimator.
pub const DEPTH_INFERENCE_MAX_SIDE: u32 = 512;

/// Smallest grid dimension that still forms at least one quad.
pub const MIN_GRID_RESOLUTION: u32 = 2;

// =============================================================================
// GEOMETRY CONSTANTS
// =============================================================================

/// Front-surface depth scale relative to the hull width.
///
/// Front Z = `depth × aspect × DEFAULT_DEPTH_SCALE_FACTOR`.
pub const DEFAULT_DEPTH_SCALE_FACTOR: f64 = 0.6;

/// Ratio of back-surface depth to front-surface depth.
///
/// Gives the hull perceptible thickness without doubling the relief.
pub const DEFAULT_BACK_TAPER_RATIO: f64 = 0.3;

/// UV crop margin applied on every edge of the hull's UV range.
///
/// # Example
///
/// ```rust
/// use config::constants::UV_CROP_MARGIN;
/// assert_eq!(1.0 - UV_CROP_MARGIN, 0.99);
/// ```
pub const UV_CROP_MARGIN: f64 = 0.01;

/// Height of an extruded cutout in world units.
pub const EXTRUSION_TARGET_HEIGHT: f64 = 1.5;

/// Thickness of an extruded cutout along the depth axis.
pub const EXTRUSION_THICKNESS: f64 = 0.1;

/// Contour simplification epsilon as a fraction of the contour perimeter.
pub const CONTOUR_EPSILON_RATIO: f64 = 0.002;

/// Mask binarization threshold. Values strictly above it are foreground.
pub const MASK_THRESHOLD: u8 = 127;

// =============================================================================
// STRATEGY CONSTANTS
// =============================================================================

/// Depth variance below which an image is considered too flat for a hull.
///
/// Calibrated heuristic: text, flat UI captures and failed estimations fall
/// below it. Not derived from the data; override through
/// `HologramConfig::strategy`.
///
/// # Example
///
/// ```rust
/// use config::constants::LOW_VARIANCE_THRESHOLD;
///
/// let flat = 0.0049;
/// assert!(flat < LOW_VARIANCE_THRESHOLD);
/// assert!(!(LOW_VARIANCE_THRESHOLD < LOW_VARIANCE_THRESHOLD));
/// ```
pub const LOW_VARIANCE_THRESHOLD: f64 = 0.005;

// =============================================================================
// DEPTH FILTER CONSTANTS
// =============================================================================

/// Bilateral filter window diameter in pixels.
pub const BILATERAL_DIAMETER: u32 = 5;

/// Bilateral filter range sigma, in normalized depth units.
pub const BILATERAL_SIGMA_COLOR: f64 = 0.1;

/// Bilateral filter spatial sigma, in pixels.
pub const BILATERAL_SIGMA_SPACE: f64 = 5.0;

// =============================================================================
// TEXTURE CONSTANTS
// =============================================================================

/// Default normal-map strength `k` applied to depth gradients.
///
/// Useful range is roughly 5–12; higher values sharpen edges.
pub const NORMAL_MAP_STRENGTH: f64 = 5.0;

/// Scale converting normalized depth into 8-bit depth units before baking.
pub const NORMAL_MAP_DEPTH_UNITS: f64 = 255.0;

/// Contrast factor of the de-lighting heuristic.
pub const ALBEDO_CONTRAST: f64 = 1.15;

/// Brightness factor of the de-lighting heuristic.
pub const ALBEDO_BRIGHTNESS: f64 = 1.05;

// =============================================================================
// FINISHING CONSTANTS
// =============================================================================

/// Number of Laplacian smoothing iterations applied to hull meshes.
pub const SMOOTHING_ITERATIONS: u32 = 1;

/// Laplacian smoothing step factor.
pub const LAPLACIAN_LAMBDA: f64 = 0.5;

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Metallic factor of exported materials.
pub const MATERIAL_METALLIC: f64 = 0.0;

/// Roughness factor of exported materials.
pub const MATERIAL_ROUGHNESS: f64 = 0.6;

/// Name given to the exported material.
pub const MATERIAL_NAME: &str = "HoloMaterial";

/// Default directory receiving exported assets.
pub const DEFAULT_OUTPUT_DIR: &str = "public";

/// File name prefix for extrusion assets.
pub const EXTRUSION_FILE_PREFIX: &str = "holo";

/// File name prefix for volumetric hull assets.
pub const DEPTH_MESH_FILE_PREFIX: &str = "holo_depth";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
