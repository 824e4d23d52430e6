//! # Volumetric Hull
//!
//! Double-sided relief mesh over a regular depth grid.
//!
//! ## Layout
//!
//! ```text
//!  front (z = d·s)         back (z = −d·s·taper)
//!  0 ── 1 ── 2             n+0 ── n+1 ── n+2
//!  │ ╲  │ ╲  │              │  ╱  │  ╱  │
//!  3 ── 4 ── 5             n+3 ── n+4 ── n+5
//! ```
//!
//! Front faces wind toward +Z, back faces toward −Z. Every boundary edge of
//! the grid is bridged to its back twin by two triangles, so each edge is
//! shared by exactly two faces and the hull is closed.

#[cfg(test)]
mod tests;

use crate::depth::DepthField;
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use config::constants::{DEFAULT_BACK_TAPER_RATIO, DEFAULT_DEPTH_SCALE_FACTOR, UV_CROP_MARGIN};
use config::MeshConfig;
use glam::{DVec2, DVec3};
use log::debug;

/// Parameters for hull construction.
#[derive(Debug, Clone, PartialEq)]
pub struct HullParams {
    /// Front Z = depth × aspect × factor
    pub depth_scale_factor: f64,
    /// Back depth as a fraction of the front depth
    pub back_taper_ratio: f64,
    /// UV margin trimmed from each edge
    pub uv_crop: f64,
}

impl Default for HullParams {
    fn default() -> Self {
        Self {
            depth_scale_factor: DEFAULT_DEPTH_SCALE_FACTOR,
            back_taper_ratio: DEFAULT_BACK_TAPER_RATIO,
            uv_crop: UV_CROP_MARGIN,
        }
    }
}

impl From<&MeshConfig> for HullParams {
    fn from(config: &MeshConfig) -> Self {
        Self {
            depth_scale_factor: config.depth_scale_factor,
            back_taper_ratio: config.back_taper_ratio,
            uv_crop: config.uv_crop,
        }
    }
}

/// Builds a watertight hull from a prepared depth grid.
///
/// `depth` is the normalized, masked field already resampled to the working
/// grid: its height gives the row count and its width the column count.
/// `aspect` is the source image's width / height.
///
/// The result has `2 × rows × cols` vertices and
/// `4(rows−1)(cols−1) + 4(rows−1) + 4(cols−1)` triangles.
pub fn build_hull(depth: &DepthField, aspect: f64, params: &HullParams) -> MeshResult<Mesh> {
    let rows = depth.height();
    let cols = depth.width();
    if rows < 2 || cols < 2 {
        return Err(MeshError::InvalidGrid {
            rows,
            cols,
            message: "hull needs at least 2x2 samples".to_string(),
        });
    }
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(MeshError::non_finite(format!(
            "aspect ratio must be positive and finite, got {aspect}"
        )));
    }
    if !(0.0..0.5).contains(&params.uv_crop) {
        return Err(MeshError::InvalidGrid {
            rows,
            cols,
            message: format!("uv crop {} outside [0, 0.5)", params.uv_crop),
        });
    }

    let n = rows * cols;
    let front_scale = aspect * params.depth_scale_factor;
    let back_scale = front_scale * params.back_taper_ratio;
    let uv_lo = params.uv_crop;
    let uv_hi = 1.0 - params.uv_crop;

    let mut vertices = Vec::with_capacity(2 * n);
    let mut uvs = Vec::with_capacity(2 * n);

    // ==========================================================================
    // Vertices
    // ==========================================================================

    for r in 0..rows {
        let v = r as f64 / (rows - 1) as f64;
        for c in 0..cols {
            let u = c as f64 / (cols - 1) as f64;
            let d = f64::from(depth.get(c, r));
            vertices.push(DVec3::new((u - 0.5) * aspect, 0.5 - v, d * front_scale));
            uvs.push(DVec2::new(lerp(uv_lo, uv_hi, u), lerp(uv_lo, uv_hi, v)));
        }
    }
    for i in 0..n {
        let front = vertices[i];
        let d = f64::from(depth.data()[i]);
        vertices.push(DVec3::new(front.x, front.y, -d * back_scale));
        uvs.push(uvs[i]);
    }

    // ==========================================================================
    // Faces
    // ==========================================================================

    let idx = |r: usize, c: usize| (r * cols + c) as u32;
    let back = n as u32;
    let quads = (rows - 1) * (cols - 1);
    let mut triangles = Vec::with_capacity(4 * quads + 4 * (rows - 1) + 4 * (cols - 1));

    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let a = idx(r, c);
            let b = idx(r + 1, c);
            let cc = idx(r + 1, c + 1);
            let d = idx(r, c + 1);
            triangles.push([a, b, cc]);
            triangles.push([a, cc, d]);
        }
    }
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let a = back + idx(r, c);
            let b = back + idx(r + 1, c);
            let cc = back + idx(r + 1, c + 1);
            let d = back + idx(r, c + 1);
            triangles.push([a, cc, b]);
            triangles.push([a, d, cc]);
        }
    }

    // Boundary edges in the direction the front faces traverse them.
    for (from, to) in boundary_ring(rows, cols) {
        let (a, b) = (idx(from.0, from.1), idx(to.0, to.1));
        triangles.push([b, a, back + a]);
        triangles.push([b, back + a, back + b]);
    }

    debug!(
        "hull: {rows}x{cols} grid, {} vertices, {} triangles",
        vertices.len(),
        triangles.len()
    );
    Mesh::from_parts(vertices, uvs, triangles)
}

/// Directed boundary edges `(row, col) → (row, col)` of the front grid, each
/// oriented as the single front face using it traverses it.
fn boundary_ring(rows: usize, cols: usize) -> Vec<((usize, usize), (usize, usize))> {
    let last_r = rows - 1;
    let last_c = cols - 1;
    let mut edges = Vec::with_capacity(2 * (last_r + last_c));
    for c in 0..last_c {
        edges.push(((0, c + 1), (0, c)));
        edges.push(((last_r, c), (last_r, c + 1)));
    }
    for r in 0..last_r {
        edges.push(((r, 0), (r + 1, 0)));
        edges.push(((r + 1, last_c), (r, last_c)));
    }
    edges
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
