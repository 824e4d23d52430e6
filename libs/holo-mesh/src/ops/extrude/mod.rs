//! # Silhouette Extrusion
//!
//! Builds a flat cutout slab from the mask's outer contour:
//!
//! 1. Trace the largest external contour
//! 2. Simplify it with a perimeter-proportional epsilon
//! 3. Map pixels to centered metric space (height 1.5, width 1.5 × aspect)
//! 4. Extrude along +Z into a closed prism
//! 5. Project UVs back onto the image plane
//!
//! When the outline cannot be extruded the builder falls back to a box
//! covering the whole image frame, so a non-empty mask always yields a mesh.

mod triangulate;

#[cfg(test)]
mod tests;

pub use triangulate::ear_clip;

use crate::contour::{largest_external, signed_area};
use crate::error::{MeshError, MeshResult};
use crate::mask::Mask;
use crate::mesh::Mesh;
use config::constants::{CONTOUR_EPSILON_RATIO, EXTRUSION_TARGET_HEIGHT, EXTRUSION_THICKNESS};
use config::ExtrusionConfig;
use glam::{DVec2, DVec3};
use log::{debug, warn};

/// A simple 2D polygon in metric space.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2D {
    /// Boundary vertices in ring order
    pub outer: Vec<DVec2>,
}

impl Polygon2D {
    /// Creates a polygon from ring-ordered vertices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use holo_mesh::Polygon2D;
    /// use glam::DVec2;
    ///
    /// let tri = Polygon2D::new(vec![DVec2::ZERO, DVec2::X, DVec2::Y]);
    /// assert!(tri.is_ccw());
    /// ```
    pub fn new(outer: Vec<DVec2>) -> Self {
        Self { outer }
    }

    /// Axis-aligned rectangle between two corners, counter-clockwise.
    pub fn rectangle(min: DVec2, max: DVec2) -> Self {
        Self::new(vec![
            DVec2::new(min.x, min.y),
            DVec2::new(max.x, min.y),
            DVec2::new(max.x, max.y),
            DVec2::new(min.x, max.y),
        ])
    }

    pub fn vertex_count(&self) -> usize {
        self.outer.len()
    }

    /// Signed area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.outer)
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Reverses clockwise rings so the result is counter-clockwise.
    pub fn into_ccw(mut self) -> Self {
        if self.signed_area() < 0.0 {
            self.outer.reverse();
        }
        self
    }

    /// Removes repeated points and points lying on the line through their
    /// neighbours. Repeats until stable.
    pub fn cleaned(&self) -> Self {
        let mut points = self.outer.clone();
        loop {
            let n = points.len();
            if n < 3 {
                break;
            }
            let kept: Vec<DVec2> = (0..n)
                .filter(|&i| {
                    let prev = points[(i + n - 1) % n];
                    let curr = points[i];
                    let next = points[(i + 1) % n];
                    curr != prev && (curr - prev).perp_dot(next - prev) != 0.0
                })
                .map(|i| points[i])
                .collect();
            if kept.len() == n {
                break;
            }
            points = kept;
        }
        Self::new(points)
    }

    /// Axis-aligned bounds as (min, max). Empty polygons give zeros.
    pub fn bounds(&self) -> (DVec2, DVec2) {
        let Some(&first) = self.outer.first() else {
            return (DVec2::ZERO, DVec2::ZERO);
        };
        self.outer
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)))
    }
}

/// Parameters for silhouette extrusion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionParams {
    /// Height of the frame in world units; width follows the aspect ratio
    pub target_height: f64,
    /// Prism thickness along Z
    pub thickness: f64,
    /// Simplification epsilon as a fraction of the contour perimeter
    pub epsilon_ratio: f64,
}

impl Default for ExtrusionParams {
    fn default() -> Self {
        Self {
            target_height: EXTRUSION_TARGET_HEIGHT,
            thickness: EXTRUSION_THICKNESS,
            epsilon_ratio: CONTOUR_EPSILON_RATIO,
        }
    }
}

impl From<&ExtrusionConfig> for ExtrusionParams {
    fn from(config: &ExtrusionConfig) -> Self {
        Self {
            target_height: config.target_height,
            thickness: config.thickness,
            epsilon_ratio: config.epsilon_ratio,
        }
    }
}

/// Result of [`build_extrusion`].
#[derive(Debug, Clone)]
pub struct ExtrusionOutput {
    pub mesh: Mesh,
    /// The simplified outline in metric space, counter-clockwise
    pub polygon: Polygon2D,
    /// True when the prism could not be built and a box was used instead
    pub used_fallback: bool,
}

/// Maps between image pixels and the centered metric frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    pixel_w: f64,
    pixel_h: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new(image_width: u32, image_height: u32, target_height: f64) -> Self {
        let pixel_w = f64::from(image_width);
        let pixel_h = f64::from(image_height);
        Self {
            pixel_w,
            pixel_h,
            width: target_height * pixel_w / pixel_h,
            height: target_height,
        }
    }

    fn to_metric(self, pixel: DVec2) -> DVec2 {
        DVec2::new(
            (pixel.x / self.pixel_w - 0.5) * self.width,
            (0.5 - pixel.y / self.pixel_h) * self.height,
        )
    }

    /// Inverse of [`Frame::to_metric`] in normalized image coordinates,
    /// top-left origin.
    fn uv(self, point: DVec2) -> DVec2 {
        DVec2::new(point.x / self.width + 0.5, 0.5 - point.y / self.height)
    }
}

/// Builds the cutout prism for a silhouette.
///
/// The mask is resampled to the image size first so contour pixels share the
/// image's coordinate frame.
///
/// # Errors
///
/// [`MeshError::NoContourFound`] when the mask has no foreground. Degenerate
/// outlines do not fail; they produce the fallback box.
pub fn build_extrusion(
    mask: &Mask,
    image_width: u32,
    image_height: u32,
    params: &ExtrusionParams,
) -> MeshResult<ExtrusionOutput> {
    if image_width == 0 || image_height == 0 {
        return Err(MeshError::degenerate(format!(
            "image has zero size {image_width}x{image_height}"
        )));
    }
    if !(params.thickness > 0.0 && params.target_height > 0.0) {
        return Err(MeshError::degenerate(
            "extrusion thickness and target height must be positive",
        ));
    }

    let mask = mask.resized(image_width, image_height);
    let contour = largest_external(&mask).ok_or(MeshError::NoContourFound)?;
    let frame = Frame::new(image_width, image_height, params.target_height);

    let simplified = contour.simplified(params.epsilon_ratio);
    debug!(
        "contour: {} points, simplified to {}",
        contour.len(),
        simplified.len()
    );

    let polygon = Polygon2D::new(
        simplified
            .points()
            .iter()
            .map(|&p| frame.to_metric(p))
            .collect(),
    )
    .into_ccw()
    .cleaned();

    match extrude_prism(&polygon, params.thickness, |p| frame.uv(p)) {
        Ok(mesh) => Ok(ExtrusionOutput {
            mesh,
            polygon,
            used_fallback: false,
        }),
        Err(err) => {
            warn!("extrusion failed ({err}); using frame box");
            let half = DVec2::new(frame.width, frame.height) / 2.0;
            let rect = Polygon2D::rectangle(-half, half);
            let mut mesh = extrude_prism(&rect, params.thickness, |p| frame.uv(p))?;
            mesh.translate(DVec3::new(0.0, 0.0, -params.thickness / 2.0));
            Ok(ExtrusionOutput {
                mesh,
                polygon: rect,
                used_fallback: true,
            })
        }
    }
}

/// Extrudes a counter-clockwise polygon from z = 0 to z = `thickness`.
///
/// Base and top rings share vertices with the side walls, so the prism is
/// closed: 2n vertices, 2n side triangles and n − 2 triangles per cap.
pub fn extrude_prism(
    polygon: &Polygon2D,
    thickness: f64,
    uv: impl Fn(DVec2) -> DVec2,
) -> MeshResult<Mesh> {
    let n = polygon.vertex_count();
    if n < 3 {
        return Err(MeshError::degenerate(format!(
            "polygon must have at least 3 vertices, got {n}"
        )));
    }
    if !polygon.is_ccw() {
        return Err(MeshError::degenerate("polygon is not counter-clockwise"));
    }
    let cap = ear_clip(&polygon.outer)?;

    let mut mesh = Mesh::with_capacity(2 * n, 2 * n + 2 * cap.len());
    for z in [0.0, thickness] {
        for &p in &polygon.outer {
            mesh.add_vertex(DVec3::new(p.x, p.y, z), uv(p));
        }
    }

    let top = n as u32;
    for i in 0..n as u32 {
        let next = (i + 1) % n as u32;
        mesh.add_triangle(i, next, top + next);
        mesh.add_triangle(i, top + next, top + i);
    }

    for [a, b, c] in cap {
        let (a, b, c) = (a as u32, b as u32, c as u32);
        mesh.add_triangle(a, c, b);
        mesh.add_triangle(top + a, top + b, top + c);
    }

    Ok(mesh)
}
