//! # Finishing Tests

use super::*;
use crate::depth::DepthField;
use crate::error::MeshError;
use crate::ops::extrude::{extrude_prism, Polygon2D};
use crate::ops::hull::{build_hull, HullParams};
use approx::assert_abs_diff_eq;
use glam::{DVec2, DVec3};

fn cube() -> Mesh {
    let square = Polygon2D::rectangle(DVec2::ZERO, DVec2::ONE);
    extrude_prism(&square, 1.0, |p| p).unwrap()
}

fn relief() -> Mesh {
    let depth = DepthField::from_fn(6, 6, |col, row| 0.3 + 0.05 * ((col * row) % 4) as f32).unwrap();
    build_hull(&depth, 1.0, &HullParams::default()).unwrap()
}

struct Failing;

impl FinishStep for Failing {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn apply(&self, _mesh: &Mesh) -> MeshResult<Mesh> {
        Err(MeshError::invalid_topology("always fails"))
    }
}

struct Corrupting;

impl FinishStep for Corrupting {
    fn name(&self) -> &'static str {
        "corrupting"
    }

    fn apply(&self, mesh: &Mesh) -> MeshResult<Mesh> {
        let mut broken = mesh.clone();
        broken.add_triangle(0, 1, 10_000);
        Ok(broken)
    }
}

// =============================================================================
// Finisher
// =============================================================================

#[test]
fn test_failed_step_keeps_prior_mesh() {
    let mesh = cube();
    let output = Finisher::new().with_step(Failing).run(mesh.clone());
    assert_eq!(output.mesh, mesh);
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].step, "failing");
    assert!(output.diagnostics[0].message.contains("always fails"));
}

#[test]
fn test_step_breaking_invariants_is_rejected() {
    let mesh = cube();
    let output = Finisher::new()
        .with_step(Corrupting)
        .with_step(Recenter)
        .run(mesh);
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.mesh.triangle_count(), 12);
    output.mesh.check_invariants().unwrap();
}

#[test]
fn test_standard_step_order() {
    let config = FinishConfig::default();
    assert_eq!(
        Finisher::standard(&config, true).step_names(),
        vec!["cleanup", "winding", "smoothing", "recenter"]
    );
    assert_eq!(
        Finisher::standard(&config, false).step_names(),
        vec!["cleanup", "winding", "recenter"]
    );
}

#[test]
fn test_standard_finish_of_hull_is_deterministic() {
    let config = FinishConfig::default();
    let first = Finisher::standard(&config, true).run(relief());
    let second = Finisher::standard(&config, true).run(relief());
    assert!(first.diagnostics.is_empty());
    assert_eq!(first.mesh, second.mesh);
}

// =============================================================================
// Cleanup
// =============================================================================

#[test]
fn test_cleanup_removes_duplicates_and_degenerates() {
    let mut mesh = cube();
    let first = mesh.triangle(0);
    mesh.add_triangle(first[2], first[0], first[1]);
    mesh.add_triangle(0, 0, 1);
    let collinear = mesh.add_vertex(DVec3::new(0.5, 0.0, 0.0), DVec2::ZERO);
    mesh.add_triangle(0, collinear, 1);

    let cleaned = Cleanup.apply(&mesh).unwrap();
    assert_eq!(cleaned.triangle_count(), 12);
    // The collinear vertex is no longer referenced.
    assert_eq!(cleaned.vertex_count(), 8);
    assert_eq!(cleaned.uvs().len(), cleaned.vertex_count());
}

#[test]
fn test_cleanup_drops_non_finite_vertices() {
    let mut mesh = cube();
    let bad = mesh.add_vertex(DVec3::new(f64::NAN, 0.0, 0.0), DVec2::ZERO);
    mesh.add_triangle(0, 1, bad);

    let cleaned = Cleanup.apply(&mesh).unwrap();
    assert_eq!(cleaned.vertex_count(), 8);
    assert!(cleaned.vertices().iter().all(|v| v.is_finite()));
}

#[test]
fn test_cleanup_keeps_uvs_with_their_vertices() {
    let mut mesh = Mesh::new();
    mesh.add_vertex(DVec3::new(9.0, 9.0, 9.0), DVec2::new(0.9, 0.9));
    mesh.add_vertex(DVec3::ZERO, DVec2::new(0.0, 0.0));
    mesh.add_vertex(DVec3::X, DVec2::new(1.0, 0.0));
    mesh.add_vertex(DVec3::Y, DVec2::new(0.0, 1.0));
    mesh.add_triangle(1, 2, 3);

    let cleaned = Cleanup.apply(&mesh).unwrap();
    assert_eq!(cleaned.vertices(), &[DVec3::ZERO, DVec3::X, DVec3::Y]);
    assert_eq!(cleaned.uvs()[1], DVec2::new(1.0, 0.0));
    assert_eq!(cleaned.triangles(), &[[0, 1, 2]]);
}

#[test]
fn test_cleanup_of_all_degenerate_mesh_fails() {
    let mut mesh = Mesh::new();
    mesh.add_vertex(DVec3::ZERO, DVec2::ZERO);
    mesh.add_vertex(DVec3::X, DVec2::ZERO);
    mesh.add_vertex(DVec3::X * 2.0, DVec2::ZERO);
    mesh.add_triangle(0, 1, 2);
    assert!(matches!(Cleanup.apply(&mesh), Err(MeshError::EmptyMesh { .. })));
}

// =============================================================================
// Winding
// =============================================================================

#[test]
fn test_winding_restores_flipped_face() {
    let mut mesh = cube();
    let tri = mesh.triangle(3);
    let mut triangles = mesh.triangles().to_vec();
    triangles[3] = [tri[0], tri[2], tri[1]];
    mesh = Mesh::from_parts(mesh.vertices().to_vec(), mesh.uvs().to_vec(), triangles).unwrap();

    let fixed = FixWinding.apply(&mesh).unwrap();
    assert_eq!(fixed.triangles(), cube().triangles());
    assert_abs_diff_eq!(fixed.signed_volume(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_winding_flips_inside_out_component() {
    let mut mesh = cube();
    mesh.flip_faces();
    assert!(mesh.signed_volume() < 0.0);

    let fixed = FixWinding.apply(&mesh).unwrap();
    assert_abs_diff_eq!(fixed.signed_volume(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_winding_keeps_hull_orientation() {
    let hull = relief();
    let fixed = FixWinding.apply(&hull).unwrap();
    assert_eq!(fixed.triangles(), hull.triangles());
}

// =============================================================================
// Smoothing
// =============================================================================

#[test]
fn test_smoothing_moves_toward_neighbour_mean() {
    let mut mesh = Mesh::new();
    mesh.add_vertex(DVec3::ZERO, DVec2::ZERO);
    mesh.add_vertex(DVec3::new(2.0, 0.0, 0.0), DVec2::ZERO);
    mesh.add_vertex(DVec3::new(0.0, 2.0, 0.0), DVec2::ZERO);
    mesh.add_triangle(0, 1, 2);

    let step = LaplacianSmooth {
        preserve_volume: false,
        ..LaplacianSmooth::default()
    };
    let smoothed = step.apply(&mesh).unwrap();
    // Vertex 0: mean of (2,0,0) and (0,2,0) is (1,1,0); halfway is (0.5,0.5,0).
    assert_abs_diff_eq!(smoothed.vertex(0).x, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(smoothed.vertex(0).y, 0.5, epsilon = 1e-12);
}

#[test]
fn test_smoothing_preserves_volume() {
    let hull = relief();
    let before = hull.signed_volume();
    let smoothed = LaplacianSmooth::default().apply(&hull).unwrap();
    assert_abs_diff_eq!(smoothed.signed_volume(), before, epsilon = 1e-9);
    assert_ne!(smoothed.vertices(), hull.vertices());
    assert_eq!(smoothed.uvs(), hull.uvs());
}

#[test]
fn test_zero_iterations_is_identity() {
    let hull = relief();
    let step = LaplacianSmooth {
        iterations: 0,
        ..LaplacianSmooth::default()
    };
    assert_eq!(step.apply(&hull).unwrap(), hull);
}

// =============================================================================
// Recenter
// =============================================================================

#[test]
fn test_recenter_moves_bbox_centre_to_origin() {
    let mut mesh = cube();
    mesh.translate(DVec3::new(3.0, -2.0, 7.5));
    let centered = Recenter.apply(&mesh).unwrap();
    let (min, max) = centered.bounding_box();
    let center = (min + max) * 0.5;
    assert_abs_diff_eq!(center.length(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(max.x - min.x, 1.0, epsilon = 1e-12);
}

#[test]
fn test_recenter_empty_mesh_fails() {
    assert!(Recenter.apply(&Mesh::new()).is_err());
}
