//! # Hull Tests

use super::*;
use approx::assert_relative_eq;

fn row_ramp(rows: usize, cols: usize) -> DepthField {
    DepthField::from_fn(cols, rows, |_, row| row as f32 / (rows - 1) as f32).unwrap()
}

#[test]
fn test_four_by_four_counts() {
    let mesh = build_hull(&row_ramp(4, 4), 1.0, &HullParams::default()).unwrap();
    assert_eq!(mesh.vertex_count(), 32);
    // 18 front + 18 back + 12 + 12 bridge triangles.
    assert_eq!(mesh.triangle_count(), 18 + 18 + 24);
}

#[test]
fn test_non_square_grid_counts() {
    let depth = DepthField::from_fn(5, 3, |col, row| 0.1 + (col + row) as f32 * 0.05).unwrap();
    let mesh = build_hull(&depth, 1.0, &HullParams::default()).unwrap();
    assert_eq!(mesh.vertex_count(), 30);
    let quads = 2 * 4;
    assert_eq!(mesh.triangle_count(), 4 * quads + 4 * 2 + 4 * 4);
}

#[test]
fn test_hull_is_watertight() {
    let mesh = build_hull(&row_ramp(6, 5), 1.3, &HullParams::default()).unwrap();
    assert!(mesh.is_watertight());
    assert!(mesh.boundary_edges().is_empty());
    mesh.check_invariants().unwrap();
}

#[test]
fn test_hull_is_outward_facing() {
    let depth = DepthField::from_fn(8, 8, |col, row| 0.2 + 0.01 * (col * row) as f32).unwrap();
    let mesh = build_hull(&depth, 1.0, &HullParams::default()).unwrap();
    assert!(mesh.signed_volume() > 0.0);

    let front = mesh.face_cross(&mesh.triangle(0));
    assert!(front.z > 0.0);
    let back = mesh.face_cross(&mesh.triangle(2 * 7 * 7));
    assert!(back.z < 0.0);
}

#[test]
fn test_every_directed_edge_appears_once() {
    let mesh = build_hull(&row_ramp(4, 4), 1.0, &HullParams::default()).unwrap();
    let mut directed = std::collections::HashSet::new();
    for tri in mesh.triangles() {
        for k in 0..3 {
            assert!(directed.insert((tri[k], tri[(k + 1) % 3])));
        }
    }
}

#[test]
fn test_vertex_positions_and_depth_scaling() {
    let depth = DepthField::constant(3, 3, 0.5).unwrap();
    let params = HullParams::default();
    let mesh = build_hull(&depth, 2.0, &params).unwrap();

    let top_left = mesh.vertex(0);
    assert_relative_eq!(top_left.x, -1.0);
    assert_relative_eq!(top_left.y, 0.5);
    assert_relative_eq!(top_left.z, 0.5 * 2.0 * 0.6, epsilon = 1e-12);

    let bottom_right_back = mesh.vertex(9 + 8);
    assert_relative_eq!(bottom_right_back.x, 1.0);
    assert_relative_eq!(bottom_right_back.y, -0.5);
    assert_relative_eq!(bottom_right_back.z, -0.5 * 2.0 * 0.6 * 0.3, epsilon = 1e-12);
}

#[test]
fn test_uvs_are_cropped_and_shared_by_back() {
    let mesh = build_hull(&row_ramp(4, 4), 1.0, &HullParams::default()).unwrap();
    let uvs = mesh.uvs();
    assert_eq!(uvs.len(), mesh.vertex_count());

    assert_relative_eq!(uvs[0].x, 0.01);
    assert_relative_eq!(uvs[0].y, 0.01);
    assert_relative_eq!(uvs[15].x, 0.99, epsilon = 1e-12);
    assert_relative_eq!(uvs[15].y, 0.99, epsilon = 1e-12);
    assert_eq!(&uvs[..16], &uvs[16..]);
    assert!(uvs.iter().all(|uv| uv.x > 0.01 - 1e-12 && uv.x < 0.99 + 1e-12));
}

#[test]
fn test_rejects_single_row_grid() {
    let depth = DepthField::constant(4, 1, 0.0).unwrap();
    let err = build_hull(&depth, 1.0, &HullParams::default()).unwrap_err();
    assert!(matches!(err, MeshError::InvalidGrid { rows: 1, cols: 4, .. }));
}

#[test]
fn test_rejects_bad_aspect() {
    let depth = row_ramp(3, 3);
    assert!(build_hull(&depth, 0.0, &HullParams::default()).is_err());
    assert!(build_hull(&depth, f64::NAN, &HullParams::default()).is_err());
}

#[test]
fn test_params_follow_mesh_config() {
    let config = MeshConfig {
        depth_scale_factor: 0.9,
        ..MeshConfig::default()
    };
    let params = HullParams::from(&config);
    assert_eq!(params.depth_scale_factor, 0.9);
    assert_eq!(params.back_taper_ratio, DEFAULT_BACK_TAPER_RATIO);
}
