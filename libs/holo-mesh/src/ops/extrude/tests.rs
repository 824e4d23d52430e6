//! # Extrusion Tests
//!
//! Contour-to-prism construction, fallbacks and UV projection.

use super::*;
use approx::assert_relative_eq;

fn centered_square(size: u32) -> Mask {
    let lo = size / 4;
    let hi = size - size / 4;
    Mask::from_fn(size, size, |x, y| x >= lo && x < hi && y >= lo && y < hi)
}

#[test]
fn test_polygon_rectangle_is_ccw() {
    let rect = Polygon2D::rectangle(DVec2::new(-1.0, -2.0), DVec2::new(1.0, 2.0));
    assert_eq!(rect.vertex_count(), 4);
    assert!(rect.is_ccw());
    assert_eq!(rect.signed_area(), 8.0);
}

#[test]
fn test_into_ccw_reverses_clockwise_ring() {
    let cw = Polygon2D::new(vec![DVec2::ZERO, DVec2::Y, DVec2::ONE, DVec2::X]);
    assert!(!cw.is_ccw());
    assert!(cw.into_ccw().is_ccw());
}

#[test]
fn test_cleaned_drops_duplicates_and_collinear_points() {
    let poly = Polygon2D::new(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 2.0),
        DVec2::new(0.0, 2.0),
    ]);
    let cleaned = poly.cleaned();
    assert_eq!(cleaned.vertex_count(), 4);
    assert_eq!(cleaned.signed_area(), 4.0);
}

#[test]
fn test_empty_mask_has_no_contour() {
    let mask = Mask::from_fn(64, 64, |_, _| false);
    let err = build_extrusion(&mask, 64, 64, &ExtrusionParams::default()).unwrap_err();
    assert!(matches!(err, MeshError::NoContourFound));
}

#[test]
fn test_centered_square_gives_four_sided_prism() {
    let mask = centered_square(64);
    let out = build_extrusion(&mask, 64, 64, &ExtrusionParams::default()).unwrap();

    assert!(!out.used_fallback);
    assert_eq!(out.polygon.vertex_count(), 4);
    assert!(out.polygon.is_ccw());

    // 4 base + 4 top vertices, 8 side + 2 + 2 cap triangles.
    assert_eq!(out.mesh.vertex_count(), 8);
    assert_eq!(out.mesh.triangle_count(), 12);
    assert!(out.mesh.is_watertight());
    assert!(out.mesh.signed_volume() > 0.0);
}

#[test]
fn test_prism_spans_thickness_and_metric_frame() {
    let mask = centered_square(64);
    let out = build_extrusion(&mask, 64, 64, &ExtrusionParams::default()).unwrap();
    let (min, max) = out.mesh.bounding_box();

    assert_relative_eq!(min.z, 0.0);
    assert_relative_eq!(max.z, EXTRUSION_THICKNESS);
    // Pixels 16..=47 of 64 at height 1.5.
    assert_relative_eq!(min.x, (16.0 / 64.0 - 0.5) * 1.5);
    assert_relative_eq!(max.x, (47.0 / 64.0 - 0.5) * 1.5);
    assert_relative_eq!(max.y, (0.5 - 16.0 / 64.0) * 1.5);
}

#[test]
fn test_wide_image_scales_width_by_aspect() {
    let mask = Mask::full(200, 100);
    let out = build_extrusion(&mask, 200, 100, &ExtrusionParams::default()).unwrap();
    let (min, max) = out.polygon.bounds();
    assert_relative_eq!(min.x, -1.5);
    assert_relative_eq!(max.x, (199.0 / 200.0 - 0.5) * 3.0);
    assert_relative_eq!(max.y, 0.75);
}

#[test]
fn test_low_resolution_mask_is_resampled_to_image() {
    let mask = Mask::full(8, 8);
    let out = build_extrusion(&mask, 64, 64, &ExtrusionParams::default()).unwrap();
    let (_, max) = out.polygon.bounds();
    assert_relative_eq!(max.x, (63.0 / 64.0 - 0.5) * 1.5);
}

#[test]
fn test_uvs_invert_the_metric_transform() {
    let mask = centered_square(64);
    let out = build_extrusion(&mask, 64, 64, &ExtrusionParams::default()).unwrap();
    let frame = Frame::new(64, 64, EXTRUSION_TARGET_HEIGHT);

    for (&v, &uv) in out.mesh.vertices().iter().zip(out.mesh.uvs()) {
        let pixel = DVec2::new(uv.x * 64.0, uv.y * 64.0);
        let back = frame.to_metric(pixel);
        assert_relative_eq!(back.x, v.x, epsilon = 1e-12);
        assert_relative_eq!(back.y, v.y, epsilon = 1e-12);
    }

    let pixel = DVec2::new(21.0, 37.0);
    let uv = frame.uv(frame.to_metric(pixel));
    assert_relative_eq!(uv.x, 21.0 / 64.0, epsilon = 1e-12);
    assert_relative_eq!(uv.y, 37.0 / 64.0, epsilon = 1e-12);
}

#[test]
fn test_single_row_silhouette_falls_back_to_box() {
    let mask = Mask::from_fn(32, 32, |x, y| y == 10 && (4..20).contains(&x));
    let out = build_extrusion(&mask, 32, 32, &ExtrusionParams::default()).unwrap();

    assert!(out.used_fallback);
    assert_eq!(out.mesh.vertex_count(), 8);
    assert_eq!(out.mesh.triangle_count(), 12);

    // Box spans the whole frame, not the silhouette's sliver
    let (min, max) = out.mesh.bounding_box();
    let extent = max - min;
    assert_relative_eq!(extent.x, EXTRUSION_TARGET_HEIGHT, epsilon = 1e-12);
    assert_relative_eq!(extent.y, EXTRUSION_TARGET_HEIGHT, epsilon = 1e-12);
    assert_relative_eq!(min.z, -EXTRUSION_THICKNESS / 2.0);
    assert_relative_eq!(max.z, EXTRUSION_THICKNESS / 2.0);
    assert_relative_eq!(min.x, -max.x, epsilon = 1e-12);
    assert!(out.mesh.signed_volume() > 0.0);
}

#[test]
fn test_fallback_box_follows_image_aspect() {
    let mask = Mask::from_fn(64, 32, |x, y| y == 10 && (4..40).contains(&x));
    let out = build_extrusion(&mask, 64, 32, &ExtrusionParams::default()).unwrap();

    assert!(out.used_fallback);
    let (min, max) = out.mesh.bounding_box();
    assert_relative_eq!(max.x - min.x, EXTRUSION_TARGET_HEIGHT * 2.0, epsilon = 1e-12);
    assert_relative_eq!(max.y - min.y, EXTRUSION_TARGET_HEIGHT, epsilon = 1e-12);

    // Corner UVs cover the full image
    let uvs = out.mesh.uvs();
    let (u_min, u_max) = uvs.iter().fold((f64::MAX, f64::MIN), |(lo, hi), uv| {
        (lo.min(uv.x), hi.max(uv.x))
    });
    assert_relative_eq!(u_min, 0.0, epsilon = 1e-12);
    assert_relative_eq!(u_max, 1.0, epsilon = 1e-12);
}

#[test]
fn test_rejects_zero_sized_image() {
    let mask = Mask::full(4, 4);
    assert!(build_extrusion(&mask, 0, 4, &ExtrusionParams::default()).is_err());
}

#[test]
fn test_extrude_prism_rejects_clockwise() {
    let cw = Polygon2D::new(vec![DVec2::ZERO, DVec2::Y, DVec2::ONE, DVec2::X]);
    assert!(extrude_prism(&cw, 1.0, |p| p).is_err());
}

#[test]
fn test_extrude_prism_concave_outline() {
    let l_shape = Polygon2D::new(vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(1.0, 2.0),
        DVec2::new(0.0, 2.0),
    ]);
    let mesh = extrude_prism(&l_shape, 0.5, |p| p).unwrap();
    assert_eq!(mesh.vertex_count(), 12);
    assert_eq!(mesh.triangle_count(), 12 + 4 + 4);
    assert!(mesh.is_watertight());
    assert_relative_eq!(mesh.signed_volume(), 1.5, epsilon = 1e-12);
}
