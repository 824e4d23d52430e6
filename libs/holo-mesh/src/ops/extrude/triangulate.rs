//! Ear-clipping triangulation of simple polygons.

use crate::error::{MeshError, MeshResult};
use glam::DVec2;
use robust::{orient2d, Coord};

/// Triangulates a simple counter-clockwise polygon.
///
/// Returns `n − 2` index triples, each counter-clockwise. Orientation tests
/// use exact predicates so near-collinear contour points cannot flip an ear.
/// Fails when no ear can be found, which happens for self-intersecting input.
pub fn ear_clip(points: &[DVec2]) -> MeshResult<Vec<[usize; 3]>> {
    let n = points.len();
    if n < 3 {
        return Err(MeshError::degenerate(format!(
            "cannot triangulate {n} points"
        )));
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let len = remaining.len();
        let ear = (0..len).find(|&i| {
            let prev = remaining[(i + len - 1) % len];
            let curr = remaining[i];
            let next = remaining[(i + 1) % len];
            is_ear(points, &remaining, prev, curr, next)
        });

        let Some(i) = ear else {
            return Err(MeshError::degenerate(format!(
                "no ear found with {len} of {n} vertices left; polygon is not simple"
            )));
        };
        let prev = remaining[(i + len - 1) % len];
        let next = remaining[(i + 1) % len];
        triangles.push([prev, remaining[i], next]);
        remaining.remove(i);
    }

    let [a, b, c] = [remaining[0], remaining[1], remaining[2]];
    if orient(points[a], points[b], points[c]) <= 0.0 {
        return Err(MeshError::degenerate("final triangle is not counter-clockwise"));
    }
    triangles.push([a, b, c]);
    Ok(triangles)
}

fn is_ear(points: &[DVec2], remaining: &[usize], prev: usize, curr: usize, next: usize) -> bool {
    let a = points[prev];
    let b = points[curr];
    let c = points[next];

    // Reflex or flat corner.
    if orient(a, b, c) <= 0.0 {
        return false;
    }

    remaining
        .iter()
        .filter(|&&idx| idx != prev && idx != curr && idx != next)
        .all(|&idx| !in_triangle(points[idx], a, b, c))
}

/// Closed containment test, so points on an edge also block the ear.
fn in_triangle(p: DVec2, a: DVec2, b: DVec2, c: DVec2) -> bool {
    orient(a, b, p) >= 0.0 && orient(b, c, p) >= 0.0 && orient(c, a, p) >= 0.0
}

#[inline]
fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}
