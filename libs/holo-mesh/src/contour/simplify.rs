//! Douglas-Peucker simplification for closed rings.

use glam::DVec2;

/// Simplifies a closed ring so that no removed point lies farther than
/// `epsilon` from the simplified outline.
///
/// The ring is split at the first point and the point farthest from it; both
/// halves are simplified as open polylines and joined. Rings with fewer than
/// three points, or a non-positive epsilon, are returned unchanged.
pub fn simplify_closed(points: &[DVec2], epsilon: f64) -> Vec<DVec2> {
    let n = points.len();
    if n < 3 || !(epsilon > 0.0) {
        return points.to_vec();
    }

    let anchor = points[0];
    let split = (1..n)
        .max_by(|&a, &b| {
            anchor
                .distance_squared(points[a])
                .total_cmp(&anchor.distance_squared(points[b]))
        })
        .unwrap_or(n / 2);

    // Close the ring by appending the anchor so the second half ends on it.
    let mut ring = points.to_vec();
    ring.push(anchor);

    let mut keep = vec![false; ring.len()];
    keep[0] = true;
    keep[split] = true;
    keep[n] = true;
    mark_kept(&ring, 0, split, epsilon, &mut keep);
    mark_kept(&ring, split, n, epsilon, &mut keep);

    // Drop the closing duplicate.
    ring.iter()
        .zip(&keep)
        .take(n)
        .filter_map(|(&p, &k)| k.then_some(p))
        .collect()
}

/// Iterative Douglas-Peucker over `points[first..=last]`.
fn mark_kept(points: &[DVec2], first: usize, last: usize, epsilon: f64, keep: &mut [bool]) {
    let mut stack = vec![(first, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let mut farthest = start;
        let mut max_dist = 0.0;
        for i in start + 1..end {
            let dist = segment_distance(points[i], points[start], points[end]);
            if dist > max_dist {
                max_dist = dist;
                farthest = i;
            }
        }
        if max_dist > epsilon {
            keep[farthest] = true;
            stack.push((start, farthest));
            stack.push((farthest, end));
        }
    }
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
