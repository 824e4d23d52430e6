//! # Silhouette Contours
//!
//! Outer-boundary extraction from binary masks.
//!
//! Foreground pixels are grouped into 8-connected components by region
//! growing. Each component's outer boundary is then walked with
//! Moore-neighbour tracing, which visits boundary pixels in ring order and
//! ignores holes. Points are pixel coordinates with the origin at the
//! top-left and y increasing downward.

pub mod simplify;


pub use simplify::simplify_closed;

use crate::mask::Mask;
use glam::DVec2;
use log::debug;

/// Moore neighbourhood in clockwise screen order, starting east.
const NEIGH_OFFSETS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Index of the west neighbour in [`NEIGH_OFFSETS`].
const WEST: usize = 4;

/// A closed ring of boundary points. The last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<DVec2>,
}

impl Contour {
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area (shoelace formula, always non-negative).
    pub fn area(&self) -> f64 {
        signed_area(&self.points).abs()
    }

    /// Closed arc length, including the closing segment.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| self.points[i].distance(self.points[(i + 1) % n]))
            .sum()
    }

    /// Douglas-Peucker simplification with `epsilon = ratio × perimeter`.
    pub fn simplified(&self, ratio: f64) -> Contour {
        let epsilon = ratio * self.perimeter();
        Contour::new(simplify_closed(&self.points, epsilon))
    }
}

/// Signed shoelace area; positive when counter-clockwise in a y-up frame.
pub fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

/// Traces the outer boundary of every 8-connected foreground component.
///
/// Components are returned in raster order of their top-left pixel.
pub fn trace_external(mask: &Mask) -> Vec<Contour> {
    let width = mask.width() as usize;
    let height = mask.height() as usize;
    let mut used = vec![false; width * height];
    let mut stack = Vec::with_capacity(64);
    let mut contours = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if used[idx] || !mask.is_foreground(x as i64, y as i64) {
                continue;
            }

            // Claim the whole component so later seeds skip it.
            used[idx] = true;
            stack.push((x as i64, y as i64));
            while let Some((cx, cy)) = stack.pop() {
                for (dx, dy) in NEIGH_OFFSETS {
                    let nx = cx + dx;
                    let ny = cy + dy;
                    if !mask.is_foreground(nx, ny) {
                        continue;
                    }
                    let n_idx = ny as usize * width + nx as usize;
                    if !used[n_idx] {
                        used[n_idx] = true;
                        stack.push((nx, ny));
                    }
                }
            }

            contours.push(trace_from(mask, (x as i64, y as i64)));
        }
    }

    debug!("traced {} contour(s) in {width}x{height} mask", contours.len());
    contours
}

/// The external contour with the largest enclosed area, if any.
///
/// Ties (including the all-zero-area case of one-pixel-wide shapes) go to the
/// contour with more points, then to the earliest one.
pub fn largest_external(mask: &Mask) -> Option<Contour> {
    let mut best: Option<(f64, Contour)> = None;
    for contour in trace_external(mask) {
        let area = contour.area();
        let better = match &best {
            None => true,
            Some((best_area, best_contour)) => {
                area > *best_area || (area == *best_area && contour.len() > best_contour.len())
            }
        };
        if better {
            best = Some((area, contour));
        }
    }
    best.map(|(_, contour)| contour)
}

/// Moore-neighbour trace starting at the raster-first pixel of a component.
///
/// The start pixel's west neighbour is background (it would otherwise come
/// first in raster order), so it serves as the initial backtrack.
fn trace_from(mask: &Mask, start: (i64, i64)) -> Contour {
    let to_point = |(x, y): (i64, i64)| DVec2::new(x as f64, y as f64);
    let mut points = vec![to_point(start)];

    let Some((second, second_dir)) = next_boundary(mask, start, WEST) else {
        // Isolated pixel.
        return Contour::new(points);
    };

    let limit = 4 * (mask.width() as usize) * (mask.height() as usize) + 8;
    let mut current = second;
    let mut backtrack = second_dir;

    for _ in 0..limit {
        let Some((next, dir)) = next_boundary(mask, current, backtrack) else {
            break;
        };
        if current == start && next == second {
            break;
        }
        points.push(to_point(current));
        current = next;
        backtrack = dir;
    }

    Contour::new(points)
}

/// Scans the Moore neighbourhood of `pixel` clockwise, beginning just after
/// the backtrack direction. Returns the first foreground neighbour and the
/// direction, seen from that neighbour, of the last background pixel checked.
fn next_boundary(mask: &Mask, pixel: (i64, i64), backtrack: usize) -> Option<((i64, i64), usize)> {
    let (px, py) = pixel;
    for k in 1..=8 {
        let dir = (backtrack + k) % 8;
        let (dx, dy) = NEIGH_OFFSETS[dir];
        let candidate = (px + dx, py + dy);
        if mask.is_foreground(candidate.0, candidate.1) {
            let (bx, by) = NEIGH_OFFSETS[(backtrack + k - 1) % 8];
            let back = (px + bx - candidate.0, py + by - candidate.1);
            let back_dir = NEIGH_OFFSETS
                .iter()
                .position(|&offset| offset == back)
                .unwrap_or(WEST);
            return Some((candidate, back_dir));
        }
    }
    None
}
