use super::FinishStep;
use crate::error::MeshResult;
use crate::mesh::Mesh;
use log::debug;
use std::collections::HashMap;

/// Makes winding consistent within each edge-connected component, then
/// flips any component whose signed volume is negative.
///
/// Orientation only propagates across manifold edges (exactly two faces).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixWinding;

impl FinishStep for FixWinding {
    fn name(&self) -> &'static str {
        "winding"
    }

    fn apply(&self, mesh: &Mesh) -> MeshResult<Mesh> {
        mesh.check_invariants()?;
        let triangles = mesh.triangles();
        let tri_count = triangles.len();

        // Undirected edge -> [(face, stored low->high)].
        let mut edges: HashMap<(u32, u32), Vec<(usize, bool)>> =
            HashMap::with_capacity(tri_count * 3 / 2);
        for (t, tri) in triangles.iter().enumerate() {
            for (a, b) in tri_edges(tri) {
                edges
                    .entry((a.min(b), a.max(b)))
                    .or_default()
                    .push((t, a < b));
            }
        }

        let mut visited = vec![false; tri_count];
        let mut flipped = vec![false; tri_count];
        let mut components: Vec<Vec<usize>> = Vec::new();

        for seed in 0..tri_count {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            let mut component = vec![seed];
            let mut stack = vec![seed];

            while let Some(t) = stack.pop() {
                for (a, b) in tri_edges(&triangles[t]) {
                    let Some(adjacent) = edges.get(&(a.min(b), a.max(b))) else {
                        continue;
                    };
                    let [(t0, dir0), (t1, dir1)] = adjacent.as_slice() else {
                        continue;
                    };
                    let (other, dir_other) = if *t0 == t { (*t1, *dir1) } else { (*t0, *dir0) };
                    if visited[other] {
                        continue;
                    }
                    // Neighbours must traverse the shared edge in opposite directions.
                    visited[other] = true;
                    flipped[other] = flipped[t] ^ (a < b) ^ dir_other ^ true;
                    component.push(other);
                    stack.push(other);
                }
            }
            components.push(component);
        }

        let mut out: Vec<[u32; 3]> = triangles
            .iter()
            .zip(&flipped)
            .map(|(tri, &flip)| if flip { [tri[0], tri[2], tri[1]] } else { *tri })
            .collect();

        let mut reversed = 0usize;
        for component in &components {
            let volume: f64 = component
                .iter()
                .map(|&t| {
                    let [a, b, c] = out[t].map(|i| mesh.vertex(i));
                    a.dot(b.cross(c))
                })
                .sum::<f64>()
                / 6.0;
            if volume < 0.0 {
                reversed += 1;
                for &t in component {
                    out[t].swap(1, 2);
                }
            }
        }

        debug!(
            "winding: {} component(s), {} face(s) re-oriented, {reversed} component(s) reversed",
            components.len(),
            flipped.iter().filter(|&&f| f).count()
        );

        Mesh::from_parts(mesh.vertices().to_vec(), mesh.uvs().to_vec(), out)
    }
}

#[inline]
fn tri_edges(tri: &[u32; 3]) -> [(u32, u32); 3] {
    [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])]
}

