use super::FinishStep;
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use config::constants::{EPSILON, LAPLACIAN_LAMBDA, SMOOTHING_ITERATIONS};
use config::FinishConfig;
use glam::DVec3;
use rayon::prelude::*;

/// Umbrella-operator Laplacian smoothing.
///
/// Each iteration moves every vertex toward the mean of its edge neighbours:
/// `v' = v + λ(mean − v)`. With `preserve_volume`, the result is scaled about
/// its centroid so the signed volume matches the input. Vertices without
/// neighbours stay put. Neighbour lists are sorted, so the output does not
/// depend on thread scheduling.
#[derive(Debug, Clone, PartialEq)]
pub struct LaplacianSmooth {
    pub iterations: u32,
    pub lambda: f64,
    pub preserve_volume: bool,
}

impl Default for LaplacianSmooth {
    fn default() -> Self {
        Self {
            iterations: SMOOTHING_ITERATIONS,
            lambda: LAPLACIAN_LAMBDA,
            preserve_volume: true,
        }
    }
}

impl From<&FinishConfig> for LaplacianSmooth {
    fn from(config: &FinishConfig) -> Self {
        Self {
            iterations: config.smoothing_iterations,
            lambda: config.smoothing_lambda,
            preserve_volume: config.preserve_volume,
        }
    }
}

impl FinishStep for LaplacianSmooth {
    fn name(&self) -> &'static str {
        "smoothing"
    }

    fn apply(&self, mesh: &Mesh) -> MeshResult<Mesh> {
        mesh.check_invariants()?;
        if mesh.triangle_count() == 0 {
            return Err(MeshError::empty("nothing to smooth"));
        }
        if self.iterations == 0 {
            return Ok(mesh.clone());
        }

        let neighbours = neighbour_lists(mesh);
        let mut positions = mesh.vertices().to_vec();
        let lambda = self.lambda;

        for _ in 0..self.iterations {
            let previous = positions;
            positions = neighbours
                .par_iter()
                .zip(previous.par_iter())
                .map(|(adjacent, &v)| {
                    if adjacent.is_empty() {
                        return v;
                    }
                    let sum = adjacent
                        .iter()
                        .fold(DVec3::ZERO, |acc, &i| acc + previous[i as usize]);
                    let mean = sum / adjacent.len() as f64;
                    v + (mean - v) * lambda
                })
                .collect();
        }

        let mut smoothed =
            Mesh::from_parts(positions, mesh.uvs().to_vec(), mesh.triangles().to_vec())?;

        if self.preserve_volume {
            restore_volume(&mut smoothed, mesh.signed_volume());
        }

        if let Some(bad) = smoothed.vertices().iter().position(|v| !v.is_finite()) {
            return Err(MeshError::non_finite(format!(
                "smoothing produced a non-finite vertex at {bad}"
            )));
        }
        Ok(smoothed)
    }
}

/// Sorted, deduplicated edge neighbours per vertex.
fn neighbour_lists(mesh: &Mesh) -> Vec<Vec<u32>> {
    let mut lists = vec![Vec::new(); mesh.vertex_count()];
    for tri in mesh.triangles() {
        for k in 0..3 {
            let a = tri[k];
            let b = tri[(k + 1) % 3];
            lists[a as usize].push(b);
            lists[b as usize].push(a);
        }
    }
    for list in &mut lists {
        list.sort_unstable();
        list.dedup();
    }
    lists
}

/// Scales about the vertex centroid so the signed volume returns to `target`.
/// Skipped when either volume is negligible or the signs disagree.
fn restore_volume(mesh: &mut Mesh, target: f64) {
    let current = mesh.signed_volume();
    if target.abs() <= EPSILON || current.abs() <= EPSILON {
        return;
    }
    let ratio = target / current;
    if !(ratio > 0.0 && ratio.is_finite()) {
        return;
    }
    let scale = ratio.cbrt();
    let centroid =
        mesh.vertices().iter().fold(DVec3::ZERO, |acc, &v| acc + v) / mesh.vertex_count() as f64;
    for v in mesh.vertices_mut() {
        *v = centroid + (*v - centroid) * scale;
    }
}
