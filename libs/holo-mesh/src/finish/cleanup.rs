use super::FinishStep;
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use config::constants::DEGENERATE_AREA_EPSILON;
use std::collections::HashSet;

/// Removes faces that touch non-finite vertices, repeat an index, have no
/// area, or duplicate an earlier face; then drops unreferenced vertices.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cleanup;

impl FinishStep for Cleanup {
    fn name(&self) -> &'static str {
        "cleanup"
    }

    fn apply(&self, mesh: &Mesh) -> MeshResult<Mesh> {
        mesh.check_invariants()?;
        let finite: Vec<bool> = mesh.vertices().iter().map(|v| v.is_finite()).collect();
        let mut seen = HashSet::with_capacity(mesh.triangle_count());
        let mut kept = Vec::with_capacity(mesh.triangle_count());

        for tri in mesh.triangles() {
            let [a, b, c] = *tri;
            if a == b || b == c || a == c {
                continue;
            }
            if !tri.iter().all(|&i| finite[i as usize]) {
                continue;
            }
            if mesh.face_cross(tri).length() / 2.0 <= DEGENERATE_AREA_EPSILON {
                continue;
            }
            let mut key = *tri;
            key.sort_unstable();
            if seen.insert(key) {
                kept.push(*tri);
            }
        }

        if kept.is_empty() {
            return Err(MeshError::empty(format!(
                "all {} faces were degenerate",
                mesh.triangle_count()
            )));
        }

        compact(mesh, kept)
    }
}

/// Rebuilds the vertex buffers keeping only referenced vertices, in their
/// original order.
fn compact(mesh: &Mesh, triangles: Vec<[u32; 3]>) -> MeshResult<Mesh> {
    let mut remap: Vec<Option<u32>> = vec![None; mesh.vertex_count()];
    for tri in &triangles {
        for &i in tri {
            remap[i as usize] = Some(0);
        }
    }

    let mut vertices = Vec::new();
    let mut uvs = Vec::new();
    for (old, slot) in remap.iter_mut().enumerate() {
        if slot.is_some() {
            *slot = Some(vertices.len() as u32);
            vertices.push(mesh.vertices()[old]);
            uvs.push(mesh.uvs()[old]);
        }
    }

    let triangles = triangles
        .into_iter()
        .map(|tri| tri.map(|i| remap[i as usize].unwrap_or(0)))
        .collect();
    Mesh::from_parts(vertices, uvs, triangles)
}
