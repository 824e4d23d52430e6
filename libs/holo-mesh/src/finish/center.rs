use super::FinishStep;
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// Translates the mesh so its bounding-box centre sits at the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recenter;

impl FinishStep for Recenter {
    fn name(&self) -> &'static str {
        "recenter"
    }

    fn apply(&self, mesh: &Mesh) -> MeshResult<Mesh> {
        if mesh.is_empty() {
            return Err(MeshError::empty("cannot recenter a mesh without vertices"));
        }
        let (min, max) = mesh.bounding_box();
        let center = (min + max) * 0.5;
        if !center.is_finite() {
            return Err(MeshError::non_finite(format!("bounding box centre {center}")));
        }
        let mut centered = mesh.clone();
        centered.translate(-center);
        Ok(centered)
    }
}
