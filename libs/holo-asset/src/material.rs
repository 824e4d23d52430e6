//! # Material and Asset Model

use crate::error::{AssetError, AssetResult};
use config::constants::MATERIAL_NAME;
use config::MaterialConfig;
use holo_mesh::Mesh;
use image::RgbImage;

/// PBR metallic-roughness material with embedded textures.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: RgbImage,
    pub normal_map: Option<RgbImage>,
    pub metallic: f64,
    pub roughness: f64,
    pub double_sided: bool,
}

impl Material {
    /// Single-sided material without a normal map.
    pub fn new(base_color: RgbImage, config: &MaterialConfig) -> Self {
        Self {
            name: MATERIAL_NAME.to_string(),
            base_color,
            normal_map: None,
            metallic: config.metallic,
            roughness: config.roughness,
            double_sided: false,
        }
    }

    pub fn with_normal_map(mut self, normal_map: Option<RgbImage>) -> Self {
        self.normal_map = normal_map;
        self
    }

    pub fn double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }
}

/// A finished mesh and its material, ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct HologramAsset {
    mesh: Mesh,
    material: Material,
}

impl HologramAsset {
    /// Pairs a mesh with its material.
    ///
    /// # Errors
    ///
    /// [`AssetError::InvalidMesh`] unless the mesh has faces, one UV per
    /// vertex and only in-range indices.
    pub fn new(mesh: Mesh, material: Material) -> AssetResult<Self> {
        if mesh.triangle_count() == 0 {
            return Err(AssetError::invalid_mesh("mesh has no faces"));
        }
        mesh.check_invariants()
            .map_err(|err| AssetError::invalid_mesh(err.to_string()))?;
        if let Some(index) = mesh.vertices().iter().position(|v| !v.is_finite()) {
            return Err(AssetError::invalid_mesh(format!(
                "vertex {index} is not finite"
            )));
        }
        Ok(Self { mesh, material })
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec2, DVec3};

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO, DVec2::ZERO);
        mesh.add_vertex(DVec3::X, DVec2::X);
        mesh.add_vertex(DVec3::Y, DVec2::Y);
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_material_defaults() {
        let material = Material::new(RgbImage::new(2, 2), &MaterialConfig::default());
        assert_eq!(material.name, "HoloMaterial");
        assert_eq!(material.metallic, 0.0);
        assert_eq!(material.roughness, 0.6);
        assert!(!material.double_sided);
        assert!(material.normal_map.is_none());
    }

    #[test]
    fn test_asset_rejects_faceless_mesh() {
        let material = Material::new(RgbImage::new(1, 1), &MaterialConfig::default());
        let err = HologramAsset::new(Mesh::new(), material).unwrap_err();
        assert!(matches!(err, AssetError::InvalidMesh { .. }));
    }

    #[test]
    fn test_asset_rejects_nan_vertex() {
        let mut mesh = triangle();
        mesh.vertices_mut()[1] = DVec3::new(f64::NAN, 0.0, 0.0);
        let material = Material::new(RgbImage::new(1, 1), &MaterialConfig::default());
        assert!(HologramAsset::new(mesh, material).is_err());
    }

    #[test]
    fn test_asset_accepts_valid_mesh() {
        let material = Material::new(RgbImage::new(1, 1), &MaterialConfig::default())
            .double_sided(true);
        let asset = HologramAsset::new(triangle(), material).unwrap();
        assert!(asset.material().double_sided);
        assert_eq!(asset.mesh().vertex_count(), 3);
    }
}
