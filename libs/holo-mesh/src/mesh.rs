//! # Mesh Data Structure
//!
//! Triangle mesh with one UV pair per vertex.

use crate::error::{MeshError, MeshResult};
use glam::{DVec2, DVec3};
use std::collections::HashMap;

/// A triangle mesh with vertices, per-vertex UVs and indices.
///
/// Vertex index is identity: `uvs[i]` belongs to `vertices[i]`. Winding is
/// counter-clockwise when seen from outside, so face normals point outward.
/// Geometry is kept in f64; conversion to f32 only happens at export.
///
/// # Example
///
/// ```rust
/// use holo_mesh::Mesh;
/// use glam::{DVec2, DVec3};
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0), DVec2::new(0.0, 1.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0), DVec2::new(1.0, 1.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0), DVec2::new(0.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    vertices: Vec<DVec3>,
    uvs: Vec<DVec2>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Assembles a mesh from raw buffers, checking the UV and index invariants.
    pub fn from_parts(
        vertices: Vec<DVec3>,
        uvs: Vec<DVec2>,
        triangles: Vec<[u32; 3]>,
    ) -> MeshResult<Self> {
        let mesh = Self {
            vertices,
            uvs,
            triangles,
        };
        mesh.check_invariants()?;
        Ok(mesh)
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex with its UV and returns its index.
    pub fn add_vertex(&mut self, position: DVec3, uv: DVec2) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.uvs.push(uv);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Mutable access to positions. The vertex count cannot change through it.
    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [DVec3] {
        &mut self.vertices
    }

    #[inline]
    pub fn uvs(&self) -> &[DVec2] {
        &self.uvs
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Computes area-weighted vertex normals.
    pub fn compute_normals(&self) -> Vec<DVec3> {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for tri in &self.triangles {
            let normal = self.face_cross(tri);
            for &i in tri {
                normals[i as usize] += normal;
            }
        }

        for normal in &mut normals {
            let len = normal.length();
            *normal = if len > 0.0 { *normal / len } else { DVec3::Z };
        }

        normals
    }

    /// Twice the area-weighted normal of a face.
    #[inline]
    pub fn face_cross(&self, tri: &[u32; 3]) -> DVec3 {
        let v0 = self.vertices[tri[0] as usize];
        let v1 = self.vertices[tri[1] as usize];
        let v2 = self.vertices[tri[2] as usize];
        (v1 - v0).cross(v2 - v0)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Reverses the winding of every face.
    pub fn flip_faces(&mut self) {
        for tri in &mut self.triangles {
            tri.swap(1, 2);
        }
    }

    /// Signed enclosed volume (positive for outward-facing closed meshes).
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|tri| {
                let v0 = self.vertices[tri[0] as usize];
                let v1 = self.vertices[tri[1] as usize];
                let v2 = self.vertices[tri[2] as usize];
                v0.dot(v1.cross(v2))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Counts how many faces use each undirected edge.
    pub fn edge_use_counts(&self) -> HashMap<(u32, u32), usize> {
        let mut counts = HashMap::with_capacity(self.triangles.len() * 3 / 2);
        for tri in &self.triangles {
            for k in 0..3 {
                let a = tri[k];
                let b = tri[(k + 1) % 3];
                *counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Returns edges used by exactly one face, sorted.
    pub fn boundary_edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<(u32, u32)> = self
            .edge_use_counts()
            .into_iter()
            .filter_map(|(edge, count)| (count == 1).then_some(edge))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// True when every edge is shared by exactly two faces.
    pub fn is_watertight(&self) -> bool {
        !self.triangles.is_empty() && self.edge_use_counts().values().all(|&count| count == 2)
    }

    /// Checks `uvs.len() == vertices.len()` and that every index is in range.
    pub fn check_invariants(&self) -> MeshResult<()> {
        if self.uvs.len() != self.vertices.len() {
            return Err(MeshError::invalid_topology(format!(
                "{} UVs for {} vertices",
                self.uvs.len(),
                self.vertices.len()
            )));
        }
        let vertex_count = self.vertices.len() as u32;
        if let Some(tri) = self
            .triangles
            .iter()
            .find(|tri| tri.iter().any(|&i| i >= vertex_count))
        {
            return Err(MeshError::invalid_topology(format!(
                "face {tri:?} references a vertex beyond {vertex_count}"
            )));
        }
        Ok(())
    }

    /// Returns true if the mesh satisfies its structural invariants and has
    /// at least one face.
    pub fn validate(&self) -> bool {
        !self.triangles.is_empty() && self.check_invariants().is_ok()
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// Exports UVs as flattened [u, v, u, v, ...] f32 array.
    pub fn uvs_f32(&self) -> Vec<f32> {
        self.uvs
            .iter()
            .flat_map(|uv| [uv.x as f32, uv.y as f32])
            .collect()
    }

    /// Exports triangle indices as flattened u32 array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}
