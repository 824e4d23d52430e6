//! # Holo Mesh
//!
//! Mesh synthesis for single-image holograms. Turns a silhouette mask and a
//! per-pixel depth estimate into a textured-ready triangle mesh.
//!
//! ## Architecture
//!
//! ```text
//! Mask ──► contour ──► ops::extrude ──┐
//!                                      ├──► finish ──► Mesh
//! DepthField ──► depth ──► ops::hull ──┘
//! ```
//!
//! ## Algorithms
//!
//! - **Contours**: Moore-neighbour boundary tracing, Douglas-Peucker simplification
//! - **Caps**: Ear clipping with robust orientation predicates
//! - **Hull**: Regular grid with mirrored, tapered back surface and bridged edges
//! - **Depth**: Min/max normalization, bilateral filtering
//! - **Finishing**: Cleanup, winding propagation, Laplacian smoothing, recentering
//!
//! ## Usage
//!
//! ```rust
//! use holo_mesh::{DepthField, HullParams, build_hull};
//!
//! let depth = DepthField::from_fn(4, 4, |_, row| row as f32 / 3.0).unwrap();
//! let mesh = build_hull(&depth, 1.0, &HullParams::default()).unwrap();
//! assert_eq!(mesh.vertex_count(), 32);
//! assert!(mesh.is_watertight());
//! ```

pub mod contour;
pub mod depth;
pub mod diagnostic;
pub mod error;
pub mod finish;
pub mod mask;
pub mod mesh;
pub mod ops;

pub use contour::{largest_external, trace_external, Contour};
pub use depth::DepthField;
pub use diagnostic::{Diagnostic, Severity};
pub use error::{MeshError, MeshResult};
pub use finish::{FinishOutput, FinishStep, Finisher};
pub use mask::Mask;
pub use mesh::Mesh;
pub use ops::extrude::{build_extrusion, ExtrusionOutput, ExtrusionParams, Polygon2D};
pub use ops::hull::{build_hull, HullParams};
