//! # Mesh Construction
//!
//! The two geometry strategies:
//! - **extrude**: flat cutout prism from the silhouette contour
//! - **hull**: double-sided relief grid from the depth field

pub mod extrude;
pub mod hull;

pub use extrude::{build_extrusion, ExtrusionOutput, ExtrusionParams, Polygon2D};
pub use hull::{build_hull, HullParams};
