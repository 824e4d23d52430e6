//! # Textures
//!
//! Image-space processing for the hologram material:
//! - **albedo**: contrast/brightness adjustment of the photograph
//! - **normal_map**: tangent-space normals baked from depth gradients
//!
//! Both are best-effort; callers fall back to the raw photograph or to no
//! normal map when they fail.

mod albedo;
mod normal_map;

pub use albedo::adjust_albedo;
pub use normal_map::bake_normal_map;
