//! # Holo Asset
//!
//! Turns a finished hologram mesh into a deliverable asset: texture
//! preparation, PBR material assembly and binary glTF export.
//!
//! ## Architecture
//!
//! ```text
//! RgbImage ──► texture::adjust_albedo ──┐
//!                                        ├──► Material ──┐
//! DepthField ──► texture::bake_normal_map┘               ├──► HologramAsset ──► export
//! Mesh ──────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use config::MaterialConfig;
//! use holo_asset::{encode_glb, read_glb_json, HologramAsset, Material};
//! use holo_mesh::{build_hull, DepthField, HullParams};
//! use image::RgbImage;
//!
//! let depth = DepthField::from_fn(4, 4, |col, _| col as f32 / 3.0).unwrap();
//! let mesh = build_hull(&depth, 1.0, &HullParams::default()).unwrap();
//! let material =
//!     Material::new(RgbImage::new(4, 4), &MaterialConfig::default()).double_sided(true);
//! let asset = HologramAsset::new(mesh, material).unwrap();
//!
//! let glb = encode_glb(&asset).unwrap();
//! let document = read_glb_json(&glb).unwrap();
//! assert_eq!(document["materials"][0]["doubleSided"], true);
//! ```

pub mod error;
pub mod export;
pub mod material;
pub mod texture;

pub use error::{AssetError, AssetResult};
pub use export::{
    content_hash, encode_glb, read_glb_json, AssetEncoder, AssetStore, GlbEncoder, StoredAsset,
};
pub use material::{HologramAsset, Material};
pub use texture::{adjust_albedo, bake_normal_map};
