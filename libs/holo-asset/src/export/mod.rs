//! # Asset Export
//!
//! Encoding of finished assets and their persistence.
//!
//! Use [`AssetEncoder`] with [`GlbEncoder`] to serialize, then
//! [`AssetStore::write`] to persist under a content-derived name:
//!
//! ```rust,ignore
//! let bytes = GlbEncoder.encode(&asset)?;
//! let hash = content_hash(&image, &mask, depth.as_ref());
//! let stored = store.write("holo_depth", hash, GlbEncoder.extension(), &bytes)?;
//! ```

pub mod glb;
pub mod store;


pub use glb::{encode_glb, read_glb_json, GlbEncoder};
pub use store::{content_hash, AssetStore, StoredAsset};

use crate::error::AssetResult;
use crate::material::HologramAsset;

/// Serializes a [`HologramAsset`] into a file format.
pub trait AssetEncoder: Send + Sync {
    /// File extension, without the dot.
    fn extension(&self) -> &'static str;

    /// Encodes the asset.
    fn encode(&self, asset: &HologramAsset) -> AssetResult<Vec<u8>>;
}
