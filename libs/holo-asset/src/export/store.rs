//! # Content-Addressed Storage
//!
//! Asset files are named `<prefix>_<hash>.<ext>`, where the hash covers the
//! request inputs. Identical inputs map to the same file, so rewriting it is
//! harmless.

use crate::error::{AssetError, AssetResult};
use config::ExportConfig;
use holo_mesh::{DepthField, Mask};
use image::RgbImage;
use log::info;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Hash of the request inputs that determine an asset.
///
/// Covers image dimensions and pixels, the mask, and the raw depth samples
/// when present.
pub fn content_hash(image: &RgbImage, mask: &Mask, depth: Option<&DepthField>) -> u64 {
    let mut hasher = DefaultHasher::new();
    image.dimensions().hash(&mut hasher);
    image.as_raw().hash(&mut hasher);
    (mask.width(), mask.height()).hash(&mut hasher);
    mask.as_image().as_raw().hash(&mut hasher);
    match depth {
        Some(depth) => {
            1u8.hash(&mut hasher);
            (depth.width(), depth.height()).hash(&mut hasher);
            for v in depth.data() {
                v.to_bits().hash(&mut hasher);
            }
        }
        None => 0u8.hash(&mut hasher),
    }
    hasher.finish()
}

/// Where a stored asset ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAsset {
    pub path: PathBuf,
    pub file_name: String,
    /// Public URL when a base URL is configured, otherwise the file path
    pub url: String,
}

/// Writes encoded assets into a shared output directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    output_dir: PathBuf,
    public_base_url: Option<String>,
}

impl AssetStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            public_base_url: None,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    pub fn with_public_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.public_base_url = Some(base_url.into());
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<prefix>_<16 hex digits>.<extension>`
    pub fn file_name(prefix: &str, hash: u64, extension: &str) -> String {
        format!("{prefix}_{hash:016x}.{extension}")
    }

    /// Writes `bytes` under the content-derived name.
    ///
    /// The directory is created if missing. Data goes to a private temporary
    /// file first and is renamed into place, so readers never observe a
    /// partial file and concurrent writers of the same name do not interleave.
    pub fn write(
        &self,
        prefix: &str,
        hash: u64,
        extension: &str,
        bytes: &[u8],
    ) -> AssetResult<StoredAsset> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|source| AssetError::io(&self.output_dir, source))?;

        let file_name = Self::file_name(prefix, hash, extension);
        let path = self.output_dir.join(&file_name);
        let temp = self.output_dir.join(format!(
            ".{file_name}.{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        write_then_rename(&temp, &path, bytes)?;

        let url = match &self.public_base_url {
            Some(base) => format!("{}/{file_name}", base.trim_end_matches('/')),
            None => path.display().to_string(),
        };
        info!("wrote {} ({} bytes)", path.display(), bytes.len());

        Ok(StoredAsset {
            path,
            file_name,
            url,
        })
    }
}

/// Writes `bytes` to `temp` and renames it onto `path`. The temporary file is
/// removed on either failure.
pub(crate) fn write_then_rename(temp: &Path, path: &Path, bytes: &[u8]) -> AssetResult<()> {
    if let Err(source) = fs::write(temp, bytes) {
        let _ = fs::remove_file(temp);
        return Err(AssetError::io(temp, source));
    }
    if let Err(source) = fs::rename(temp, path) {
        let _ = fs::remove_file(temp);
        return Err(AssetError::io(path, source));
    }
    Ok(())
}
