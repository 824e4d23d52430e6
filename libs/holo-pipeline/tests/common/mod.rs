//! Synthetic inputs shared by the pipeline integration tests.

#![allow(dead_code)]

use config::HologramConfig;
use holo_mesh::{DepthField, Mask};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Uniform gray photograph.
pub fn gray_image(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

/// Photograph with a colour gradient, so albedo and hashes see real content.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            96,
        ])
    })
}

/// Square silhouette covering `[lo, hi)` on both axes.
pub fn square_mask(width: u32, height: u32, lo: u32, hi: u32) -> Mask {
    Mask::from_fn(width, height, |x, y| (lo..hi).contains(&x) && (lo..hi).contains(&y))
}

/// Depth rising linearly from 0 on the first row to 1 on the last.
pub fn row_ramp(width: usize, height: usize) -> DepthField {
    let last = (height - 1).max(1) as f32;
    DepthField::from_fn(width, height, |_, row| row as f32 / last).unwrap()
}

/// Radial bump, highest in the centre.
pub fn bump(width: usize, height: usize) -> DepthField {
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let radius = cx.max(cy).max(1.0);
    DepthField::from_fn(width, height, |col, row| {
        let dx = (col as f32 - cx) / radius;
        let dy = (row as f32 - cy) / radius;
        (1.0 - (dx * dx + dy * dy)).max(0.0)
    })
    .unwrap()
}

pub fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "holo-pipeline-{name}-{}-{}",
        std::process::id(),
        SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

/// Default configuration with a small hull grid and bake, writing into `dir`.
pub fn small_config(dir: PathBuf) -> HologramConfig {
    let mut config = HologramConfig::default();
    config.mesh.grid_rows = 16;
    config.mesh.grid_cols = 16;
    config.normal_map.resolution = 32;
    config.export.output_dir = dir;
    config
}
