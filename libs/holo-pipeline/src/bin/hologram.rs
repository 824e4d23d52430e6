//! Builds a hologram from files on disk.
//!
//! ```text
//! hologram run.json
//! ```
//!
//! `run.json`:
//!
//! ```json
//! {
//!   "image": "photo.jpg",
//!   "mask": "mask.png",
//!   "depth": "depth.png",
//!   "strategy": "auto",
//!   "config": { "mesh": { "grid_rows": 128, "grid_cols": 128 } }
//! }
//! ```
//!
//! Prints the JSON response on stdout. Set `RUST_LOG=debug` for progress.

use config::HologramConfig;
use holo_pipeline::input::{decode_depth, decode_mask};
use holo_pipeline::{
    HologramResponse, HologramService, Pipeline, PipelineError, PipelineResult,
    PrecomputedDepth, PrecomputedSegmenter, StrategyRequest,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct RunConfig {
    image: PathBuf,
    mask: PathBuf,
    #[serde(default)]
    depth: Option<PathBuf>,
    #[serde(default)]
    strategy: StrategyRequest,
    #[serde(default)]
    config: HologramConfig,
}

fn main() {
    env_logger::init();

    let response = match run() {
        Ok(response) => response,
        Err(err) => {
            eprintln!("Error: {err}");
            print_response(&HologramResponse::from(&err));
            std::process::exit(1);
        }
    };
    print_response(&response);
}

fn run() -> PipelineResult<HologramResponse> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| PipelineError::invalid_input("usage: hologram <run-config.json>"))?;

    let text = fs::read_to_string(&path).map_err(|source| PipelineError::io(&path, source))?;
    let run: RunConfig = serde_json::from_str(&text).map_err(config::ConfigError::from)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let image = read(base, &run.image)?;
    let mask = decode_mask(&read(base, &run.mask)?, run.config.extrusion.mask_threshold)?;

    let pipeline = Pipeline::new(run.config)?;
    let mut service = HologramService::new(pipeline, PrecomputedSegmenter::new(mask));
    if let Some(depth) = &run.depth {
        let depth = decode_depth(&read(base, depth)?)?;
        service = service.with_depth_estimator(PrecomputedDepth::new(depth));
    }

    let outcome = service.generate(&image, run.strategy)?;
    for diagnostic in outcome.diagnostics() {
        eprintln!("{diagnostic}");
    }
    Ok(HologramResponse::from(&outcome))
}

/// Reads a file named relative to the run config.
fn read(base: &Path, path: &Path) -> PipelineResult<Vec<u8>> {
    let full = base.join(path);
    fs::read(&full).map_err(|source| PipelineError::io(&full, source))
}

fn print_response(response: &HologramResponse) {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("Failed to serialize response: {err}"),
    }
}
