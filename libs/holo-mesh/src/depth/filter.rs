//! Edge-preserving smoothing for depth fields.

use super::DepthField;
use crate::error::{MeshError, MeshResult};
use config::BilateralConfig;
use rayon::prelude::*;

/// Bilateral filter over a circular window of `params.diameter` pixels.
///
/// Each output sample is a weighted mean of its neighbours, with weights
/// `exp(−d²/2σs²) · exp(−Δ²/2σc²)` where `d` is the spatial distance and
/// `Δ` the depth difference. Large depth steps (silhouette edges) keep their
/// sharpness while flat regions are smoothed. Neighbours outside the field
/// are clamped to the border.
pub fn bilateral(field: &DepthField, params: &BilateralConfig) -> MeshResult<DepthField> {
    if params.diameter == 0 {
        return Err(MeshError::invalid_depth("bilateral diameter must be positive"));
    }
    if !(params.sigma_color > 0.0 && params.sigma_space > 0.0) {
        return Err(MeshError::invalid_depth(format!(
            "bilateral sigmas must be positive, got color={} space={}",
            params.sigma_color, params.sigma_space
        )));
    }

    let radius = (params.diameter / 2) as isize;
    let space_coeff = -0.5 / (params.sigma_space * params.sigma_space);
    let color_coeff = -0.5 / (params.sigma_color * params.sigma_color);

    let mut kernel = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let dist2 = (dx * dx + dy * dy) as f64;
            if dist2 <= (radius * radius) as f64 {
                kernel.push((dx, dy, (dist2 * space_coeff).exp()));
            }
        }
    }

    let width = field.width();
    let mut data = vec![0.0f32; width * field.height()];
    data.par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| {
            for (col, out) in out_row.iter_mut().enumerate() {
                let center = f64::from(field.get(col, row));
                let mut sum = 0.0;
                let mut weight_sum = 0.0;
                for &(dx, dy, spatial) in &kernel {
                    let sample = f64::from(field.get_clamped(col as isize + dx, row as isize + dy));
                    let diff = sample - center;
                    let weight = spatial * (diff * diff * color_coeff).exp();
                    sum += weight * sample;
                    weight_sum += weight;
                }
                *out = (sum / weight_sum) as f32;
            }
        });

    DepthField::new(width, field.height(), data)
}
