//! Tangent-space normal maps from depth gradients.

use crate::error::{AssetError, AssetResult};
use config::constants::NORMAL_MAP_DEPTH_UNITS;
use config::{DepthConvention, NormalMapConfig};
use glam::DVec3;
use holo_mesh::DepthField;
use image::RgbImage;
use rayon::prelude::*;

/// Bakes a normal map at `config.resolution²` from a raw depth field.
///
/// The depth is resampled to the bake size, normalized, adjusted for the
/// estimator's convention and expressed in 8-bit depth units. Per pixel:
///
/// ```text
/// n = normalize(−∂z/∂x · k, −∂z/∂y · k, 1)
/// rgb = (n + 1) / 2 · 255
/// ```
///
/// Derivatives are central differences inside the field and one-sided at the
/// border. `y` runs down the image rows, so green is Y-down (DirectX style)
/// unless `config.green_up` flips it for glTF viewers. A flat field carries no
/// relief and is reported as [`AssetError::FlatDepth`].
pub fn bake_normal_map(
    depth: &DepthField,
    config: &NormalMapConfig,
    convention: DepthConvention,
) -> AssetResult<RgbImage> {
    let size = config.resolution as usize;
    let sampled = depth.resampled(size, size)?;
    if sampled.is_constant() {
        return Err(AssetError::flat_depth(format!(
            "depth is constant at {}x{}",
            size, size
        )));
    }

    let heights: Vec<f64> = sampled
        .normalized()
        .with_convention(convention)
        .data()
        .iter()
        .map(|&v| f64::from(v) * NORMAL_MAP_DEPTH_UNITS)
        .collect();

    let strength = config.strength;
    let green_sign = if config.green_up { -1.0 } else { 1.0 };
    let mut out = RgbImage::new(config.resolution, config.resolution);
    out.par_chunks_mut(3 * size)
        .enumerate()
        .for_each(|(row, out_row)| {
            for (col, pixel) in out_row.chunks_mut(3).enumerate() {
                let dx = derivative(|c| heights[row * size + c], col, size);
                let dy = derivative(|r| heights[r * size + col], row, size);
                let normal =
                    DVec3::new(-dx * strength, -dy * strength * green_sign, 1.0).normalize();
                for (channel, component) in pixel.iter_mut().zip(normal.to_array()) {
                    *channel = ((component + 1.0) / 2.0 * 255.0).clamp(0.0, 255.0) as u8;
                }
            }
        });

    Ok(out)
}

/// First derivative along one axis at `i` of `len` samples.
#[inline]
fn derivative(sample: impl Fn(usize) -> f64, i: usize, len: usize) -> f64 {
    if len < 2 {
        0.0
    } else if i == 0 {
        sample(1) - sample(0)
    } else if i == len - 1 {
        sample(i) - sample(i - 1)
    } else {
        (sample(i + 1) - sample(i - 1)) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgb;

    fn config(resolution: u32) -> NormalMapConfig {
        NormalMapConfig {
            resolution,
            ..NormalMapConfig::default()
        }
    }

    #[test]
    fn test_flat_depth_is_rejected() {
        let depth = DepthField::constant(8, 8, 0.4).unwrap();
        let err = bake_normal_map(&depth, &config(16), DepthConvention::Inverted).unwrap_err();
        assert!(matches!(err, AssetError::FlatDepth { .. }));
    }

    #[test]
    fn test_output_size_follows_resolution() {
        let depth = DepthField::from_fn(10, 6, |col, _| col as f32).unwrap();
        let map = bake_normal_map(&depth, &config(32), DepthConvention::Direct).unwrap();
        assert_eq!(map.dimensions(), (32, 32));
    }

    #[test]
    fn test_horizontal_ramp_tilts_red_channel() {
        // Depth rising to the right: dz/dx > 0, so the normal leans to −x.
        let depth = DepthField::from_fn(16, 16, |col, _| col as f32).unwrap();
        let map = bake_normal_map(&depth, &config(16), DepthConvention::Direct).unwrap();
        let Rgb([r, g, b]) = *map.get_pixel(8, 8);
        assert!(r < 127);
        assert_eq!(g, 127);
        assert!(b > 127);
    }

    #[test]
    fn test_inverted_convention_mirrors_tilt() {
        let depth = DepthField::from_fn(16, 16, |col, _| col as f32).unwrap();
        let direct = bake_normal_map(&depth, &config(16), DepthConvention::Direct).unwrap();
        let inverted = bake_normal_map(&depth, &config(16), DepthConvention::Inverted).unwrap();
        assert!(direct.get_pixel(8, 8).0[0] < 127);
        assert!(inverted.get_pixel(8, 8).0[0] > 127);
    }

    #[test]
    fn test_vertical_ramp_tilts_green_channel() {
        let depth = DepthField::from_fn(16, 16, |_, row| row as f32).unwrap();
        let map = bake_normal_map(&depth, &config(16), DepthConvention::Direct).unwrap();
        let Rgb([r, g, _]) = *map.get_pixel(4, 4);
        assert_eq!(r, 127);
        assert!(g < 127);
    }

    #[test]
    fn test_green_up_flips_only_green() {
        let depth = DepthField::from_fn(16, 16, |col, row| (col + row) as f32).unwrap();
        let down = bake_normal_map(&depth, &config(16), DepthConvention::Direct).unwrap();
        let up_config = NormalMapConfig {
            green_up: true,
            ..config(16)
        };
        let up = bake_normal_map(&depth, &up_config, DepthConvention::Direct).unwrap();

        let Rgb([r_down, g_down, b_down]) = *down.get_pixel(8, 8);
        let Rgb([r_up, g_up, b_up]) = *up.get_pixel(8, 8);
        assert_eq!(r_up, r_down);
        assert_eq!(b_up, b_down);
        assert!(g_down < 127);
        assert!(g_up > 127);
    }

    #[test]
    fn test_derivative_borders_are_one_sided() {
        let values = [0.0, 1.0, 4.0];
        assert_relative_eq!(derivative(|i| values[i], 0, 3), 1.0);
        assert_relative_eq!(derivative(|i| values[i], 1, 3), 2.0);
        assert_relative_eq!(derivative(|i| values[i], 2, 3), 3.0);
        assert_relative_eq!(derivative(|i| values[i], 0, 1), 0.0);
    }
}
