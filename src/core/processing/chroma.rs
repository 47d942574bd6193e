//! Chroma key engine: flat-background to transparency matting.
//!
//! The pass is strictly pixel-local. Every output pixel depends only on the
//! corresponding input pixel and the keying parameters, so the result is
//! deterministic and independent of row partitioning. Rows are processed in
//! parallel with no cross-partition state.
use rayon::prelude::*;
use tracing::debug;

use crate::core::params::KeyingParams;
use crate::error::{Error, Result};
use crate::types::{PixelFormat, SheetImage};

/// Perceptually weighted distance between two RGB colors, normalized to the
/// 0..=255 range of `KeyingParams::tolerance` (black vs. white lands at 255).
///
/// Uses the "redmean" weighting: channel weights shift with the mean red
/// level, tracking perceived difference far better than plain Euclidean RGB
/// without requiring a color-space conversion per pixel.
#[inline]
pub fn key_distance(rgb: [u8; 3], key: [u8; 3]) -> f64 {
    let rbar = (rgb[0] as f64 + key[0] as f64) * 0.5;
    let dr = rgb[0] as f64 - key[0] as f64;
    let dg = rgb[1] as f64 - key[1] as f64;
    let db = rgb[2] as f64 - key[2] as f64;

    let d2 = (2.0 + rbar / 256.0) * dr * dr
        + 4.0 * dg * dg
        + (2.0 + (255.0 - rbar) / 256.0) * db * db;
    d2.sqrt() / 3.0
}

/// Upper edge of the soft-key band for a given tolerance.
#[inline]
fn soft_band_upper(tolerance: u8) -> f64 {
    let lo = tolerance as f64;
    lo + (lo * 0.5).max(1.0)
}

/// Matte value for a color at the given key distance.
///
/// Distances at or below `tolerance` are fully transparent. With edge
/// smoothing, alpha ramps linearly up to the soft band's upper edge; without
/// it, the cut is hard at `tolerance`.
#[inline]
pub fn alpha_for_distance(dist: f64, tolerance: u8, edge_smoothing: bool) -> u8 {
    let lo = tolerance as f64;
    if dist <= lo {
        return 0;
    }
    if !edge_smoothing {
        return 255;
    }
    let hi = soft_band_upper(tolerance);
    if dist >= hi {
        255
    } else {
        (255.0 * (dist - lo) / (hi - lo)).round() as u8
    }
}

/// Index of the key color's dominant channel (first maximum on ties).
#[inline]
fn dominant_channel(key: [u8; 3]) -> usize {
    let mut k = 0;
    if key[1] > key[k] {
        k = 1;
    }
    if key[2] > key[k] {
        k = 2;
    }
    k
}

/// Remove residual key tint from a foreground pixel by clamping the
/// key-dominant channel to the ceiling of the other two.
///
/// The clamped amount equals the excess of the key channel over the rest of
/// the pixel's color, which is the local estimate of spill contribution.
/// Clamping (rather than subtracting a fraction) keeps the operation
/// idempotent: a clamped channel already satisfies the bound.
#[inline]
fn suppress_spill(rgb: [u8; 3], key_channel: usize) -> [u8; 3] {
    let (a, b) = match key_channel {
        0 => (rgb[1], rgb[2]),
        1 => (rgb[0], rgb[2]),
        _ => (rgb[0], rgb[1]),
    };
    let ceiling = a.max(b);
    let mut out = rgb;
    if out[key_channel] > ceiling {
        out[key_channel] = ceiling;
    }
    out
}

/// Apply the chroma key to a sheet, producing an `Rgba8` image of identical
/// dimensions.
///
/// Accepts `Rgb8` (alpha is created) or `Rgba8` (alpha is updated: the keyed
/// matte is combined with the existing alpha by taking the minimum, so a
/// pixel that is already fully transparent never reappears). `Gray8` input
/// fails with `UnsupportedFormat`.
///
/// A "bad" key match is not an error: the worst case is a fully opaque or
/// fully transparent result, which downstream validation flags per cell.
pub fn apply_chroma_key(image: &SheetImage, params: &KeyingParams) -> Result<SheetImage> {
    match image.format {
        PixelFormat::Rgb8 | PixelFormat::Rgba8 => {}
        found => {
            return Err(Error::UnsupportedFormat {
                expected: "Rgb8 or Rgba8",
                found,
            });
        }
    }

    debug!(
        "Chroma key: {}x{} {} key=#{:02x}{:02x}{:02x} tolerance={} smoothing={} spill={}",
        image.width,
        image.height,
        image.format,
        params.key_color[0],
        params.key_color[1],
        params.key_color[2],
        params.tolerance,
        params.edge_smoothing,
        params.spill_correction
    );

    let in_ch = image.channels();
    let in_stride = image.stride();
    let out_stride = image.width * 4;
    let key_channel = dominant_channel(params.key_color);

    let mut out = vec![0u8; image.width * image.height * 4];
    out.par_chunks_mut(out_stride)
        .zip(image.data.par_chunks(in_stride))
        .for_each(|(dst_row, src_row)| {
            for (dst, src) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(in_ch)) {
                let rgb = [src[0], src[1], src[2]];
                let existing_alpha = if in_ch == 4 { src[3] } else { 255 };

                let dist = key_distance(rgb, params.key_color);
                let matte =
                    alpha_for_distance(dist, params.tolerance, params.edge_smoothing);
                let alpha = matte.min(existing_alpha);

                // Spill suppression only touches pixels that keep coverage.
                // Fully transparent pixels are background and stay untouched,
                // which keeps re-keying from resurrecting them.
                let rgb = if params.spill_correction
                    && alpha > 0
                    && (alpha < 255 || dist < 2.0 * soft_band_upper(params.tolerance))
                {
                    suppress_spill(rgb, key_channel)
                } else {
                    rgb
                };

                dst[0] = rgb[0];
                dst[1] = rgb[1];
                dst[2] = rgb[2];
                dst[3] = alpha;
            }
        });

    SheetImage::new(image.width, image.height, PixelFormat::Rgba8, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_zero_on_exact_key() {
        assert_eq!(key_distance([0, 255, 0], [0, 255, 0]), 0.0);
    }

    #[test]
    fn distance_normalization_puts_black_white_at_255() {
        let d = key_distance([0, 0, 0], [255, 255, 255]);
        assert!((d - 255.0).abs() < 1.0, "black/white distance {}", d);
    }

    #[test]
    fn hard_cut_without_smoothing() {
        assert_eq!(alpha_for_distance(96.0, 96, false), 0);
        assert_eq!(alpha_for_distance(96.1, 96, false), 255);
    }

    #[test]
    fn soft_band_interpolates() {
        let mid = 96.0 + 24.0; // halfway through the 48-wide band
        let a = alpha_for_distance(mid, 96, true);
        assert!(a > 100 && a < 155, "expected mid-band alpha, got {}", a);
        assert_eq!(alpha_for_distance(96.0, 96, true), 0);
        assert_eq!(alpha_for_distance(200.0, 96, true), 255);
    }

    #[test]
    fn spill_clamp_is_idempotent() {
        let once = suppress_spill([120, 200, 90], 1);
        let twice = suppress_spill(once, 1);
        assert_eq!(once, twice);
        assert_eq!(once, [120, 120, 90]);
    }
}
