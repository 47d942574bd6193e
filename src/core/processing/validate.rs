//! Per-cell quality validation.
//!
//! A cell that is almost entirely one color is either empty or had its
//! subject removed by an over-eager key match. Validation never fails the
//! pipeline; it only annotates metadata for the caller to act on.
use std::collections::HashMap;

use tracing::debug;

use crate::types::{QualityFlag, SheetImage, StickerResult};

/// Fraction of pixels that must share one quantized color bucket for a cell
/// to be flagged suspect.
pub const SUSPECT_UNIFORM_FRACTION: f64 = 0.98;

/// Bucket key for a pixel: 4 bits per channel, with all fully transparent
/// pixels pooled into a single bucket regardless of their RGB. Quantizing
/// absorbs codec and anti-aliasing noise that exact color counting misses.
#[inline]
fn bucket(px: &[u8], has_alpha: bool) -> u16 {
    const TRANSPARENT: u16 = 0x1000;
    if has_alpha && px[3] == 0 {
        return TRANSPARENT;
    }
    match px.len() {
        1 => (px[0] >> 4) as u16,
        _ => (((px[0] >> 4) as u16) << 8) | (((px[1] >> 4) as u16) << 4) | ((px[2] >> 4) as u16),
    }
}

/// Fraction of the image's pixels falling in its most common color bucket.
pub fn dominant_color_fraction(image: &SheetImage) -> f64 {
    let ch = image.channels();
    let has_alpha = image.has_alpha();

    let mut counts: HashMap<u16, u32> = HashMap::new();
    for px in image.data.chunks_exact(ch) {
        *counts.entry(bucket(px, has_alpha)).or_insert(0) += 1;
    }

    let total = (image.width * image.height) as f64;
    let dominant = counts.values().copied().max().unwrap_or(0) as f64;
    dominant / total
}

/// Flag near-uniform cells as `suspect`, returning the flagged indices.
pub fn flag_suspect_cells(stickers: &mut [StickerResult]) -> Vec<usize> {
    let mut flagged = Vec::new();
    for sticker in stickers.iter_mut() {
        let fraction = dominant_color_fraction(&sticker.image);
        if fraction >= SUSPECT_UNIFORM_FRACTION {
            debug!(
                "Cell {}: {:.1}% uniform, flagging suspect",
                sticker.index,
                fraction * 100.0
            );
            sticker.flags.push(QualityFlag::Suspect);
            flagged.push(sticker.index);
        }
    }
    flagged
}
