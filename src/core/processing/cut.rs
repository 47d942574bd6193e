//! Sheet cutter: per-cell sub-image extraction.
//!
//! Cells are independent after grid resolution, so extraction runs across
//! the rayon pool; results are collected in cell-index order regardless of
//! completion order.
use rayon::prelude::*;
use tracing::debug;

use crate::core::params::CutParams;
use crate::core::processing::resize::resize_to_long_side;
use crate::error::{Error, Result};
use crate::types::{CellBounds, PoseDescriptor, QualityFlag, SheetImage, StickerResult};

/// Copy the rectangular region at `cell` out of the sheet.
///
/// Fails with `BoundsOutOfRange` when the rectangle exceeds the sheet extent.
/// That is a configuration or staleness error, never a transient fault; the
/// pipeline converts it into the one-shot raw-grid fallback.
pub fn extract_cell(sheet: &SheetImage, cell: &CellBounds) -> Result<SheetImage> {
    if cell.width == 0 || cell.height == 0 || !cell.fits_within(sheet.width, sheet.height) {
        return Err(Error::BoundsOutOfRange {
            index: cell.index,
            x: cell.x,
            y: cell.y,
            width: cell.width,
            height: cell.height,
            image_width: sheet.width,
            image_height: sheet.height,
        });
    }

    let ch = sheet.channels();
    let src_stride = sheet.stride();
    let dst_stride = cell.width * ch;

    let mut data = vec![0u8; cell.width * cell.height * ch];
    // Copy per row using slice copies to minimize per-pixel indexing
    for row in 0..cell.height {
        let src_offset = (cell.y + row) * src_stride + cell.x * ch;
        let dst_offset = row * dst_stride;
        data[dst_offset..dst_offset + dst_stride]
            .copy_from_slice(&sheet.data[src_offset..src_offset + dst_stride]);
    }

    SheetImage::new(cell.width, cell.height, sheet.format, data)
}

/// Cut one sticker per cell, attaching its pose metadata.
///
/// `bounds` and `poses` are pre-validated by the pipeline to be the same
/// length with matching row-major indices. When `transparent_background` is
/// requested but the sheet carries no alpha channel (keying was skipped),
/// the cell is emitted opaque and flagged `no-alpha`. The optional target
/// size resizes each sticker's long side after extraction.
pub fn cut_cells(
    sheet: &SheetImage,
    bounds: &[CellBounds],
    poses: &[PoseDescriptor],
    cut: &CutParams,
) -> Result<Vec<StickerResult>> {
    debug_assert_eq!(bounds.len(), poses.len());

    debug!(
        "Cutting {} cells from {}x{} {} sheet",
        bounds.len(),
        sheet.width,
        sheet.height,
        sheet.format
    );

    bounds
        .par_iter()
        .zip(poses.par_iter())
        .map(|(cell, pose)| {
            let image = extract_cell(sheet, cell)?;
            let image = match cut.size {
                Some(size) => resize_to_long_side(&image, size)?,
                None => image,
            };

            let mut flags = Vec::new();
            if cut.transparent_background && !image.has_alpha() {
                flags.push(QualityFlag::NoAlpha);
            }

            Ok(StickerResult {
                index: cell.index,
                image,
                bounds: *cell,
                pose_text: pose.text.clone(),
                is_original: pose.is_original,
                flags,
            })
        })
        .collect()
}
