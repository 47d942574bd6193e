//! Pipeline orchestrator: keying decision, grid resolution, cutting with
//! one-shot fallback, and validation.
//!
//! The pipeline is a pure, synchronous computation over its inputs. It either
//! returns every cell or fails outright; there is no partial success.
use tracing::{info, warn};

use crate::core::params::{CutParams, KeyingMode};
use crate::core::processing::chroma::apply_chroma_key;
use crate::core::processing::cut::cut_cells;
use crate::core::processing::grid::{
    raw_cell_bounds, resolve_cell_bounds, validate_poses,
};
use crate::core::processing::validate::flag_suspect_cells;
use crate::error::{Error, Result};
use crate::types::{CellBounds, GridLayout, PoseDescriptor, SheetImage, StickerResult};

/// Processing metadata attached to a pipeline run.
#[derive(Clone, PartialEq, Eq, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PipelineReport {
    pub keying_applied: bool,
    pub fallback_used: bool,
    /// Indices of cells flagged `suspect` by validation.
    pub suspect_cells: Vec<usize>,
}

/// Everything a pipeline run produces: the post-keying sheet, the
/// index-ordered stickers, and the processing report.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PipelineOutput {
    pub sheet: SheetImage,
    pub stickers: Vec<StickerResult>,
    pub report: PipelineReport,
}

/// Run the full pipeline: optional chroma key pass, grid resolution,
/// cutting, and validation.
///
/// `keying` is the capability of the upstream image provider, resolved by
/// the caller; the pipeline never inspects pixels to decide. `InvalidLayout`
/// is fatal immediately (caller configuration error, no retry).
pub fn run_pipeline(
    sheet: SheetImage,
    poses: &[PoseDescriptor],
    layout: GridLayout,
    keying: &KeyingMode,
    cut: &CutParams,
) -> Result<PipelineOutput> {
    validate_poses(layout, poses)?;

    // Keying never changes dimensions, so geometry is resolved up front and
    // an invalid layout is rejected before any pixel is touched.
    let bounds = resolve_cell_bounds(sheet.width, sheet.height, layout, cut.padding)?;

    let (sheet, keying_applied) = match keying {
        KeyingMode::Enabled(params) => {
            info!(
                "Keying {}x{} sheet (tolerance={})",
                sheet.width, sheet.height, params.tolerance
            );
            (apply_chroma_key(&sheet, params)?, true)
        }
        KeyingMode::Disabled => {
            info!("Keying skipped: provider does not emit flat backgrounds");
            (sheet, false)
        }
    };

    cut_and_validate(sheet, poses, layout, cut, &bounds, keying_applied)
}

/// Like [`run_pipeline`], but cutting at caller-supplied bounds (cached or
/// externally computed geometry). Bounds that no longer fit the sheet fall
/// back to the raw zero-padding grid of `layout`, once.
pub fn run_pipeline_with_bounds(
    sheet: SheetImage,
    poses: &[PoseDescriptor],
    layout: GridLayout,
    keying: &KeyingMode,
    cut: &CutParams,
    bounds: &[CellBounds],
) -> Result<PipelineOutput> {
    validate_poses(layout, poses)?;
    if bounds.len() != poses.len() {
        return Err(Error::InvalidLayout {
            rows: layout.rows,
            cols: layout.cols,
            reason: format!(
                "bounds count {} does not match {} poses",
                bounds.len(),
                poses.len()
            ),
        });
    }

    let (sheet, keying_applied) = match keying {
        KeyingMode::Enabled(params) => (apply_chroma_key(&sheet, params)?, true),
        KeyingMode::Disabled => (sheet, false),
    };

    cut_and_validate(sheet, poses, layout, cut, bounds, keying_applied)
}

fn cut_and_validate(
    sheet: SheetImage,
    poses: &[PoseDescriptor],
    layout: GridLayout,
    cut: &CutParams,
    bounds: &[CellBounds],
    keying_applied: bool,
) -> Result<PipelineOutput> {
    // One-shot fallback, not a retry loop: a second geometry failure is fatal.
    let (mut stickers, fallback_used) = match cut_cells(&sheet, bounds, poses, cut) {
        Ok(stickers) => (stickers, false),
        Err(Error::BoundsOutOfRange { index, .. }) => {
            warn!(
                "Cell {} exceeded the {}x{} sheet; retrying once with the raw {} grid",
                index, sheet.width, sheet.height, layout
            );
            let raw = raw_cell_bounds(sheet.width, sheet.height, layout);
            (cut_cells(&sheet, &raw, poses, cut)?, true)
        }
        Err(e) => return Err(e),
    };

    let suspect_cells = flag_suspect_cells(&mut stickers);
    if !suspect_cells.is_empty() {
        info!("{} of {} cells flagged suspect", suspect_cells.len(), stickers.len());
    }

    Ok(PipelineOutput {
        sheet,
        stickers,
        report: PipelineReport {
            keying_applied,
            fallback_used,
            suspect_cells,
        },
    })
}
