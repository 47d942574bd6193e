//! JSON metadata sidecar for a processed sticker set.
//!
//! Written next to the sticker files so the delivery layer (storage upload,
//! URL issuance) can describe the set without re-opening any image.
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::processing::pipeline::{PipelineOutput, PipelineReport};
use crate::error::Result;
use crate::types::{CellBounds, GridLayout, QualityFlag};

/// One sticker's entry in the sidecar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickerEntry {
    pub index: usize,
    pub file: String,
    pub pose: String,
    pub is_original: bool,
    pub flags: Vec<QualityFlag>,
    /// Cut rectangle in post-keying sheet coordinates.
    pub bounds: CellBounds,
    /// Final sticker dimensions (after any resize).
    pub width: usize,
    pub height: usize,
}

/// Sidecar document describing one processed sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSidecar {
    pub generated_at: DateTime<Utc>,
    pub software_version: String,
    pub sheet_file: String,
    pub sheet_width: usize,
    pub sheet_height: usize,
    pub layout: GridLayout,
    pub processing: PipelineReport,
    pub stickers: Vec<StickerEntry>,
}

/// Build the sidecar document for a pipeline run.
pub fn build_sheet_sidecar(
    output: &PipelineOutput,
    layout: GridLayout,
    sheet_file: &Path,
    sticker_files: &[PathBuf],
) -> SheetSidecar {
    let stickers = output
        .stickers
        .iter()
        .zip(sticker_files)
        .map(|(sticker, file)| StickerEntry {
            index: sticker.index,
            file: file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            pose: sticker.pose_text.clone(),
            is_original: sticker.is_original,
            flags: sticker.flags.clone(),
            bounds: sticker.bounds,
            width: sticker.image.width,
            height: sticker.image.height,
        })
        .collect();

    SheetSidecar {
        generated_at: Utc::now(),
        software_version: env!("CARGO_PKG_VERSION").to_string(),
        sheet_file: sheet_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        sheet_width: output.sheet.width,
        sheet_height: output.sheet.height,
        layout,
        processing: output.report.clone(),
        stickers,
    }
}

/// Write the sidecar as pretty-printed JSON, returning its path.
pub fn create_sheet_metadata_sidecar(
    out_dir: &Path,
    output: &PipelineOutput,
    layout: GridLayout,
    sheet_file: &Path,
    sticker_files: &[PathBuf],
) -> Result<PathBuf> {
    let sidecar = build_sheet_sidecar(output, layout, sheet_file, sticker_files);
    let sidecar_path = out_dir.join("metadata.json");
    let json_string = serde_json::to_string_pretty(&sidecar).map_err(crate::error::Error::external)?;
    std::fs::write(&sidecar_path, json_string)?;
    info!("Created sticker set metadata sidecar: {:?}", sidecar_path);
    Ok(sidecar_path)
}
