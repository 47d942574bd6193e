//! High-level, ergonomic library API: process sheets in memory or to sticker
//! files on disk, batch helpers for directories, and pose list loading.
//! Prefer these entrypoints over the low-level processing modules when
//! integrating STICKERCUT.
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::core::params::SheetParams;
use crate::core::processing::pipeline::{PipelineOutput, PipelineReport, run_pipeline};
use crate::error::{Error, Result};
use crate::io::loader::load_sheet;
use crate::io::writers::jpeg::write_sticker_jpeg;
use crate::io::writers::metadata::create_sheet_metadata_sidecar;
use crate::io::writers::png::write_png;
use crate::types::{OutputFormat, PoseDescriptor, SheetImage};

/// Result of processing one sheet file to a directory.
#[derive(Debug, Clone)]
pub struct SheetReport {
    pub out_dir: PathBuf,
    /// The post-keying sheet, always written as PNG.
    pub sheet_file: PathBuf,
    /// One file per cell, index-ordered.
    pub sticker_files: Vec<PathBuf>,
    pub metadata_file: PathBuf,
    pub processing: PipelineReport,
}

/// Summary of a batch run over a directory of sheets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Process an in-memory sheet to in-memory stickers (no disk I/O).
pub fn process_sheet(
    sheet: SheetImage,
    poses: &[PoseDescriptor],
    params: &SheetParams,
) -> Result<PipelineOutput> {
    run_pipeline(sheet, poses, params.layout, &params.keying, &params.cut)
}

/// Process a sheet image file into a directory of sticker files, the
/// processed sheet, and a JSON metadata sidecar.
pub fn process_sheet_to_dir(
    input: &Path,
    poses: &[PoseDescriptor],
    out_dir: &Path,
    params: &SheetParams,
) -> Result<SheetReport> {
    let sheet = load_sheet(input)?;
    let output = process_sheet(sheet, poses, params)?;

    fs::create_dir_all(out_dir)?;

    let ext = params.cut.output_format.extension();
    let mut sticker_files = Vec::with_capacity(output.stickers.len());
    for sticker in &output.stickers {
        let path = out_dir.join(format!("sticker_{:02}.{}", sticker.index, ext));
        match params.cut.output_format {
            OutputFormat::PNG => write_png(&path, &sticker.image)?,
            OutputFormat::JPEG => write_sticker_jpeg(&path, &sticker.image)?,
        }
        sticker_files.push(path);
    }

    // The processed sheet keeps its alpha, so it is always PNG
    let sheet_file = out_dir.join("sheet.png");
    write_png(&sheet_file, &output.sheet)?;

    let metadata_file = create_sheet_metadata_sidecar(
        out_dir,
        &output,
        params.layout,
        &sheet_file,
        &sticker_files,
    )?;

    info!(
        "Processed {:?}: {} stickers written to {:?}",
        input,
        sticker_files.len(),
        out_dir
    );

    Ok(SheetReport {
        out_dir: out_dir.to_path_buf(),
        sheet_file,
        sticker_files,
        metadata_file,
        processing: output.report,
    })
}

fn is_sheet_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("png") | Some("jpg") | Some("jpeg")
    )
}

/// Process every sheet image in a directory, one output subdirectory per
/// sheet, applying the same pose list to each.
pub fn process_directory_to_dir(
    input_dir: &Path,
    output_dir: &Path,
    poses: &[PoseDescriptor],
    params: &SheetParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir)?;

    let mut report = BatchReport::default();
    let mut entries: Vec<PathBuf> = fs::read_dir(input_dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();
    entries.sort();

    for path in entries {
        if !path.is_file() || !is_sheet_file(&path) {
            info!("Skipping non-sheet entry: {:?}", path);
            report.skipped += 1;
            continue;
        }

        let stem = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sheet".to_string());
        let out_dir = output_dir.join(&stem);

        match process_sheet_to_dir(&path, poses, &out_dir, params) {
            Ok(_) => report.processed += 1,
            Err(e) if continue_on_error => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Batch complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

/// Pose list file shapes accepted by `load_poses`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PoseFile {
    Descriptors(Vec<PoseDescriptor>),
    Texts(Vec<String>),
}

/// Load a pose list from JSON: either an array of descriptor objects or a
/// plain array of strings in row-major cell order (the first entry is the
/// original pose, the rest are variants).
pub fn load_poses(path: &Path) -> Result<Vec<PoseDescriptor>> {
    let raw = fs::read_to_string(path)?;
    let file: PoseFile = serde_json::from_str(&raw).map_err(Error::external)?;
    let poses = match file {
        PoseFile::Descriptors(poses) => poses,
        PoseFile::Texts(texts) => texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| PoseDescriptor::new(index, text, index == 0))
            .collect(),
    };
    Ok(poses)
}
