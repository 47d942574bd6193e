mod common;

use std::fs;
use std::path::Path;

use common::synthetic_sheet::{pose_sheet, poses};
use stickercut::{
    GridLayout, OutputFormat, SheetParams, SheetSidecar, load_poses, load_sheet,
    process_directory_to_dir, process_sheet_to_dir,
};

fn write_sheet_png(path: &Path, width: usize, height: usize) {
    let sheet = pose_sheet(width, height, GridLayout::new(3, 3), &[]);
    let img =
        image::RgbImage::from_raw(width as u32, height as u32, sheet.data.clone()).unwrap();
    img.save(path).unwrap();
}

#[test]
fn sheet_file_becomes_sticker_files_plus_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sheet.png");
    write_sheet_png(&input, 300, 300);
    let out_dir = dir.path().join("out");

    let params = SheetParams::default();
    let report = process_sheet_to_dir(&input, &poses(9), &out_dir, &params).unwrap();

    assert_eq!(report.sticker_files.len(), 9);
    for (i, file) in report.sticker_files.iter().enumerate() {
        assert!(file.exists(), "missing {:?}", file);
        assert_eq!(
            file.file_name().unwrap().to_string_lossy(),
            format!("sticker_{:02}.png", i)
        );
    }
    assert!(report.sheet_file.exists());
    assert!(report.metadata_file.exists());
    assert!(report.processing.keying_applied);

    // Stickers re-load as RGBA with a keyed-out background
    let sticker = load_sheet(&report.sticker_files[0]).unwrap();
    assert!(sticker.has_alpha());
    assert_eq!(sticker.pixel(0, 0)[3], 0);

    // Sidecar round-trips and describes every sticker
    let sidecar: SheetSidecar =
        serde_json::from_str(&fs::read_to_string(&report.metadata_file).unwrap()).unwrap();
    assert_eq!(sidecar.stickers.len(), 9);
    assert_eq!(sidecar.layout, GridLayout::new(3, 3));
    assert_eq!(sidecar.sheet_file, "sheet.png");
    assert_eq!(sidecar.stickers[0].pose, "pose 0");
    assert!(sidecar.stickers[0].is_original);
    assert_eq!(sidecar.software_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn jpeg_output_flattens_the_stickers() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sheet.png");
    write_sheet_png(&input, 300, 300);
    let out_dir = dir.path().join("out");

    let params = SheetParams {
        cut: stickercut::CutParams {
            output_format: OutputFormat::JPEG,
            ..Default::default()
        },
        ..Default::default()
    };
    let report = process_sheet_to_dir(&input, &poses(9), &out_dir, &params).unwrap();

    for file in &report.sticker_files {
        assert_eq!(file.extension().unwrap(), "jpg");
        let sticker = load_sheet(file).unwrap();
        assert!(!sticker.has_alpha(), "JPEG stickers are opaque");
    }
    // The processed sheet itself keeps its alpha as PNG
    assert!(load_sheet(&report.sheet_file).unwrap().has_alpha());
}

#[test]
fn batch_processes_every_sheet_and_skips_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("sheets");
    fs::create_dir_all(&input_dir).unwrap();
    write_sheet_png(&input_dir.join("a.png"), 150, 150);
    write_sheet_png(&input_dir.join("b.png"), 300, 300);
    fs::write(input_dir.join("notes.txt"), "not a sheet").unwrap();
    let out_dir = dir.path().join("out");

    let params = SheetParams::default();
    let report =
        process_directory_to_dir(&input_dir, &out_dir, &poses(9), &params, true).unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors, 0);
    assert!(out_dir.join("a").join("sticker_08.png").exists());
    assert!(out_dir.join("b").join("metadata.json").exists());
}

#[test]
fn pose_lists_load_from_both_json_shapes() {
    let dir = tempfile::tempdir().unwrap();

    let plain = dir.path().join("plain.json");
    fs::write(&plain, r#"["standing", "waving", "jumping"]"#).unwrap();
    let loaded = load_poses(&plain).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0].text, "standing");
    assert!(loaded[0].is_original);
    assert!(!loaded[2].is_original);
    assert_eq!(loaded[2].index, 2);

    let typed = dir.path().join("typed.json");
    fs::write(
        &typed,
        r#"[
            {"index": 0, "text": "standing", "is_original": true},
            {"index": 1, "text": "waving"}
        ]"#,
    )
    .unwrap();
    let loaded = load_poses(&typed).unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(!loaded[1].is_original, "is_original defaults to false");

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{not json").unwrap();
    assert!(load_poses(&broken).is_err());
}
