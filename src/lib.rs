#![doc = r#"
STICKERCUT — a pose-sheet to sticker image processing toolkit.

This crate provides a typed, ergonomic API for turning generated character
pose sheets (a grid of poses over a flat-color background) into individual
transparent-background stickers: chroma-key matting with spill correction,
geometry-aware grid cutting with fallback recovery, optional resizing, and
per-cell quality validation. It powers the STICKERCUT CLI and can be embedded
in your own Rust applications.

Stability
---------
The public library API is experimental in initial releases. It is robust but
may evolve as the crate stabilizes. Breaking changes can occur.

Scope
-----
The pipeline is a pure, synchronous computation over a decoded sheet bitmap
and an ordered pose list. Generating the pose variants (an LLM call) and the
sheet image itself (an image-generation model) are upstream collaborators;
uploading the stickers anywhere is a downstream one. None of that I/O lives
here.

Add dependency
--------------
```toml
[dependencies]
stickercut = "0.1"
```

Quick start: process a sheet file to a sticker directory
--------------------------------------------------------
```rust,no_run
use std::path::Path;
use stickercut::{
    process_sheet_to_dir,
    CutParams, GridLayout, KeyingMode, KeyingParams, OutputFormat, PoseDescriptor, SheetParams,
};

fn main() -> stickercut::Result<()> {
    let poses: Vec<PoseDescriptor> = ["waving", "jumping", "thinking"]
        .iter()
        .enumerate()
        .map(|(i, text)| PoseDescriptor::new(i, *text, i == 0))
        .collect();

    let params = SheetParams {
        layout: GridLayout::new(1, 3),
        keying: KeyingMode::Enabled(KeyingParams::default()),
        cut: CutParams {
            padding: 20,
            output_format: OutputFormat::PNG,
            transparent_background: true,
            size: Some(512),
        },
    };

    let report = process_sheet_to_dir(
        Path::new("/data/sheet.png"),
        &poses,
        Path::new("/out/stickers"),
        &params,
    )?;

    println!("wrote {} stickers", report.sticker_files.len());
    Ok(())
}
```

Process in memory to `PipelineOutput`
-------------------------------------
```rust
use stickercut::{
    process_sheet,
    PoseDescriptor, SheetImage, SheetParams,
};

fn run(sheet: SheetImage, poses: &[PoseDescriptor]) -> stickercut::Result<()> {
    let output = process_sheet(sheet, poses, &SheetParams::default())?;

    for sticker in &output.stickers {
        // Use each sticker's buffer, pose text, and quality flags
        let _ = (&sticker.image, &sticker.pose_text, &sticker.flags);
    }
    assert!(output.report.keying_applied);
    Ok(())
}
```

Low-level passes (when you already have buffers)
------------------------------------------------
```rust
use stickercut::core::processing::chroma::apply_chroma_key;
use stickercut::core::processing::grid::resolve_cell_bounds;
use stickercut::{GridLayout, KeyingParams, SheetImage};

fn key_and_measure(sheet: &SheetImage) -> stickercut::Result<()> {
    let keyed = apply_chroma_key(sheet, &KeyingParams::default())?;
    let bounds = resolve_cell_bounds(keyed.width, keyed.height, GridLayout::default(), 20)?;
    assert_eq!(bounds.len(), 9);
    Ok(())
}
```

Error handling
--------------
All public functions return `stickercut::Result<T>`; match on
`stickercut::Error` to handle specific cases. `InvalidLayout` is a caller
configuration error and is never retried; a `BoundsOutOfRange` from cutting
is absorbed by the pipeline's one-shot raw-grid fallback and only surfaces
when the fallback fails too.

```rust,no_run
use std::path::Path;
use stickercut::{process_sheet_to_dir, Error, SheetParams};

fn main() {
    let params = SheetParams::default();
    match process_sheet_to_dir(Path::new("/bad/sheet.png"), &[], Path::new("/out"), &params) {
        Ok(_) => {}
        Err(Error::InvalidLayout { rows, cols, reason }) => {
            eprintln!("bad request ({rows}x{cols}): {reason}")
        }
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`types`] — core types (e.g. `SheetImage`, `GridLayout`, `StickerResult`).
- [`core`] — the processing passes (`chroma`, `grid`, `cut`, `resize`,
  `validate`) and the `pipeline` orchestrator.
- [`io`] — sheet loading and sticker/sidecar writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use core::params::{CutParams, KeyingMode, KeyingParams, SheetParams};
pub use core::processing::pipeline::{PipelineOutput, PipelineReport};
pub use error::{Error, Result};
pub use types::{
    CellBounds, GridLayout, OutputFormat, PixelFormat, PoseDescriptor, QualityFlag, SheetImage,
    StickerResult,
};

// Pipeline entry points
pub use core::processing::pipeline::{run_pipeline, run_pipeline_with_bounds};

// Selected I/O helpers (keep low-level writers public)
pub use io::loader::{load_sheet, sheet_from_dynamic};
pub use io::writers::metadata::{SheetSidecar, StickerEntry, build_sheet_sidecar};

// High-level API re-exports
pub use api::{
    BatchReport, SheetReport, load_poses, process_directory_to_dir, process_sheet,
    process_sheet_to_dir,
};
