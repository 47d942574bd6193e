//! Shared types used across STICKERCUT.
//! Includes the `SheetImage` pixel buffer model, `PixelFormat`, grid geometry
//! types (`GridLayout`, `CellBounds`), pose metadata (`PoseDescriptor`),
//! per-cell `QualityFlag`s, and `OutputFormat`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Interleaved channel layout of a pixel buffer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum PixelFormat {
    Gray8,
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    /// Number of interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, PixelFormat::Rgba8)
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PixelFormat::Gray8 => "Gray8",
            PixelFormat::Rgb8 => "Rgb8",
            PixelFormat::Rgba8 => "Rgba8",
        };
        write!(f, "{}", s)
    }
}

/// An owned, interleaved pixel buffer with known dimensions and layout.
///
/// Buffers are treated as immutable by the processing passes: every transform
/// (keying, cutting, resizing) allocates a new `SheetImage` rather than
/// mutating its input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SheetImage {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl SheetImage {
    /// Wrap a raw interleaved buffer. The buffer length must equal
    /// `width * height * channels`.
    pub fn new(width: usize, height: usize, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidArgument {
                arg: "dimensions",
                value: format!("{}x{}", width, height),
            });
        }
        let expected = width * height * format.channels();
        if data.len() != expected {
            return Err(Error::InvalidArgument {
                arg: "buffer length",
                value: format!("{} (expected {})", data.len(), expected),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    pub fn has_alpha(&self) -> bool {
        self.format.has_alpha()
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.width * self.channels()
    }

    /// One full row of interleaved pixel data.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.stride();
        &self.data[y * stride..(y + 1) * stride]
    }

    /// One pixel's channels.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let ch = self.channels();
        let offset = y * self.stride() + x * ch;
        &self.data[offset..offset + ch]
    }
}

/// Row/column layout of a pose sheet.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
}

impl GridLayout {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        // The standard nine-pose sheet
        Self { rows: 3, cols: 3 }
    }
}

impl std::fmt::Display for GridLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// One cell's cut rectangle within the sheet, row-major indexed
/// (`index = row * cols + col`).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CellBounds {
    pub index: usize,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl CellBounds {
    /// Whether the rectangle lies fully inside an image of the given extent.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x + self.width <= width && self.y + self.height <= height
    }
}

/// Pose metadata attached to one cell, produced by the upstream variant
/// generator and carried through the pipeline unchanged.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PoseDescriptor {
    pub index: usize,
    pub text: String,
    #[serde(default)]
    pub is_original: bool,
}

impl PoseDescriptor {
    pub fn new(index: usize, text: impl Into<String>, is_original: bool) -> Self {
        Self {
            index,
            text: text.into(),
            is_original,
        }
    }
}

/// Non-fatal per-cell quality annotations. Both flags can apply to one cell.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityFlag {
    /// Transparency was requested but the sheet carried no alpha channel.
    NoAlpha,
    /// The cell is near-uniform: either empty or over-keyed.
    Suspect,
}

impl std::fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityFlag::NoAlpha => write!(f, "no-alpha"),
            QualityFlag::Suspect => write!(f, "suspect"),
        }
    }
}

/// One extracted sticker: the cell image plus its pose metadata and quality
/// annotations. Immutable once produced; owned by the pipeline caller.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StickerResult {
    pub index: usize,
    pub image: SheetImage,
    /// The bounds the cell was cut at, in post-keying sheet coordinates.
    pub bounds: CellBounds,
    pub pose_text: String,
    pub is_original: bool,
    pub flags: Vec<QualityFlag>,
}

impl StickerResult {
    pub fn has_flag(&self, flag: QualityFlag) -> bool {
        self.flags.contains(&flag)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum OutputFormat {
    PNG,
    JPEG, // Lossy, no alpha; stickers are flattened over white
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::PNG => "png",
            OutputFormat::JPEG => "jpg",
        }
    }
}

