//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O and image codec errors, and provides semantic variants
//! for layout validation, cut geometry, and pixel format failures.
use thiserror::Error;

use crate::types::PixelFormat;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid layout {rows}x{cols}: {reason}")]
    InvalidLayout {
        rows: usize,
        cols: usize,
        reason: String,
    },

    #[error(
        "Cell {index} bounds {width}x{height}+{x}+{y} exceed image extent {image_width}x{image_height}"
    )]
    BoundsOutOfRange {
        index: usize,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        image_width: usize,
        image_height: usize,
    },

    #[error("Unsupported pixel format: expected {expected}, got {found}")]
    UnsupportedFormat {
        expected: &'static str,
        found: PixelFormat,
    },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }
}
