//! Sheet decoding: image files into the core `SheetImage` buffer model.
use std::path::Path;

use image::DynamicImage;
use tracing::info;

use crate::error::Result;
use crate::types::{PixelFormat, SheetImage};

/// Decode a sheet image file (PNG or JPEG) into a `SheetImage`.
pub fn load_sheet(path: &Path) -> Result<SheetImage> {
    let dynamic = image::open(path)?;
    let sheet = sheet_from_dynamic(dynamic)?;
    info!(
        "Loaded {}x{} {} sheet from {:?}",
        sheet.width, sheet.height, sheet.format, path
    );
    Ok(sheet)
}

/// Map a decoded image onto the closest supported pixel format.
///
/// Gray, RGB, and RGBA buffers are taken as-is; anything else (16-bit,
/// gray+alpha) is converted to RGBA.
pub fn sheet_from_dynamic(image: DynamicImage) -> Result<SheetImage> {
    match image {
        DynamicImage::ImageLuma8(img) => {
            let (w, h) = img.dimensions();
            SheetImage::new(w as usize, h as usize, PixelFormat::Gray8, img.into_raw())
        }
        DynamicImage::ImageRgb8(img) => {
            let (w, h) = img.dimensions();
            SheetImage::new(w as usize, h as usize, PixelFormat::Rgb8, img.into_raw())
        }
        DynamicImage::ImageRgba8(img) => {
            let (w, h) = img.dimensions();
            SheetImage::new(w as usize, h as usize, PixelFormat::Rgba8, img.into_raw())
        }
        other => {
            let img = other.into_rgba8();
            let (w, h) = img.dimensions();
            SheetImage::new(w as usize, h as usize, PixelFormat::Rgba8, img.into_raw())
        }
    }
}
