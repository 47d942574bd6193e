use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::types::{PixelFormat, SheetImage};

/// Write an image as PNG, preserving the alpha channel when present.
pub fn write_png(output: &Path, image: &SheetImage) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new(writer);
    let color = match image.format {
        PixelFormat::Gray8 => ExtendedColorType::L8,
        PixelFormat::Rgb8 => ExtendedColorType::Rgb8,
        PixelFormat::Rgba8 => ExtendedColorType::Rgba8,
    };
    encoder.write_image(
        &image.data,
        image.width as u32,
        image.height as u32,
        color,
    )?;
    Ok(())
}
