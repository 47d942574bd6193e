use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{PixelFormat, SheetImage};

pub fn write_gray_jpeg(output: &Path, cols: usize, rows: usize, data: &[u8]) -> Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, 100);
    encoder
        .encode(data, cols as u16, rows as u16, ColorType::Luma)
        .map_err(Error::external)?;
    Ok(())
}

pub fn write_rgb_jpeg(output: &Path, cols: usize, rows: usize, rgb_data: &[u8]) -> Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, 100);
    encoder
        .encode(rgb_data, cols as u16, rows as u16, ColorType::Rgb)
        .map_err(Error::external)?;
    Ok(())
}

/// Write a sticker as JPEG. JPEG carries no alpha channel, so RGBA stickers
/// are flattened over white before encoding.
pub fn write_sticker_jpeg(output: &Path, image: &SheetImage) -> Result<()> {
    match image.format {
        PixelFormat::Gray8 => write_gray_jpeg(output, image.width, image.height, &image.data),
        PixelFormat::Rgb8 => write_rgb_jpeg(output, image.width, image.height, &image.data),
        PixelFormat::Rgba8 => {
            let mut rgb = Vec::with_capacity(image.width * image.height * 3);
            for px in image.data.chunks_exact(4) {
                let a = px[3] as u16;
                for c in 0..3 {
                    rgb.push(((px[c] as u16 * a + 255 * (255 - a)) / 255) as u8);
                }
            }
            write_rgb_jpeg(output, image.width, image.height, &rgb)
        }
    }
}
