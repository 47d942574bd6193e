//! Sticker resizing to a target long side, preserving aspect ratio.
//!
//! Sticker platforms expect a fixed canvas (512 px is the common case), so
//! the cutter can resize each cell after extraction. Upscaling is never
//! performed: a target larger than the sticker keeps the original size.
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{PixelFormat, SheetImage};

pub fn calculate_resize_dimensions(
    original_cols: usize,
    original_rows: usize,
    target_size: usize,
) -> (usize, usize) {
    let short_side = original_rows.min(original_cols);
    let long_side = original_rows.max(original_cols);

    if target_size > long_side {
        warn!(
            "Target size {} is larger than original long side {}. Keeping original dimensions {}x{}",
            target_size, long_side, original_cols, original_rows
        );
        return (original_cols, original_rows);
    }

    let scale_factor = target_size as f64 / long_side as f64;
    let new_short_side = ((short_side as f64 * scale_factor).round() as usize).max(1);

    if original_cols > original_rows {
        (target_size, new_short_side)
    } else {
        (new_short_side, target_size)
    }
}

fn pixel_type(format: PixelFormat) -> PixelType {
    match format {
        PixelFormat::Gray8 => PixelType::U8,
        PixelFormat::Rgb8 => PixelType::U8x3,
        PixelFormat::Rgba8 => PixelType::U8x4,
    }
}

/// Resize a sticker so its long side equals `target_size`, keeping format
/// and aspect ratio. Returns a clone when no scaling is needed.
pub fn resize_to_long_side(image: &SheetImage, target_size: usize) -> Result<SheetImage> {
    if target_size == 0 {
        return Err(Error::InvalidArgument {
            arg: "size",
            value: "0".to_string(),
        });
    }

    let (new_cols, new_rows) =
        calculate_resize_dimensions(image.width, image.height, target_size);
    if (new_cols, new_rows) == (image.width, image.height) {
        return Ok(image.clone());
    }

    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        image.width as u32,
        image.height as u32,
        image.data.clone(),
        pixel_type(image.format),
    )
    .map_err(Error::external)?;
    let mut dst_image = Image::new(new_cols as u32, new_rows as u32, pixel_type(image.format));
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::external)?;

    SheetImage::new(new_cols, new_rows, image.format, dst_image.into_vec())
}
