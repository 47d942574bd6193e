use stickercut::{GridLayout, PixelFormat, PoseDescriptor, SheetImage};

/// Pure green, the default key color.
pub const KEY: [u8; 3] = [0, 255, 0];

/// A warm, clearly-off-key subject color.
pub const SUBJECT: [u8; 3] = [180, 60, 40];

/// A single flat-color RGB image.
pub fn flat_sheet(width: usize, height: usize, color: [u8; 3]) -> SheetImage {
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        data.extend_from_slice(&color);
    }
    SheetImage::new(width, height, PixelFormat::Rgb8, data).unwrap()
}

/// An RGB image where every pixel is unique-ish, for exact-crop assertions.
pub fn gradient_sheet(width: usize, height: usize) -> SheetImage {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push((x % 256) as u8);
            data.push((y % 256) as u8);
            data.push(((x * 7 + y * 13) % 256) as u8);
        }
    }
    SheetImage::new(width, height, PixelFormat::Rgb8, data).unwrap()
}

/// A synthetic pose sheet: `layout` cells over a flat key-color background,
/// each cell carrying a centered subject rectangle of half the cell's size.
/// Cells listed in `empty_cells` are left as bare background.
pub fn pose_sheet(
    width: usize,
    height: usize,
    layout: GridLayout,
    empty_cells: &[usize],
) -> SheetImage {
    let mut data = vec![0u8; width * height * 3];
    for px in data.chunks_exact_mut(3) {
        px.copy_from_slice(&KEY);
    }

    let cell_w = width / layout.cols;
    let cell_h = height / layout.rows;
    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let index = row * layout.cols + col;
            if empty_cells.contains(&index) {
                continue;
            }
            // Centered subject covering a quarter of the cell's area
            let x0 = col * cell_w + cell_w / 4;
            let y0 = row * cell_h + cell_h / 4;
            for y in y0..y0 + cell_h / 2 {
                for x in x0..x0 + cell_w / 2 {
                    let offset = (y * width + x) * 3;
                    data[offset..offset + 3].copy_from_slice(&SUBJECT);
                }
            }
        }
    }

    SheetImage::new(width, height, PixelFormat::Rgb8, data).unwrap()
}

/// A row-major pose list matching `n` cells; index 0 is the original.
pub fn poses(n: usize) -> Vec<PoseDescriptor> {
    (0..n)
        .map(|i| PoseDescriptor::new(i, format!("pose {}", i), i == 0))
        .collect()
}
