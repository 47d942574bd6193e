//! Grid geometry resolver: cell rectangles from image dimensions and layout.
//!
//! Pure integer math over dimensions and configuration; never inspects image
//! content. Identical inputs always yield identical bounds.
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{CellBounds, GridLayout, PoseDescriptor};

/// Raw cell rectangles with zero padding, row-major.
///
/// Cell size is the floor of the per-axis division; the remainder is folded
/// into the final row/column so the union of all cells equals the full image
/// extent with no pixel lost at the edges.
pub fn raw_cell_bounds(width: usize, height: usize, layout: GridLayout) -> Vec<CellBounds> {
    let cell_w = width / layout.cols;
    let cell_h = height / layout.rows;

    let mut bounds = Vec::with_capacity(layout.cell_count());
    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let x = col * cell_w;
            let y = row * cell_h;
            let w = if col == layout.cols - 1 {
                width - x
            } else {
                cell_w
            };
            let h = if row == layout.rows - 1 {
                height - y
            } else {
                cell_h
            };
            bounds.push(CellBounds {
                index: row * layout.cols + col,
                x,
                y,
                width: w,
                height: h,
            });
        }
    }
    bounds
}

/// Padded cell rectangles, row-major.
///
/// Each cell's inner rectangle is the raw cell shrunk by `padding` pixels on
/// every side, clamped to at least 1x1. Fails with `InvalidLayout` when the
/// layout has no cells or the padding would consume an entire cell axis.
pub fn resolve_cell_bounds(
    width: usize,
    height: usize,
    layout: GridLayout,
    padding: usize,
) -> Result<Vec<CellBounds>> {
    validate_layout(layout)?;

    let cell_w = width / layout.cols;
    let cell_h = height / layout.rows;
    if padding * 2 >= cell_w.min(cell_h) {
        return Err(Error::InvalidLayout {
            rows: layout.rows,
            cols: layout.cols,
            reason: format!(
                "padding {} leaves no interior in {}x{} cells",
                padding, cell_w, cell_h
            ),
        });
    }

    debug!(
        "Grid resolution: {}x{} sheet, layout {}, cell {}x{}, padding {}",
        width, height, layout, cell_w, cell_h, padding
    );

    let bounds = raw_cell_bounds(width, height, layout)
        .into_iter()
        .map(|cell| CellBounds {
            index: cell.index,
            x: cell.x + padding,
            y: cell.y + padding,
            width: (cell.width - 2 * padding).max(1),
            height: (cell.height - 2 * padding).max(1),
        })
        .collect();
    Ok(bounds)
}

/// Reject layouts with no cells.
pub fn validate_layout(layout: GridLayout) -> Result<()> {
    if layout.rows == 0 || layout.cols == 0 {
        return Err(Error::InvalidLayout {
            rows: layout.rows,
            cols: layout.cols,
            reason: "rows and cols must be positive".to_string(),
        });
    }
    Ok(())
}

/// Reject pose lists that do not cover the layout exactly, or whose indices
/// are not the identity permutation of the cell indices.
pub fn validate_poses(layout: GridLayout, poses: &[PoseDescriptor]) -> Result<()> {
    validate_layout(layout)?;
    if poses.len() != layout.cell_count() {
        return Err(Error::InvalidLayout {
            rows: layout.rows,
            cols: layout.cols,
            reason: format!(
                "pose count {} does not match {} cells",
                poses.len(),
                layout.cell_count()
            ),
        });
    }
    for (slot, pose) in poses.iter().enumerate() {
        if pose.index != slot {
            return Err(Error::InvalidLayout {
                rows: layout.rows,
                cols: layout.cols,
                reason: format!("pose at position {} carries index {}", slot, pose.index),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_cells_partition_the_extent() {
        let layout = GridLayout::new(3, 3);
        let bounds = raw_cell_bounds(100, 97, layout);
        assert_eq!(bounds.len(), 9);

        let area: usize = bounds.iter().map(|b| b.width * b.height).sum();
        assert_eq!(area, 100 * 97, "cells must tile the sheet exactly");

        // Remainder lands in the last row/column
        assert_eq!(bounds[8].width, 100 - 2 * 33);
        assert_eq!(bounds[8].height, 97 - 2 * 32);
    }

    #[test]
    fn indices_are_row_major() {
        let bounds = raw_cell_bounds(90, 90, GridLayout::new(3, 3));
        for (i, b) in bounds.iter().enumerate() {
            assert_eq!(b.index, i);
        }
        assert_eq!((bounds[5].x, bounds[5].y), (60, 30)); // row 1, col 2
    }

    #[test]
    fn padding_insets_every_side() {
        let bounds = resolve_cell_bounds(1536, 1536, GridLayout::new(3, 3), 20).unwrap();
        for b in &bounds {
            assert_eq!(b.width, 472);
            assert_eq!(b.height, 472);
        }
        assert_eq!((bounds[0].x, bounds[0].y), (20, 20));
        assert_eq!((bounds[4].x, bounds[4].y), (532, 532));
    }

    #[test]
    fn oversized_padding_is_rejected_before_any_pixel_work() {
        let err = resolve_cell_bounds(90, 90, GridLayout::new(3, 3), 15).unwrap_err();
        assert!(matches!(err, Error::InvalidLayout { .. }), "got {:?}", err);
    }

    #[test]
    fn empty_layout_is_rejected() {
        let err = resolve_cell_bounds(90, 90, GridLayout::new(0, 3), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidLayout { .. }));
    }
}
