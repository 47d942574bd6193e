use stickercut::core::processing::grid::{raw_cell_bounds, resolve_cell_bounds};
use stickercut::{Error, GridLayout};

#[test]
fn raw_cells_tile_the_sheet_for_many_layouts() {
    for &(width, height, rows, cols) in &[
        (1536usize, 1536usize, 3usize, 3usize),
        (301, 299, 3, 3),
        (100, 100, 1, 9),
        (97, 211, 9, 1),
        (640, 480, 2, 4),
    ] {
        let layout = GridLayout::new(rows, cols);
        let bounds = raw_cell_bounds(width, height, layout);
        assert_eq!(bounds.len(), rows * cols);

        // Non-overlap + full coverage: every pixel belongs to exactly one cell
        let mut hits = vec![0u8; width * height];
        for b in &bounds {
            for y in b.y..b.y + b.height {
                for x in b.x..b.x + b.width {
                    hits[y * width + x] += 1;
                }
            }
        }
        assert!(
            hits.iter().all(|&h| h == 1),
            "cells must partition a {}x{} sheet as {}",
            width,
            height,
            layout
        );
    }
}

#[test]
fn nine_cell_sheet_with_padding() {
    // 1536/3 = 512 per cell, minus 20 padding on every side
    let bounds = resolve_cell_bounds(1536, 1536, GridLayout::new(3, 3), 20).unwrap();
    assert_eq!(bounds.len(), 9);
    for (i, b) in bounds.iter().enumerate() {
        assert_eq!(b.index, i);
        assert_eq!((b.width, b.height), (472, 472));
    }
    assert_eq!((bounds[0].x, bounds[0].y), (20, 20));
    assert_eq!((bounds[8].x, bounds[8].y), (1044, 1044));
}

#[test]
fn resolver_is_deterministic() {
    let a = resolve_cell_bounds(1030, 770, GridLayout::new(3, 3), 7).unwrap();
    let b = resolve_cell_bounds(1030, 770, GridLayout::new(3, 3), 7).unwrap();
    assert_eq!(a, b);
}

#[test]
fn padding_consuming_a_cell_axis_is_invalid() {
    // Cells are 100x66; padding 33 leaves no vertical interior
    let err = resolve_cell_bounds(300, 200, GridLayout::new(3, 3), 33).unwrap_err();
    assert!(matches!(err, Error::InvalidLayout { .. }), "got {:?}", err);
}

#[test]
fn zero_rows_or_cols_are_invalid() {
    for layout in [GridLayout::new(0, 3), GridLayout::new(3, 0)] {
        let err = resolve_cell_bounds(300, 300, layout, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidLayout { .. }));
    }
}
