//! Fixed-grid fallback segmenter.
use crate::types::{GridMatrix, SegmentationFlags, SegmentationResult, TileRoi};
use log::warn;

/// Equal tiles of `floor((dim − 2·offset) / count)` pixels starting at `offset`.
pub fn uniform_grid(
    width: usize,
    height: usize,
    rows: usize,
    columns: usize,
    offset: usize,
) -> GridMatrix {
    let tile_w = nominal_distance(width, columns, offset);
    let tile_h = nominal_distance(height, rows, offset);
    GridMatrix::from_fn(rows, columns, |i, j| {
        TileRoi::new(offset + j * tile_w, offset + i * tile_h, tile_w, tile_h)
    })
}

/// Uniform segmentation; `error_occurred` is raised when the image leaves no
/// room for tiles after the offset.
pub fn uniform_segmentation(
    width: usize,
    height: usize,
    rows: usize,
    columns: usize,
    offset: usize,
) -> SegmentationResult {
    let grid = uniform_grid(width, height, rows, columns, offset);
    let degenerate = grid.iter().any(|(_, _, t)| t.area() == 0);
    if degenerate {
        warn!(
            "uniform grid {rows}x{columns} with offset {offset} does not fit a {width}x{height} image"
        );
    }
    SegmentationResult {
        grid,
        flags: SegmentationFlags {
            error_occurred: degenerate,
            ..Default::default()
        },
    }
}

fn nominal_distance(dimension: usize, count: usize, offset: usize) -> usize {
    if count == 0 {
        return 0;
    }
    dimension.saturating_sub(2 * offset) / count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_tiles_after_offset() {
        let grid = uniform_grid(130, 70, 2, 3, 5);
        assert_eq!((grid.rows(), grid.columns()), (2, 3));
        assert_eq!(*grid.tile(0, 0), TileRoi::new(5, 5, 40, 30));
        assert_eq!(*grid.tile(1, 2), TileRoi::new(85, 35, 40, 30));
        assert!(grid.is_partition());
    }

    #[test]
    fn single_tile_covers_the_image() {
        let grid = uniform_grid(64, 48, 1, 1, 0);
        assert_eq!(*grid.tile(0, 0), TileRoi::new(0, 0, 64, 48));
    }

    #[test]
    fn oversized_offset_flags_an_error() {
        let result = uniform_segmentation(20, 20, 2, 2, 15);
        assert!(result.flags.error_occurred);
        assert!(!uniform_segmentation(20, 20, 2, 2, 0).flags.error_occurred);
    }
}
