use crate::types::{GridMatrix, TileRoi};

/// Build the tile matrix spanned by ascending row and column boundaries.
///
/// `k + 1` boundaries along an axis yield `k` tiles along it; fewer than two
/// boundaries yield none. Neighbouring tiles share their edge by
/// construction.
pub fn build_grid(row_boundaries: &[usize], column_boundaries: &[usize]) -> GridMatrix {
    let rows = row_boundaries.len().saturating_sub(1);
    let columns = column_boundaries.len().saturating_sub(1);
    GridMatrix::from_fn(rows, columns, |i, j| {
        TileRoi::new(
            column_boundaries[j],
            row_boundaries[i],
            column_boundaries[j + 1] - column_boundaries[j],
            row_boundaries[i + 1] - row_boundaries[i],
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_follow_boundaries() {
        let grid = build_grid(&[0, 10, 25], &[5, 15, 30, 50]);
        assert_eq!((grid.rows(), grid.columns()), (2, 3));
        assert_eq!(*grid.tile(0, 0), TileRoi::new(5, 0, 10, 10));
        assert_eq!(*grid.tile(1, 2), TileRoi::new(30, 10, 20, 15));
        assert!(grid.is_partition());
    }

    #[test]
    fn too_few_boundaries_give_an_empty_axis() {
        let grid = build_grid(&[7], &[0, 10, 20]);
        assert_eq!(grid.rows(), 0);
        assert!(grid.is_empty());
    }
}
