use nalgebra::DMatrix;
use serde::{Serialize, Serializer};

/// Axis-aligned tile rectangle in plate-image pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TileRoi {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl TileRoi {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// True when `other` lies completely inside `self`.
    pub fn contains(&self, other: &TileRoi) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// `rows × columns` matrix of tiles forming an exact partition of the
/// covered rectangle: horizontally adjacent tiles share their vertical edge
/// and vertically adjacent tiles share their horizontal edge.
///
/// Instances are created by [`build_grid`](crate::grid::build_grid) and the
/// uniform segmenter; only the breathing refiner mutates them.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMatrix {
    tiles: DMatrix<TileRoi>,
}

impl GridMatrix {
    pub(crate) fn from_fn<F>(rows: usize, columns: usize, f: F) -> Self
    where
        F: FnMut(usize, usize) -> TileRoi,
    {
        Self {
            tiles: DMatrix::from_fn(rows, columns, f),
        }
    }

    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    pub fn columns(&self) -> usize {
        self.tiles.ncols()
    }

    pub fn len(&self) -> usize {
        self.rows() * self.columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn tile(&self, row: usize, column: usize) -> &TileRoi {
        &self.tiles[(row, column)]
    }

    #[inline]
    pub(crate) fn tile_mut(&mut self, row: usize, column: usize) -> &mut TileRoi {
        &mut self.tiles[(row, column)]
    }

    /// Tiles in row-major order together with their `(row, column)` index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &TileRoi)> + '_ {
        let columns = self.columns();
        (0..self.rows())
            .flat_map(move |i| (0..columns).map(move |j| (i, j)))
            .map(move |(i, j)| (i, j, self.tile(i, j)))
    }

    /// Checks the shared-edge invariant between every pair of neighbours.
    pub fn is_partition(&self) -> bool {
        for (i, j, tile) in self.iter() {
            if j + 1 < self.columns() && tile.right() != self.tile(i, j + 1).x {
                return false;
            }
            if i + 1 < self.rows() && tile.bottom() != self.tile(i + 1, j).y {
                return false;
            }
        }
        true
    }

    /// Row-major nested copy of the tiles.
    pub fn to_rows(&self) -> Vec<Vec<TileRoi>> {
        (0..self.rows())
            .map(|i| (0..self.columns()).map(|j| *self.tile(i, j)).collect())
            .collect()
    }
}

impl Serialize for GridMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

/// Independent quality flags attached to a segmentation. A flagged result
/// still carries a usable best-effort grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationFlags {
    pub error_occurred: bool,
    pub not_enough_rows_found: bool,
    pub not_enough_columns_found: bool,
    pub incorrect_row_spacing: bool,
    pub incorrect_column_spacing: bool,
}

impl SegmentationFlags {
    pub fn any(&self) -> bool {
        self.error_occurred
            || self.not_enough_rows_found
            || self.not_enough_columns_found
            || self.incorrect_row_spacing
            || self.incorrect_column_spacing
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationResult {
    pub grid: GridMatrix,
    pub flags: SegmentationFlags,
}
