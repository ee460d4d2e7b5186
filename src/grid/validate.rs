//! Occupancy-based grid validation.
//!
//! A few empty tiles scattered over the plate are normal. A row or column in
//! which more than half of the tiles are empty points at a grid that is
//! offset from the colonies.
use crate::types::{GridMatrix, SegmentationResult};
use log::warn;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    pub row_empty_counts: Vec<usize>,
    pub column_empty_counts: Vec<usize>,
    pub failing_rows: Vec<usize>,
    pub failing_columns: Vec<usize>,
}

impl OccupancyReport {
    pub fn is_misgridded(&self) -> bool {
        !self.failing_rows.is_empty() || !self.failing_columns.is_empty()
    }
}

/// Count empty tiles per row and column; `is_empty(row, column)` reports the
/// colony detector's verdict for one tile.
pub fn check_occupancy<F>(grid: &GridMatrix, is_empty: F) -> OccupancyReport
where
    F: Fn(usize, usize) -> bool,
{
    let (rows, columns) = (grid.rows(), grid.columns());
    let mut report = OccupancyReport {
        row_empty_counts: vec![0; rows],
        column_empty_counts: vec![0; columns],
        ..Default::default()
    };
    for i in 0..rows {
        for j in 0..columns {
            if is_empty(i, j) {
                report.row_empty_counts[i] += 1;
                report.column_empty_counts[j] += 1;
            }
        }
    }
    report.failing_rows = over_half(&report.row_empty_counts, columns);
    report.failing_columns = over_half(&report.column_empty_counts, rows);
    report
}

/// Run [`check_occupancy`] on `result.grid` and raise `error_occurred` on a
/// mis-grid.
pub fn validate_grid<F>(result: &mut SegmentationResult, is_empty: F) -> OccupancyReport
where
    F: Fn(usize, usize) -> bool,
{
    let report = check_occupancy(&result.grid, is_empty);
    if report.is_misgridded() {
        warn!(
            "grid validation failed: rows {:?} columns {:?} are mostly empty",
            report.failing_rows, report.failing_columns
        );
        result.flags.error_occurred = true;
    }
    report
}

fn over_half(counts: &[usize], line_len: usize) -> Vec<usize> {
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| 2 * n > line_len)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;
    use crate::types::SegmentationFlags;

    fn grid_8x8() -> GridMatrix {
        let b: Vec<usize> = (0..=8).map(|k| k * 10).collect();
        build_grid(&b, &b)
    }

    #[test]
    fn mostly_empty_row_is_a_misgrid() {
        let mut result = SegmentationResult {
            grid: grid_8x8(),
            flags: SegmentationFlags::default(),
        };
        let report = validate_grid(&mut result, |i, j| i == 3 && j < 5);
        assert_eq!(report.failing_rows, vec![3]);
        assert!(report.failing_columns.is_empty());
        assert!(result.flags.error_occurred);
    }

    #[test]
    fn scattered_empties_pass() {
        let mut result = SegmentationResult {
            grid: grid_8x8(),
            flags: SegmentationFlags::default(),
        };
        // Three empty tiles per row, spread over the columns.
        let report = validate_grid(&mut result, |i, j| (j + 8 - i % 8) % 8 < 3);
        assert!(report.row_empty_counts.iter().all(|&n| n == 3));
        assert!(!report.is_misgridded());
        assert!(!result.flags.error_occurred);
    }

    #[test]
    fn exactly_half_is_tolerated() {
        let report = check_occupancy(&grid_8x8(), |_, j| j < 4);
        assert!(report.failing_rows.is_empty());
        assert_eq!(report.failing_columns, vec![0, 1, 2, 3]);
    }
}
