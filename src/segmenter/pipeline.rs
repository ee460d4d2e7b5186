//! Plate segmentation pipeline.
//!
//! Stages, in order:
//! - Binarize: local adaptive threshold of the whole plate.
//! - Profile: row and column sums of the binary image.
//! - Rising tide: `rows + 1` row boundaries and `columns + 1` column
//!   boundaries, followed by the spacing check.
//! - Build: tile matrix from the boundaries.
//! - Breathe: optional edge refinement on the original grayscale plate.
//!
//! `process` continues with per-tile reading and the occupancy validation.
//! No stage aborts the run: every failure degrades to a flagged result.
//!
//! ```no_run
//! use plate_grid::{PlateSegmenter, SegmentationSettings};
//! use plate_grid::image::ImageU8;
//!
//! # fn example(plate: ImageU8) {
//! let segmenter = PlateSegmenter::new(SegmentationSettings {
//!     rows: 8,
//!     columns: 12,
//!     ..Default::default()
//! });
//! let result = segmenter.segment(plate);
//! if result.flags.any() {
//!     println!("grid is not trustworthy: {:?}", result.flags);
//! }
//! # }
//! ```

use super::options::{SegmentationMode, SegmentationSettings};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    Axis, BinarizationStage, BoundaryStage, BreathingStage, PipelineTrace, PlateReport,
    SegmentationReport, Strategy, TileReading,
};
use crate::grid::{
    build_grid, check_spacing, find_boundaries, uniform_segmentation, validate_grid, TileRefiner,
};
use crate::image::ImageU8;
use crate::profile::BrightnessProfile;
use crate::reader::TileReader;
use crate::threshold::binarize;
use crate::types::{SegmentationFlags, SegmentationResult};
use log::{debug, warn};
use rayon::prelude::*;
use std::time::Instant;

/// Partitions plate images into the configured `rows × columns` grid.
#[derive(Clone, Debug, Default)]
pub struct PlateSegmenter {
    settings: SegmentationSettings,
}

impl PlateSegmenter {
    pub fn new(settings: SegmentationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SegmentationSettings {
        &self.settings
    }

    /// Segment one plate image.
    pub fn segment(&self, image: ImageU8<'_>) -> SegmentationResult {
        self.segment_with_diagnostics(image).result
    }

    /// Segment one plate image and record what every stage did.
    pub fn segment_with_diagnostics(&self, image: ImageU8<'_>) -> SegmentationReport {
        let total_start = Instant::now();
        let s = &self.settings;

        let (result, mut trace) = if s.single_colony {
            let result = uniform_segmentation(image.w, image.h, 1, 1, 0);
            (result, PipelineTrace::new(image.w, image.h, Strategy::SingleColony))
        } else if s.mode == SegmentationMode::Uniform {
            let result = uniform_segmentation(image.w, image.h, s.rows, s.columns, s.offset);
            (result, PipelineTrace::new(image.w, image.h, Strategy::Uniform))
        } else {
            self.calibrated(image)
        };

        trace.timings.total_ms = elapsed_ms(total_start);
        debug!(
            "PlateSegmenter: {:?} grid {}x{} flags={:?} in {:.3} ms",
            trace.strategy,
            result.grid.rows(),
            result.grid.columns(),
            result.flags,
            trace.timings.total_ms
        );
        SegmentationReport { result, trace }
    }

    /// Segment, read every tile with `reader` and validate occupancy.
    ///
    /// Tiles are read in parallel; the grid is complete and immutable by then.
    pub fn process<R>(&self, image: ImageU8<'_>, reader: &R) -> PlateReport
    where
        R: TileReader + Sync,
    {
        let SegmentationReport { mut result, mut trace } = self.segment_with_diagnostics(image);

        let read_start = Instant::now();
        let tiles: Vec<_> = result.grid.iter().map(|(i, j, t)| (i, j, *t)).collect();
        let readings: Vec<TileReading> = tiles
            .into_par_iter()
            .map(|(row, column, tile)| TileReading {
                row,
                column,
                tile,
                colony: reader.read(image, &tile),
            })
            .collect();
        trace.timings.push("read_tiles", elapsed_ms(read_start));

        let columns = result.grid.columns();
        let occupancy = validate_grid(&mut result, |i, j| {
            readings[i * columns + j].colony.is_empty()
        });

        PlateReport {
            result,
            readings,
            occupancy,
            trace,
        }
    }

    fn calibrated(&self, image: ImageU8<'_>) -> (SegmentationResult, PipelineTrace) {
        let s = &self.settings;
        let mut trace = PipelineTrace::new(image.w, image.h, Strategy::Calibrated);

        let bin_start = Instant::now();
        let binary = match binarize(image, &s.binarize) {
            Ok(binary) => binary,
            Err(err) => {
                warn!("binarization failed ({err}); falling back to a uniform grid");
                let mut result = uniform_segmentation(image.w, image.h, s.rows, s.columns, s.offset);
                result.flags.error_occurred = true;
                trace.strategy = Strategy::Fallback;
                trace.fallback_reason = Some(err.to_string());
                return (result, trace);
            }
        };
        let bin_ms = elapsed_ms(bin_start);
        trace.timings.push("binarize", bin_ms);
        trace.binarization = Some(BinarizationStage {
            method: s.binarize.method,
            radius: s.binarize.radius,
            polarity: s.binarize.polarity,
            object_pixels: binary.object_count(),
            elapsed_ms: bin_ms,
        });

        let rows = self.boundaries(Axis::Rows, BrightnessProfile::binary_rows(&binary), s.rows);
        let columns = self.boundaries(
            Axis::Columns,
            BrightnessProfile::binary_columns(&binary),
            s.columns,
        );
        trace.timings.push("rows", rows.elapsed_ms);
        trace.timings.push("columns", columns.elapsed_ms);

        let flags = SegmentationFlags {
            error_occurred: false,
            not_enough_rows_found: !rows.is_complete(),
            not_enough_columns_found: !columns.is_complete(),
            incorrect_row_spacing: rows.spacing.is_incorrect(),
            incorrect_column_spacing: columns.spacing.is_incorrect(),
        };
        if flags.any() {
            warn!(
                "grid search degraded: rows {}/{} columns {}/{} spacing gaps rows={:?} columns={:?}",
                rows.boundaries.len(),
                rows.target,
                columns.boundaries.len(),
                columns.target,
                rows.spacing.gaps,
                columns.spacing.gaps
            );
        }

        let mut grid = build_grid(&rows.boundaries, &columns.boundaries);

        if s.breathing_space > 0 {
            let breathe_start = Instant::now();
            let refiner = TileRefiner {
                breathing_space: s.breathing_space,
                single_colony: s.single_colony,
            };
            let report = refiner.refine(&mut grid, image);
            let ms = elapsed_ms(breathe_start);
            trace.timings.push("breathing", ms);
            trace.breathing = Some(BreathingStage {
                breathing_space: s.breathing_space,
                report,
                elapsed_ms: ms,
            });
        }

        trace.rows = Some(rows);
        trace.columns = Some(columns);
        (SegmentationResult { grid, flags }, trace)
    }

    fn boundaries(&self, axis: Axis, profile: BrightnessProfile, cells: usize) -> BoundaryStage {
        let start = Instant::now();
        let target = cells + 1;
        let boundaries = find_boundaries(profile, target, self.settings.min_spacing);
        let spacing = check_spacing(
            &boundaries,
            self.settings.min_spacing,
            self.settings.max_spacing,
        );
        BoundaryStage {
            axis,
            target,
            boundaries,
            spacing,
            elapsed_ms: elapsed_ms(start),
        }
    }
}
