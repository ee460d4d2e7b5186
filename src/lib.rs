#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod reader;
pub mod report;
pub mod segmenter;
pub mod types;

// Stage modules – public for tools and tests that drive stages directly.
pub mod grid;
pub mod profile;
pub mod threshold;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::Error;
pub use crate::segmenter::{PlateSegmenter, SegmentationMode, SegmentationSettings};
pub use crate::types::{GridMatrix, SegmentationFlags, SegmentationResult, TileRoi};

pub use crate::diagnostics::{PlateReport, SegmentationReport};
pub use crate::reader::{ColonyReading, ThresholdTileReader, TileReader};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use plate_grid::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8::new(w, h, &gray);
///
/// let segmenter = PlateSegmenter::new(SegmentationSettings {
///     rows: 8,
///     columns: 12,
///     ..Default::default()
/// });
/// let report = segmenter.process(img, &ThresholdTileReader::default());
/// println!("tiles={} trusted={}", report.readings.len(), report.is_trustworthy());
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::threshold::{BinarizeParams, Polarity, ThresholdMethod};
    pub use crate::{
        PlateSegmenter, SegmentationResult, SegmentationSettings, ThresholdTileReader, TileRoi,
    };
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    pub use crate::grid::{
        build_grid, check_occupancy, check_spacing, find_boundaries, uniform_grid,
        validate_grid, TileRefiner,
    };
    pub use crate::profile::BrightnessProfile;
    pub use crate::threshold::{binarize, threshold_with_stats, BinaryImage, LocalStatistics};
}
