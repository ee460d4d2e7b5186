use super::stages::{BinarizationStage, BoundaryStage, BreathingStage};
use super::timing::TimingBreakdown;
use crate::grid::OccupancyReport;
use crate::reader::ColonyReading;
use crate::types::{SegmentationResult, TileRoi};
use serde::Serialize;

/// Which segmenter produced the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Signal-driven search (binarize → profile → rising tide → breathing).
    Calibrated,
    /// Uniform grid requested by the settings.
    Uniform,
    /// One tile covering the whole image.
    SingleColony,
    /// Uniform grid substituted after the calibrated path failed.
    Fallback,
}

/// Result produced by [`PlateSegmenter::segment_with_diagnostics`](crate::PlateSegmenter).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    pub result: SegmentationResult,
    pub trace: PipelineTrace,
}

/// Stage-by-stage record of one segmentation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub strategy: Strategy,
    pub timings: TimingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binarization: Option<BinarizationStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<BoundaryStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<BoundaryStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breathing: Option<BreathingStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl PipelineTrace {
    pub(crate) fn new(width: usize, height: usize, strategy: Strategy) -> Self {
        Self {
            input: InputDescriptor { width, height },
            strategy,
            timings: TimingBreakdown::default(),
            binarization: None,
            rows: None,
            columns: None,
            breathing: None,
            fallback_reason: None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// One tile's reading.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileReading {
    pub row: usize,
    pub column: usize,
    pub tile: TileRoi,
    pub colony: ColonyReading,
}

/// Everything known about a processed plate: the (validated) grid, the
/// per-tile readings and the segmentation trace.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateReport {
    pub result: SegmentationResult,
    pub readings: Vec<TileReading>,
    pub occupancy: OccupancyReport,
    pub trace: PipelineTrace,
}

impl PlateReport {
    /// Numbers from this plate should be trusted only when no flag is set.
    pub fn is_trustworthy(&self) -> bool {
        !self.result.flags.any()
    }
}
