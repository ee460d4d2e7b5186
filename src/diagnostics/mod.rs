//! Diagnostics data model exposed by the segmenter and the batch tool.
//!
//! `SegmentationReport` bundles the grid result with a `PipelineTrace`
//! describing every stage that ran; `PlateReport` adds the tile readings and
//! the occupancy validation. `render_grid_overlay` draws a grid onto a copy of
//! the plate for visual inspection of flagged plates.

pub mod overlay;
pub mod pipeline;
pub mod stages;
pub mod timing;

pub use overlay::render_grid_overlay;
pub use pipeline::{
    InputDescriptor, PipelineTrace, PlateReport, SegmentationReport, Strategy, TileReading,
};
pub use stages::{Axis, BinarizationStage, BoundaryStage, BreathingStage};
pub use timing::{StageTiming, TimingBreakdown};
