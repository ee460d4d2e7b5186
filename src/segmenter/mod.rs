//! Plate segmenter: settings plus the pipeline that turns a grayscale plate
//! into a validated tile grid.
//!
//! Modules
//! - [`options`] – `SegmentationSettings` and `SegmentationMode`.
//! - `pipeline` – the [`PlateSegmenter`] implementation.

pub mod options;
mod pipeline;

pub use options::{SegmentationMode, SegmentationSettings};
pub use pipeline::PlateSegmenter;
