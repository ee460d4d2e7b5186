use crate::grid::{BreathingReport, SpacingReport};
use crate::threshold::{Polarity, ThresholdMethod};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Rows,
    Columns,
}

/// Outcome of the plate binarization.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinarizationStage {
    pub method: ThresholdMethod,
    pub radius: usize,
    pub polarity: Polarity,
    pub object_pixels: usize,
    pub elapsed_ms: f64,
}

/// Rising-tide result along one axis.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryStage {
    pub axis: Axis,
    pub target: usize,
    pub boundaries: Vec<usize>,
    pub spacing: SpacingReport,
    pub elapsed_ms: f64,
}

impl BoundaryStage {
    pub fn is_complete(&self) -> bool {
        self.boundaries.len() >= self.target
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingStage {
    pub breathing_space: usize,
    pub report: BreathingReport,
    pub elapsed_ms: f64,
}
