//! Grid construction from brightness profiles.
//!
//! - [`tide`]: rising-tide boundary search on a row or column profile.
//! - [`spacing`]: post-hoc check of the distances between boundaries.
//! - [`builder`]: tile matrix from row × column boundaries.
//! - [`breathing`]: bounded refinement of internal tile edges.
//! - [`validate`]: occupancy check that detects a shifted grid.
//! - [`uniform`]: fixed-grid fallback.

pub mod breathing;
pub mod builder;
pub mod spacing;
pub mod tide;
pub mod uniform;
pub mod validate;

pub use breathing::{BreathFailure, BreathOutcome, BreathingReport, Edge, TileRefiner};
pub use builder::build_grid;
pub use spacing::{check_spacing, SpacingReport};
pub use tide::{find_boundaries, FLOODED};
pub use uniform::{uniform_grid, uniform_segmentation};
pub use validate::{check_occupancy, validate_grid, OccupancyReport};
