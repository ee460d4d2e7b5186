//! JSON configuration for the batch tool.
pub mod plate;

pub use plate::{load_config, parse_config, OutputConfig, RuntimeConfig};
