use crate::error::Error;
use crate::reader::ThresholdTileReader;
use crate::segmenter::SegmentationSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `<stem>.tsv` (and `<stem>.json`) per trustworthy plate.
    pub report_dir: PathBuf,
    /// Directory receiving `<stem>_grid.png` for flagged plates; defaults to
    /// `report_dir`.
    #[serde(default)]
    pub overlay_dir: Option<PathBuf>,
    /// Also write the full JSON plate report.
    #[serde(default)]
    pub json: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Plate images to process.
    pub inputs: Vec<PathBuf>,
    pub output: OutputConfig,
    #[serde(default)]
    pub settings: SegmentationSettings,
    #[serde(default)]
    pub reader: ThresholdTileReader,
}

/// Parse and validate a runtime configuration from JSON text.
pub fn parse_config(contents: &str, origin: &Path) -> Result<RuntimeConfig, Error> {
    let config: RuntimeConfig = serde_json::from_str(contents).map_err(|source| Error::Json {
        path: origin.to_path_buf(),
        source,
    })?;
    if config.inputs.is_empty() {
        return Err(Error::Config(format!(
            "{}: no input images listed",
            origin.display()
        )));
    }
    config.settings.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, Error> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses() {
        let json = r#"{
            "inputs": ["plates/a.png", "plates/b.png"],
            "output": { "report_dir": "out" },
            "settings": { "rows": 16, "columns": 24, "breathing_space": 4 }
        }"#;
        let cfg = parse_config(json, Path::new("cfg.json")).unwrap();
        assert_eq!(cfg.inputs.len(), 2);
        assert_eq!(cfg.settings.rows, 16);
        assert_eq!(cfg.settings.breathing_space, 4);
        assert_eq!(cfg.output.overlay_dir, None);
        assert!(!cfg.output.json);
        assert_eq!(cfg.reader, ThresholdTileReader::default());
    }

    #[test]
    fn empty_inputs_and_bad_settings_fail() {
        let json = r#"{ "inputs": [], "output": { "report_dir": "out" } }"#;
        assert!(matches!(
            parse_config(json, Path::new("cfg.json")),
            Err(Error::Config(_))
        ));
        let json = r#"{
            "inputs": ["a.png"],
            "output": { "report_dir": "out" },
            "settings": { "columns": 0 }
        }"#;
        assert!(parse_config(json, Path::new("cfg.json")).is_err());
        assert!(matches!(
            parse_config("{", Path::new("cfg.json")),
            Err(Error::Json { .. })
        ));
    }
}
