use std::path::PathBuf;

/// Errors raised by the I/O surface of the crate (image decoding, JSON
/// configuration, report writing). The segmentation core itself never fails;
/// it reports degraded results through [`SegmentationFlags`](crate::types::SegmentationFlags).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image error on {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("json error on {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
}
