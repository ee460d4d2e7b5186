//! Per-tile colony reading.
//!
//! The segmentation core only needs one fact per tile from the colony
//! detector: whether anything grew there. [`TileReader`] is that seam;
//! [`ThresholdTileReader`] is a small reference implementation built on the
//! binarizer.

use crate::image::{ImageU8, ImageView};
use crate::threshold::{binarize, BinarizeParams};
use crate::types::TileRoi;
use log::debug;
use serde::{Deserialize, Serialize};

/// What a colony detector saw in one tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColonyReading {
    /// Colony pixel count; `0` means the tile is empty.
    pub area: usize,
    /// Bounding box of the colony pixels in plate coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<TileRoi>,
}

impl ColonyReading {
    pub fn is_empty(&self) -> bool {
        self.area == 0
    }
}

/// Colony detector invoked once per tile. Implementations only read the
/// image, so tiles may be processed concurrently.
pub trait TileReader {
    fn read(&self, image: ImageU8<'_>, tile: &TileRoi) -> ColonyReading;
}

/// Binarizes the tile and counts object pixels.
///
/// Tiles whose intensity range stays below `min_contrast` are bare agar and
/// read as empty without thresholding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTileReader {
    pub binarize: BinarizeParams,
    pub min_contrast: u8,
    /// Object pixel counts below this are reported as empty.
    pub min_colony_area: usize,
}

impl Default for ThresholdTileReader {
    fn default() -> Self {
        Self {
            binarize: BinarizeParams {
                radius: 8,
                ..Default::default()
            },
            min_contrast: 30,
            min_colony_area: 10,
        }
    }
}

impl TileReader for ThresholdTileReader {
    fn read(&self, image: ImageU8<'_>, tile: &TileRoi) -> ColonyReading {
        let Some(window) = image.window(tile.x, tile.y, tile.width, tile.height) else {
            debug!("tile {tile:?} lies outside the image");
            return ColonyReading::default();
        };
        if window.is_empty() || contrast(&window) < self.min_contrast {
            return ColonyReading::default();
        }
        let binary = match binarize(window, &self.binarize) {
            Ok(b) => b,
            Err(err) => {
                debug!("tile {tile:?} could not be binarized: {err}");
                return ColonyReading::default();
            }
        };

        let mut area = 0usize;
        let (mut x0, mut y0, mut x1, mut y1) = (usize::MAX, usize::MAX, 0usize, 0usize);
        for y in 0..binary.height() {
            for x in 0..binary.width() {
                if binary.is_object(x, y) {
                    area += 1;
                    x0 = x0.min(x);
                    y0 = y0.min(y);
                    x1 = x1.max(x);
                    y1 = y1.max(y);
                }
            }
        }
        if area < self.min_colony_area {
            return ColonyReading::default();
        }
        ColonyReading {
            area,
            bounds: Some(TileRoi::new(
                tile.x + x0,
                tile.y + y0,
                x1 - x0 + 1,
                y1 - y0 + 1,
            )),
        }
    }
}

fn contrast(window: &ImageU8<'_>) -> u8 {
    let (mut lo, mut hi) = (u8::MAX, u8::MIN);
    for row in window.rows() {
        for &v in row {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    hi.saturating_sub(lo)
}
