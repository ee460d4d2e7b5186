//! Local adaptive binarization.
//!
//! A plate (or a single tile) is turned into a two-valued image by comparing
//! every pixel against statistics of its disc-shaped neighbourhood.
//!
//! Modules
//! - `disc` – disc kernel as per-row half-widths.
//! - `histogram` – sliding 256-bin neighbourhood histogram.
//! - [`stats`] – local min/max/median/mean/variance maps.
//! - [`otsu`] – per-pixel local Otsu thresholds (opt-in, budgeted).
//! - `rules` – the foreground tests of the statistic rules.
//!
//! | Method | Foreground test |
//! |---|---|
//! | Bernsen | low contrast: `mid ≥ 128`; otherwise `pixel ≥ mid` |
//! | Contrast | `|max − pixel| ≤ |pixel − min|` |
//! | Mean | `pixel > mean − c` |
//! | Median | `pixel > median − c` |
//! | MidGrey | `pixel > mid − c` |
//! | Niblack | `pixel > mean + k·σ − c` |
//! | Otsu | `pixel > k*` (local Otsu) |
//! | Sauvola | `pixel > mean·(1 + k·(σ/r − 1))` |
//! | Phansalkar | on `[0,1]`: `pixel > mean·(1 + p·e^(−q·mean) + k·(σ/r − 1))` |
//!
//! where `mid = (max + min) / 2`.

mod disc;
mod histogram;
pub mod otsu;
mod rules;
pub mod stats;


pub use disc::DiscKernel;
pub use otsu::{local_otsu_thresholds, otsu_threshold};
pub use stats::LocalStatistics;

use crate::image::{GrayImageU8, ImageU8, ImageView};
use rules::{passes, LocalSample, RuleParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Local thresholding rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMethod {
    Bernsen,
    Contrast,
    #[default]
    Mean,
    Median,
    MidGrey,
    Niblack,
    Otsu,
    Sauvola,
    Phansalkar,
}

impl ThresholdMethod {
    pub const ALL: [ThresholdMethod; 9] = [
        ThresholdMethod::Bernsen,
        ThresholdMethod::Contrast,
        ThresholdMethod::Mean,
        ThresholdMethod::Median,
        ThresholdMethod::MidGrey,
        ThresholdMethod::Niblack,
        ThresholdMethod::Otsu,
        ThresholdMethod::Sauvola,
        ThresholdMethod::Phansalkar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThresholdMethod::Bernsen => "bernsen",
            ThresholdMethod::Contrast => "contrast",
            ThresholdMethod::Mean => "mean",
            ThresholdMethod::Median => "median",
            ThresholdMethod::MidGrey => "mid_grey",
            ThresholdMethod::Niblack => "niblack",
            ThresholdMethod::Otsu => "otsu",
            ThresholdMethod::Sauvola => "sauvola",
            ThresholdMethod::Phansalkar => "phansalkar",
        }
    }
}

impl fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThresholdMethod {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(|c: char| c == '-' || c == ' ', "_");
        Self::ALL
            .into_iter()
            .find(|m| m.name() == wanted || (wanted == "midgrey" && *m == Self::MidGrey))
            .ok_or_else(|| ThresholdError::UnknownMethod(s.to_string()))
    }
}

/// Which of the two output values marks pixels passing the foreground test.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Objects are light on a dark background: passing pixels become 255.
    #[default]
    LightObjects,
    /// Objects are dark on a light background: passing pixels become 0.
    DarkObjects,
}

impl Polarity {
    #[inline]
    pub fn object_value(self) -> u8 {
        match self {
            Polarity::LightObjects => 255,
            Polarity::DarkObjects => 0,
        }
    }

    #[inline]
    pub fn background_value(self) -> u8 {
        255 - self.object_value()
    }
}

/// Binarization knobs. `k` and `r` fall back to per-method defaults when
/// unset (Niblack k = ±0.2 by polarity, Sauvola k = 0.5 / r = 128,
/// Phansalkar k = 0.25 / r = 0.5).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeParams {
    pub method: ThresholdMethod,
    /// Disc radius in pixels (>= 1).
    pub radius: usize,
    pub k: Option<f32>,
    pub r: Option<f32>,
    pub c: f32,
    /// Bernsen local contrast below which the neighbourhood counts as flat.
    pub contrast_threshold: u8,
    pub polarity: Polarity,
    /// Largest image (in pixels) the local Otsu rule may run on. `None`
    /// removes the limit.
    pub otsu_max_pixels: Option<usize>,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self {
            method: ThresholdMethod::Mean,
            radius: 15,
            k: None,
            r: None,
            c: 0.0,
            contrast_threshold: 15,
            polarity: Polarity::LightObjects,
            otsu_max_pixels: Some(4_000_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    #[error("binarization radius must be >= 1")]
    InvalidRadius,
    #[error("local otsu on {pixels} pixels exceeds the budget of {budget}")]
    OtsuBudgetExceeded { pixels: usize, budget: usize },
    #[error("method {0} does not read precomputed statistic maps")]
    StatisticsUnsupported(ThresholdMethod),
    #[error("statistic maps are {stats_w}x{stats_h} but the image is {image_w}x{image_h}")]
    SizeMismatch {
        stats_w: usize,
        stats_h: usize,
        image_w: usize,
        image_h: usize,
    },
    #[error("unknown threshold method: {0}")]
    UnknownMethod(String),
}

/// Two-valued image produced by the binarizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    image: GrayImageU8,
    polarity: Polarity,
}

impl BinaryImage {
    fn from_fn<F>(w: usize, h: usize, polarity: Polarity, mut is_object: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let object = polarity.object_value();
        let background = polarity.background_value();
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(if is_object(x, y) { object } else { background });
            }
        }
        Self {
            image: GrayImageU8::new(w, h, data),
            polarity,
        }
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }

    #[inline]
    pub fn is_object(&self, x: usize, y: usize) -> bool {
        self.image.get(x, y) == self.polarity.object_value()
    }

    /// Number of object pixels inside `[x0, x1) × [y0, y1)`.
    pub fn object_count_in(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> usize {
        let object = self.polarity.object_value();
        (y0..y1)
            .map(|y| self.image.row(y)[x0..x1].iter().filter(|&&v| v == object).count())
            .sum()
    }

    pub fn object_count(&self) -> usize {
        self.object_count_in(0, 0, self.width(), self.height())
    }

    pub fn as_view(&self) -> ImageU8<'_> {
        self.image.as_view()
    }
}

/// Binarize `image` with the configured rule.
///
/// Statistic rules share one pass of [`LocalStatistics`]; the local Otsu
/// rule runs its own histogram search and is refused above
/// `otsu_max_pixels`.
pub fn binarize(image: ImageU8<'_>, params: &BinarizeParams) -> Result<BinaryImage, ThresholdError> {
    if params.radius == 0 {
        return Err(ThresholdError::InvalidRadius);
    }
    match params.method {
        ThresholdMethod::Otsu => {
            let pixels = image.pixel_count();
            if let Some(budget) = params.otsu_max_pixels {
                if pixels > budget {
                    return Err(ThresholdError::OtsuBudgetExceeded { pixels, budget });
                }
            }
            let thresholds = local_otsu_thresholds(image, params.radius);
            Ok(BinaryImage::from_fn(
                image.w,
                image.h,
                params.polarity,
                |x, y| image.get(x, y) > thresholds.get(x, y),
            ))
        }
        _ => {
            let stats = LocalStatistics::compute(image, params.radius);
            threshold_with_stats(image, &stats, params)
        }
    }
}

/// Apply a statistic rule to `image` using precomputed maps.
pub fn threshold_with_stats(
    image: ImageU8<'_>,
    stats: &LocalStatistics,
    params: &BinarizeParams,
) -> Result<BinaryImage, ThresholdError> {
    if params.method == ThresholdMethod::Otsu {
        return Err(ThresholdError::StatisticsUnsupported(params.method));
    }
    if stats.width() != image.w || stats.height() != image.h {
        return Err(ThresholdError::SizeMismatch {
            stats_w: stats.width(),
            stats_h: stats.height(),
            image_w: image.w,
            image_h: image.h,
        });
    }
    let rule = RuleParams::resolve(params);
    Ok(BinaryImage::from_fn(
        image.w,
        image.h,
        params.polarity,
        |x, y| {
            let sample = LocalSample {
                pixel: image.get(x, y),
                min: stats.min.get(x, y),
                max: stats.max.get(x, y),
                median: stats.median.get(x, y),
                mean: stats.mean.get(x, y),
                variance: stats.variance.get(x, y),
            };
            passes(params.method, &sample, &rule)
        },
    ))
}
