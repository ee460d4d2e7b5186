//! Foreground tests of the local thresholding rules.
use super::{BinarizeParams, Polarity, ThresholdMethod};

/// Phansalkar exponential weight.
const PHANSALKAR_P: f32 = 2.0;
/// Phansalkar exponential decay.
const PHANSALKAR_Q: f32 = 10.0;

/// Local statistics at one pixel.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalSample {
    pub pixel: u8,
    pub min: u8,
    pub max: u8,
    pub median: u8,
    pub mean: f32,
    pub variance: f32,
}

/// Tunables after per-method defaults have been applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RuleParams {
    pub k: f32,
    pub r: f32,
    pub c: f32,
    pub contrast_threshold: u8,
}

impl RuleParams {
    pub fn resolve(params: &BinarizeParams) -> Self {
        let (k_default, r_default) = match params.method {
            ThresholdMethod::Niblack => match params.polarity {
                Polarity::LightObjects => (0.2, 0.0),
                Polarity::DarkObjects => (-0.2, 0.0),
            },
            ThresholdMethod::Sauvola => (0.5, 128.0),
            ThresholdMethod::Phansalkar => (0.25, 0.5),
            _ => (0.0, 0.0),
        };
        Self {
            k: params.k.unwrap_or(k_default),
            r: params.r.unwrap_or(r_default),
            c: params.c,
            contrast_threshold: params.contrast_threshold,
        }
    }
}

/// True when the pixel passes the method's foreground test. `Otsu` is not a
/// statistic rule and never passes here.
pub(crate) fn passes(method: ThresholdMethod, s: &LocalSample, p: &RuleParams) -> bool {
    let pixel = s.pixel as f32;
    let mid = (s.max as f32 + s.min as f32) / 2.0;
    match method {
        ThresholdMethod::Bernsen => {
            if s.max - s.min < p.contrast_threshold {
                mid >= 128.0
            } else {
                pixel >= mid
            }
        }
        ThresholdMethod::Contrast => {
            (s.max as i32 - s.pixel as i32).abs() <= (s.pixel as i32 - s.min as i32).abs()
        }
        ThresholdMethod::Mean => pixel > s.mean - p.c,
        ThresholdMethod::Median => pixel > s.median as f32 - p.c,
        ThresholdMethod::MidGrey => pixel > mid - p.c,
        ThresholdMethod::Niblack => pixel > s.mean + p.k * s.variance.sqrt() - p.c,
        ThresholdMethod::Sauvola => {
            pixel > s.mean * (1.0 + p.k * (s.variance.sqrt() / p.r - 1.0))
        }
        ThresholdMethod::Phansalkar => {
            let v = pixel / 255.0;
            let mean = s.mean / 255.0;
            let stdev = s.variance.sqrt() / 255.0;
            v > mean
                * (1.0
                    + PHANSALKAR_P * (-PHANSALKAR_Q * mean).exp()
                    + p.k * (stdev / p.r - 1.0))
        }
        ThresholdMethod::Otsu => false,
    }
}
