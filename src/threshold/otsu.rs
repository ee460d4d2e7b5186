//! Per-pixel Otsu threshold over the disc histogram.
//!
//! This is the most expensive rule: every output pixel runs a full
//! between-class variance search over its neighbourhood histogram. Callers
//! opt in explicitly and the binarizer enforces a pixel budget.
use super::disc::DiscKernel;
use super::histogram::scan_row;
use crate::image::{GrayImageU8, ImageU8, ImageView, ImageViewMut};
use rayon::prelude::*;

/// Intensity `k*` maximising the between-class variance of `bins`, where the
/// lower class is `[0, k*]`. A histogram with a single occupied bin returns
/// that bin.
pub fn otsu_threshold(bins: &[u32; 256]) -> u8 {
    let Some(lo) = bins.iter().position(|&n| n > 0) else {
        return 0;
    };
    let hi = bins.iter().rposition(|&n| n > 0).unwrap_or(lo);
    if lo == hi {
        return lo as u8;
    }

    let mut total = 0f64;
    let mut sum_total = 0f64;
    for (v, &n) in bins.iter().enumerate().take(hi + 1).skip(lo) {
        total += n as f64;
        sum_total += v as f64 * n as f64;
    }

    let mut w_b = 0f64;
    let mut sum_b = 0f64;
    let mut best_var = -1f64;
    let mut best_t = lo;
    for (t, &n) in bins.iter().enumerate().take(hi).skip(lo) {
        w_b += n as f64;
        if w_b == 0.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f <= 0.0 {
            break;
        }
        sum_b += t as f64 * n as f64;
        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;
        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = t;
        }
    }
    best_t as u8
}

/// Map of local Otsu thresholds, one per pixel.
pub fn local_otsu_thresholds(image: ImageU8<'_>, radius: usize) -> GrayImageU8 {
    let w = image.width();
    let h = image.height();
    let kernel = DiscKernel::new(radius);
    let rows: Vec<Vec<u8>> = (0..h)
        .into_par_iter()
        .map(|y| {
            let mut row = Vec::with_capacity(w);
            scan_row(&image, &kernel, y, |_, hist| {
                row.push(otsu_threshold(hist.bins()));
            });
            row
        })
        .collect();

    let mut out = GrayImageU8::filled(w, h, 0);
    out.fill_rows(rows);
    out
}
