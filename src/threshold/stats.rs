//! Per-pixel local statistic maps over a clipped disc neighbourhood.
use super::disc::DiscKernel;
use super::histogram::scan_row;
use crate::image::{GrayImageU8, ImageF32, ImageU8, ImageView, ImageViewMut};
use rayon::prelude::*;

/// Same-sized local minimum, maximum, median, mean and variance maps.
#[derive(Clone, Debug)]
pub struct LocalStatistics {
    pub radius: usize,
    pub min: GrayImageU8,
    pub max: GrayImageU8,
    pub median: GrayImageU8,
    pub mean: ImageF32,
    pub variance: ImageF32,
}

struct RowStats {
    min: Vec<u8>,
    max: Vec<u8>,
    median: Vec<u8>,
    mean: Vec<f32>,
    variance: Vec<f32>,
}

impl RowStats {
    fn with_width(w: usize) -> Self {
        Self {
            min: Vec::with_capacity(w),
            max: Vec::with_capacity(w),
            median: Vec::with_capacity(w),
            mean: Vec::with_capacity(w),
            variance: Vec::with_capacity(w),
        }
    }
}

impl LocalStatistics {
    /// Compute all maps for `image` with a disc of the given `radius`.
    ///
    /// Rows are independent and processed in parallel.
    pub fn compute(image: ImageU8<'_>, radius: usize) -> Self {
        let w = image.width();
        let h = image.height();
        let kernel = DiscKernel::new(radius);

        let rows: Vec<RowStats> = (0..h)
            .into_par_iter()
            .map(|y| {
                let mut out = RowStats::with_width(w);
                scan_row(&image, &kernel, y, |_, hist| {
                    let order = hist.order_stats();
                    out.min.push(order.min);
                    out.max.push(order.max);
                    out.median.push(order.median);
                    out.mean.push(hist.mean() as f32);
                    out.variance.push(hist.variance() as f32);
                });
                out
            })
            .collect();

        let mut stats = Self {
            radius,
            min: GrayImageU8::filled(w, h, 0),
            max: GrayImageU8::filled(w, h, 0),
            median: GrayImageU8::filled(w, h, 0),
            mean: ImageF32::zeros(w, h),
            variance: ImageF32::zeros(w, h),
        };
        stats.min.fill_rows(rows.iter().map(|r| &r.min));
        stats.max.fill_rows(rows.iter().map(|r| &r.max));
        stats.median.fill_rows(rows.iter().map(|r| &r.median));
        stats.mean.fill_rows(rows.iter().map(|r| &r.mean));
        stats.variance.fill_rows(rows.iter().map(|r| &r.variance));
        stats
    }

    pub fn width(&self) -> usize {
        self.min.width()
    }

    pub fn height(&self) -> usize {
        self.min.height()
    }
}
