//! 256-bin histogram of the disc neighbourhood, slid along image rows.
//!
//! Moving the disc one pixel to the right only touches the two end pixels of
//! each participating row span, so a full row scan costs `O(W·R)` histogram
//! updates instead of `O(W·R²)`.
use super::disc::DiscKernel;
use crate::image::{ImageU8, ImageView};

#[derive(Clone, Debug)]
pub(crate) struct DiscHistogram {
    bins: [u32; 256],
    count: u32,
    sum: u64,
    sum_sq: u64,
}

/// Order statistics extracted from one histogram state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct OrderStats {
    pub min: u8,
    pub max: u8,
    pub median: u8,
}

impl Default for DiscHistogram {
    fn default() -> Self {
        Self {
            bins: [0; 256],
            count: 0,
            sum: 0,
            sum_sq: 0,
        }
    }
}

impl DiscHistogram {
    #[inline]
    fn add(&mut self, v: u8) {
        self.bins[v as usize] += 1;
        self.count += 1;
        self.sum += v as u64;
        self.sum_sq += (v as u64) * (v as u64);
    }

    #[inline]
    fn remove(&mut self, v: u8) {
        self.bins[v as usize] -= 1;
        self.count -= 1;
        self.sum -= v as u64;
        self.sum_sq -= (v as u64) * (v as u64);
    }

    pub fn bins(&self) -> &[u32; 256] {
        &self.bins
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum as f64 / self.count as f64
    }

    /// Population variance of the neighbourhood.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean = self.sum as f64 / n;
        (self.sum_sq as f64 / n - mean * mean).max(0.0)
    }

    /// Minimum, maximum and lower median in one pass over the bins.
    pub fn order_stats(&self) -> OrderStats {
        let mut stats = OrderStats {
            min: 0,
            max: 0,
            median: 0,
        };
        if self.count == 0 {
            return stats;
        }
        let half = (self.count + 1) / 2;
        let mut seen = 0u32;
        let mut min_found = false;
        let mut median_found = false;
        for (v, &n) in self.bins.iter().enumerate() {
            if n == 0 {
                continue;
            }
            if !min_found {
                stats.min = v as u8;
                min_found = true;
            }
            seen += n;
            if !median_found && seen >= half {
                stats.median = v as u8;
                median_found = true;
            }
            stats.max = v as u8;
            if seen == self.count {
                break;
            }
        }
        stats
    }
}

/// Visit every pixel of row `y` together with the histogram of its disc
/// neighbourhood, clipped to the image.
pub(crate) fn scan_row<F>(image: &ImageU8<'_>, kernel: &DiscKernel, y: usize, mut visit: F)
where
    F: FnMut(usize, &DiscHistogram),
{
    let w = image.width();
    let h = image.height();
    if w == 0 || y >= h {
        return;
    }
    let r = kernel.radius() as isize;
    let spans: Vec<(&[u8], usize)> = (-r..=r)
        .filter_map(|dy| {
            let yy = y as isize + dy;
            (yy >= 0 && (yy as usize) < h).then(|| (image.row(yy as usize), kernel.half_width(dy)))
        })
        .collect();

    let mut hist = DiscHistogram::default();
    for &(row, hw) in &spans {
        for &v in &row[..=hw.min(w - 1)] {
            hist.add(v);
        }
    }
    visit(0, &hist);

    for x in 1..w {
        for &(row, hw) in &spans {
            if x > hw {
                hist.remove(row[x - 1 - hw]);
            }
            if x + hw < w {
                hist.add(row[x + hw]);
            }
        }
        visit(x, &hist);
    }
}
