/// Disc-shaped neighbourhood described by one horizontal half-width per
/// row offset `dy ∈ [-r, r]`: offset `(dx, dy)` belongs to the disc when
/// `dx² + dy² ≤ r²`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscKernel {
    radius: usize,
    half_widths: Vec<usize>,
}

impl DiscKernel {
    pub fn new(radius: usize) -> Self {
        let r2 = radius * radius;
        let half_widths = (0..=2 * radius)
            .map(|i| {
                let dy = i.abs_diff(radius);
                let rem = r2 - dy * dy;
                let mut dx = (rem as f64).sqrt() as usize;
                // guard against sqrt rounding at perfect squares
                while (dx + 1) * (dx + 1) <= rem {
                    dx += 1;
                }
                while dx * dx > rem {
                    dx -= 1;
                }
                dx
            })
            .collect();
        Self {
            radius,
            half_widths,
        }
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Half-width of the disc at vertical offset `dy` (|dy| ≤ radius).
    #[inline]
    pub fn half_width(&self, dy: isize) -> usize {
        self.half_widths[(dy + self.radius as isize) as usize]
    }

    /// Number of offsets in the unclipped disc.
    pub fn area(&self) -> usize {
        self.half_widths.iter().map(|&hw| 2 * hw + 1).sum()
    }
}
