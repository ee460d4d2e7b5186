//! Post-hoc spacing check of sorted boundaries.
use serde::Serialize;

/// Gaps between consecutive boundaries and the outcome of the check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingReport {
    pub gaps: Vec<usize>,
    /// Indices into `gaps` below `min_spacing`.
    pub too_close: Vec<usize>,
    /// Indices into `gaps` above `max_spacing` (outermost gaps excluded).
    pub too_far: Vec<usize>,
}

impl SpacingReport {
    pub fn is_incorrect(&self) -> bool {
        !self.too_close.is_empty() || !self.too_far.is_empty()
    }
}

/// Check the gaps of ascending `boundaries` against `[min_spacing, max_spacing]`.
///
/// The first and last gap may exceed `max_spacing`: outer tiles absorb the
/// crop slack around the plate.
pub fn check_spacing(boundaries: &[usize], min_spacing: usize, max_spacing: usize) -> SpacingReport {
    let gaps: Vec<usize> = boundaries.windows(2).map(|w| w[1] - w[0]).collect();
    let last = gaps.len().saturating_sub(1);
    let mut report = SpacingReport::default();
    for (i, &gap) in gaps.iter().enumerate() {
        if gap < min_spacing {
            report.too_close.push(i);
        }
        if gap > max_spacing && i != 0 && i != last {
            report.too_far.push(i);
        }
    }
    report.gaps = gaps;
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_spacing_passes() {
        let report = check_spacing(&[10, 60, 110, 160], 40, 60);
        assert_eq!(report.gaps, vec![50, 50, 50]);
        assert!(!report.is_incorrect());
    }

    #[test]
    fn close_boundaries_are_flagged_anywhere() {
        let report = check_spacing(&[10, 20, 70, 120], 40, 60);
        assert_eq!(report.too_close, vec![0]);
        assert!(report.is_incorrect());
    }

    #[test]
    fn outer_gaps_may_exceed_max_spacing() {
        let report = check_spacing(&[0, 100, 150, 200, 320], 40, 60);
        assert!(report.too_far.is_empty(), "{report:?}");
        assert!(!report.is_incorrect());
    }

    #[test]
    fn inner_wide_gap_is_flagged() {
        let report = check_spacing(&[0, 50, 150, 200], 40, 60);
        assert_eq!(report.too_far, vec![1]);
    }

    #[test]
    fn fewer_than_two_boundaries_have_no_gaps() {
        assert!(!check_spacing(&[5], 1, 2).is_incorrect());
        assert!(!check_spacing(&[], 1, 2).is_incorrect());
    }
}
