//! Rising-tide boundary search over a brightness profile.
//!
//! Boundaries are taken greedily at the darkest remaining position. After
//! each pick, every position within `min_spacing` of it is flooded so the
//! next pick lands at least `min_spacing + 1` away. The search stops once
//! `count` boundaries are collected or the whole profile is under water.
use crate::profile::BrightnessProfile;
use log::debug;

/// Value written into flooded profile positions.
pub const FLOODED: u64 = u64::MAX;

/// Find up to `count` boundaries in `profile`, returned in ascending order.
///
/// The profile is consumed: flooding happens in place on its buffer, which
/// is dropped when the search ends.
pub fn find_boundaries(profile: BrightnessProfile, count: usize, min_spacing: usize) -> Vec<usize> {
    let mut tide = profile.into_values();
    let mut found = Vec::with_capacity(count);

    while found.len() < count {
        let Some((start, lowest)) = darkest(&tide) else {
            break;
        };
        if lowest == FLOODED {
            break;
        }

        // A dark band rather than a single dark line: take its centre.
        let boundary = if lowest == 0 {
            let end = tide[start..]
                .iter()
                .position(|&v| v != 0)
                .map_or(tide.len() - 1, |run| start + run - 1);
            (start + end + 1) / 2
        } else {
            start
        };

        found.push(boundary);
        let lo = boundary.saturating_sub(min_spacing);
        let hi = (boundary + min_spacing).min(tide.len() - 1);
        tide[lo..=hi].fill(FLOODED);
    }

    found.sort_unstable();
    debug!(
        "rising tide: {}/{} boundaries {:?} (min_spacing={})",
        found.len(),
        count,
        found,
        min_spacing
    );
    found
}

/// First index holding the smallest value.
fn darkest(values: &[u64]) -> Option<(usize, u64)> {
    let mut best: Option<(usize, u64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(values: &[u64]) -> BrightnessProfile {
        BrightnessProfile::from_values(values.to_vec())
    }

    #[test]
    fn zero_run_resolves_to_midpoint() {
        let found = find_boundaries(profile(&[50, 50, 50, 0, 0, 0, 50]), 1, 1);
        assert_eq!(found, vec![4]);
    }

    #[test]
    fn even_zero_run_rounds_up() {
        let found = find_boundaries(profile(&[9, 0, 0, 9, 9]), 1, 0);
        assert_eq!(found, vec![2]);
    }

    #[test]
    fn zero_run_reaching_the_end() {
        let found = find_boundaries(profile(&[9, 9, 0, 0, 0]), 1, 0);
        assert_eq!(found, vec![3]);
    }

    #[test]
    fn ties_pick_the_first_position() {
        let found = find_boundaries(profile(&[5, 3, 7, 3, 9]), 1, 0);
        assert_eq!(found, vec![1]);
    }

    #[test]
    fn finds_separated_minima_in_order() {
        // Minima at 5, 25, 45, 65 with values chosen so they are picked out of order.
        let mut values = vec![100u64; 70];
        values[5] = 10;
        values[25] = 3;
        values[45] = 7;
        values[65] = 1;
        let found = find_boundaries(profile(&values), 4, 10);
        assert_eq!(found, vec![5, 25, 45, 65]);
        for pair in found.windows(2) {
            assert!(pair[1] - pair[0] >= 10);
        }
    }

    #[test]
    fn flooding_suppresses_nearby_minima() {
        let mut values = vec![100u64; 40];
        values[10] = 1;
        values[14] = 2;
        values[30] = 3;
        let found = find_boundaries(profile(&values), 2, 5);
        assert_eq!(found, vec![10, 30]);
    }

    #[test]
    fn exhausted_profile_returns_fewer_boundaries() {
        let values = vec![10u64; 30];
        let found = find_boundaries(profile(&values), 10, 10);
        // Picks at 0, 11 and 22 flood the whole profile.
        assert_eq!(found, vec![0, 11, 22]);
    }

    #[test]
    fn zero_fragment_left_beside_a_flood_is_still_a_candidate() {
        // Zero runs 0..=9 and 20..=39; flooding around 30 leaves 20..=24 dry.
        let mut values = vec![0u64; 40];
        values[10..20].fill(7);
        let found = find_boundaries(profile(&values), 3, 5);
        assert_eq!(found, vec![5, 22, 30]);
        for pair in found.windows(2) {
            assert!(pair[1] - pair[0] > 5, "{found:?}");
        }
    }

    #[test]
    fn empty_profile_and_zero_count() {
        assert!(find_boundaries(profile(&[]), 3, 2).is_empty());
        assert!(find_boundaries(profile(&[1, 2, 3]), 0, 2).is_empty());
    }
}
