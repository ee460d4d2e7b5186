//! Tile boundary refinement ("breathing").
//!
//! Every internal edge is allowed to move up to `breathing_space` pixels
//! towards the darkest line of the original plate image inside a band of
//! `2·breathing_space` lines centred on the edge. A tile and the neighbour
//! sharing the edge are updated by the same delta, so the shared-edge
//! invariant of [`GridMatrix`] survives every step.
//!
//! Failures are per tile and non-fatal: the tile and its neighbours keep
//! their current bounds and the outcome records why.
use crate::image::{ImageU8, ImageView};
use crate::types::{GridMatrix, TileRoi};
use log::{debug, warn};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Edge {
    Bottom,
    Right,
}

/// Why a tile kept its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BreathFailure {
    /// The search band (or the tile span it is summed over) leaves the image.
    BandOutOfBounds { edge: Edge, position: usize },
    /// Applying the shift would leave the tile or its neighbour without area.
    CollapsedTile { edge: Edge, delta: isize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BreathOutcome {
    Refined {
        row: usize,
        column: usize,
        dy: isize,
        dx: isize,
    },
    Kept {
        row: usize,
        column: usize,
        reason: BreathFailure,
    },
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingReport {
    pub refined: usize,
    pub kept: usize,
    pub outcomes: Vec<BreathOutcome>,
}

/// Best-effort edge refiner working on the original grayscale plate.
#[derive(Clone, Copy, Debug, Default)]
pub struct TileRefiner {
    pub breathing_space: usize,
    /// A single manually isolated colony has no internal edges to refine.
    pub single_colony: bool,
}

impl TileRefiner {
    pub fn new(breathing_space: usize) -> Self {
        Self {
            breathing_space,
            single_colony: false,
        }
    }

    /// Refine `grid` in place, row-major. The last row and the last column
    /// are not visited; their edges move only as neighbours of refined tiles.
    pub fn refine(&self, grid: &mut GridMatrix, image: ImageU8<'_>) -> BreathingReport {
        let mut report = BreathingReport::default();
        if self.single_colony || self.breathing_space == 0 {
            return report;
        }
        let (rows, columns) = (grid.rows(), grid.columns());
        for i in 0..rows.saturating_sub(1) {
            for j in 0..columns.saturating_sub(1) {
                let outcome = match self.breathe_tile(grid, &image, i, j) {
                    Ok((dy, dx)) => {
                        report.refined += 1;
                        BreathOutcome::Refined {
                            row: i,
                            column: j,
                            dy,
                            dx,
                        }
                    }
                    Err(reason) => {
                        report.kept += 1;
                        debug!("breathing kept tile ({i}, {j}): {reason:?}");
                        BreathOutcome::Kept {
                            row: i,
                            column: j,
                            reason,
                        }
                    }
                };
                report.outcomes.push(outcome);
            }
        }
        if report.kept > 0 {
            warn!(
                "breathing: {} tiles refined, {} kept their bounds",
                report.refined, report.kept
            );
        }
        report
    }

    fn breathe_tile(
        &self,
        grid: &mut GridMatrix,
        image: &ImageU8<'_>,
        i: usize,
        j: usize,
    ) -> Result<(isize, isize), BreathFailure> {
        // Bounds are read once, before this tile or a neighbour is touched.
        let tile = *grid.tile(i, j);
        let below = *grid.tile(i + 1, j);
        let right = *grid.tile(i, j + 1);

        let dy = darkest_shift(image, &tile, Edge::Bottom, self.breathing_space)?;
        let dx = darkest_shift(image, &tile, Edge::Right, self.breathing_space)?;

        let moved = |len: usize, delta: isize, edge: Edge| {
            len.checked_add_signed(delta)
                .filter(|&l| l > 0)
                .ok_or(BreathFailure::CollapsedTile { edge, delta })
        };
        let new_height = moved(tile.height, dy, Edge::Bottom)?;
        let new_width = moved(tile.width, dx, Edge::Right)?;
        let below_height = moved(below.height, -dy, Edge::Bottom)?;
        let right_width = moved(right.width, -dx, Edge::Right)?;

        let current = grid.tile_mut(i, j);
        current.height = new_height;
        current.width = new_width;
        let b = grid.tile_mut(i + 1, j);
        b.y = tile.bottom().wrapping_add_signed(dy);
        b.height = below_height;
        let r = grid.tile_mut(i, j + 1);
        r.x = tile.right().wrapping_add_signed(dx);
        r.width = right_width;
        Ok((dy, dx))
    }
}

/// Offset from the tile's `edge` to the darkest line of the band
/// `[edge − space, edge + space)`, summed across the tile's extent.
fn darkest_shift(
    image: &ImageU8<'_>,
    tile: &TileRoi,
    edge: Edge,
    space: usize,
) -> Result<isize, BreathFailure> {
    let (position, limit, span_end, span_limit) = match edge {
        Edge::Bottom => (tile.bottom(), image.height(), tile.right(), image.width()),
        Edge::Right => (tile.right(), image.width(), tile.bottom(), image.height()),
    };
    if position < space || position + space > limit || span_end > span_limit {
        return Err(BreathFailure::BandOutOfBounds { edge, position });
    }

    let lo = position - space;
    let mut best = (lo, u64::MAX);
    for line in lo..position + space {
        let sum = match edge {
            Edge::Bottom => image.region_sum(tile.x, line, tile.right(), line + 1),
            Edge::Right => image.region_sum(line, tile.y, line + 1, tile.bottom()),
        };
        if sum < best.1 {
            best = (line, sum);
        }
    }
    Ok(best.0 as isize - position as isize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;

    /// Bright image with dark horizontal and vertical lines at the given rows/columns.
    fn lined_image(w: usize, h: usize, rows: &[usize], cols: &[usize]) -> Vec<u8> {
        let mut data = vec![200u8; w * h];
        for &y in rows {
            for x in 0..w {
                data[y * w + x] = 10;
            }
        }
        for &x in cols {
            for y in 0..h {
                data[y * w + x] = 10;
            }
        }
        data
    }

    #[test]
    fn edges_move_to_dark_lines() {
        let (w, h) = (100usize, 100usize);
        let data = lined_image(w, h, &[47], &[53]);
        let image = ImageU8::new(w, h, &data);
        let mut grid = build_grid(&[10, 50, 90], &[10, 50, 90]);
        let report = TileRefiner::new(5).refine(&mut grid, image);

        assert!(grid.is_partition());
        assert_eq!(grid.tile(0, 0).bottom(), 47);
        assert_eq!(grid.tile(1, 0).y, 47);
        assert_eq!(grid.tile(0, 0).right(), 53);
        assert_eq!(grid.tile(0, 1).x, 53);
        // Last row and last column are never visited themselves.
        assert_eq!(grid.tile(1, 0).right(), 50);
        assert_eq!(grid.tile(1, 1).x, 50);
        assert_eq!(grid.tile(0, 1).bottom(), 50);
        assert_eq!(grid.tile(1, 1).y, 50);
        assert_eq!(grid.tile(1, 1).bottom(), 90);
        assert_eq!(grid.tile(1, 1).right(), 90);
        assert_eq!(report.kept, 0);
        assert_eq!(report.refined, 1);
    }

    #[test]
    fn shifts_never_exceed_breathing_space() {
        let (w, h) = (120usize, 120usize);
        let data = lined_image(w, h, &[20, 70], &[33, 81]);
        let image = ImageU8::new(w, h, &data);
        let before = build_grid(&[5, 40, 80, 115], &[5, 40, 80, 115]);
        let mut after = before.clone();
        let space = 6;
        TileRefiner::new(space).refine(&mut after, image);
        assert!(after.is_partition());
        for (i, j, t) in after.iter() {
            let b = before.tile(i, j);
            assert!(t.x.abs_diff(b.x) <= space, "left edge of ({i},{j})");
            assert!(t.y.abs_diff(b.y) <= space, "top edge of ({i},{j})");
            assert!(t.right().abs_diff(b.right()) <= space, "right edge of ({i},{j})");
            assert!(t.bottom().abs_diff(b.bottom()) <= space, "bottom edge of ({i},{j})");
        }
    }

    #[test]
    fn band_outside_the_image_keeps_the_tile() {
        let (w, h) = (60usize, 60usize);
        let data = vec![100u8; w * h];
        let image = ImageU8::new(w, h, &data);
        // Bottom edge of the first row sits at 58: band [50, 66) leaves the image.
        let mut grid = build_grid(&[0, 58, 60], &[0, 30, 60]);
        let original = grid.clone();
        let report = TileRefiner::new(8).refine(&mut grid, image);
        assert_eq!(report.kept, 1);
        assert_eq!(report.outcomes.len(), 1);
        assert!(matches!(
            report.outcomes[0],
            BreathOutcome::Kept {
                row: 0,
                column: 0,
                reason: BreathFailure::BandOutOfBounds {
                    edge: Edge::Bottom,
                    position: 58
                }
            }
        ));
        assert_eq!(grid.tile(0, 0), original.tile(0, 0));
        assert_eq!(grid.tile(0, 1), original.tile(0, 1));
        assert_eq!(grid.tile(1, 0).y, 58);
        assert!(grid.is_partition());
    }

    #[test]
    fn collapsing_shift_is_rejected() {
        let (w, h) = (40usize, 40usize);
        let data = lined_image(w, h, &[14], &[]);
        let image = ImageU8::new(w, h, &data);
        // The first row is 2 lines tall; the dark line at 14 would shift its
        // bottom edge by -3.
        let mut grid = build_grid(&[15, 17, 30], &[0, 20, 40]);
        let original = grid.clone();
        let report = TileRefiner::new(4).refine(&mut grid, image);
        assert!(matches!(
            report.outcomes[0],
            BreathOutcome::Kept {
                reason: BreathFailure::CollapsedTile { edge: Edge::Bottom, .. },
                ..
            }
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn single_colony_and_zero_space_are_no_ops() {
        let data = lined_image(50, 50, &[20], &[20]);
        let image = ImageU8::new(50, 50, &data);
        let original = build_grid(&[0, 25, 50], &[0, 25, 50]);

        let mut grid = original.clone();
        let refiner = TileRefiner {
            breathing_space: 5,
            single_colony: true,
        };
        assert!(refiner.refine(&mut grid, image).outcomes.is_empty());
        assert_eq!(grid, original);

        let mut grid = original.clone();
        TileRefiner::new(0).refine(&mut grid, image);
        assert_eq!(grid, original);
    }
}
