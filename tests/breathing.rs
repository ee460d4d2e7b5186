mod common;

use common::synthetic_image::{plate_u8, regular_layout};
use plate_grid::grid::{BreathOutcome, TileRefiner};
use plate_grid::image::ImageU8;
use plate_grid::stages::build_grid;
use plate_grid::types::TileRoi;
use plate_grid::{PlateSegmenter, SegmentationSettings};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn breathing_keeps_colonies_inside_their_tiles() {
    init_logger();
    let (width, height) = (400usize, 300usize);
    let colonies = regular_layout(2, 2, 200, 150, 30);
    let buffer = plate_u8(width, height, 30, 200, &colonies);
    let image = ImageU8::new(width, height, &buffer);

    let settings = SegmentationSettings {
        rows: 2,
        columns: 2,
        min_spacing: 100,
        max_spacing: 300,
        breathing_space: 10,
        ..Default::default()
    };
    let report = PlateSegmenter::new(settings).segment_with_diagnostics(image);
    let grid = &report.result.grid;

    assert!(!report.result.flags.any(), "flags: {:?}", report.result.flags);
    assert!(grid.is_partition());

    let breathing = report.trace.breathing.as_ref().expect("breathing ran");
    // Only the top-left tile has both a lower and a right neighbour.
    assert_eq!(breathing.report.refined, 1);
    assert_eq!(breathing.report.kept, 0);
    for outcome in &breathing.report.outcomes {
        match *outcome {
            BreathOutcome::Refined { dy, dx, .. } => {
                assert!(dy.abs() <= 10 && dx.abs() <= 10, "{outcome:?}");
            }
            BreathOutcome::Kept { .. } => panic!("unexpected {outcome:?}"),
        }
    }

    for (idx, c) in colonies.iter().enumerate() {
        let (x0, y0, x1, y1) = c.extent();
        let colony = TileRoi::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1);
        let tile = grid.tile(idx / 2, idx % 2);
        assert!(tile.contains(&colony), "tile {tile:?} misses {colony:?}");
    }
}

#[test]
fn edges_settle_on_dark_gutters() {
    init_logger();
    let (width, height) = (120usize, 100usize);
    let mut buffer = vec![150u8; width * height];
    // Gutters at row 47 and column 64.
    for x in 0..width {
        buffer[47 * width + x] = 10;
    }
    for y in 0..height {
        buffer[y * width + 64] = 10;
    }
    let image = ImageU8::new(width, height, &buffer);

    let mut grid = build_grid(&[0, 50, 100], &[0, 60, 120]);
    let report = TileRefiner::new(6).refine(&mut grid, image);

    assert_eq!(report.kept, 0, "{:?}", report.outcomes);
    assert_eq!(report.refined, 1);
    assert_eq!(grid.tile(0, 0).bottom(), 47);
    assert_eq!(grid.tile(0, 0).right(), 64);
    assert_eq!(grid.tile(1, 0).y, 47);
    assert_eq!(grid.tile(0, 1).x, 64);
    // The last row keeps its right edge and the last column its bottom edge.
    assert_eq!(grid.tile(1, 0).right(), 60);
    assert_eq!(grid.tile(0, 1).bottom(), 50);
    assert!(grid.is_partition());
}
