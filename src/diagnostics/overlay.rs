//! Diagnostic rendering of a grid over the plate.
use crate::image::{GrayImageU8, ImageU8};
use crate::types::GridMatrix;

/// Copy `image` and outline every tile of `grid` with `line_value`.
/// Tile edges outside the image are clipped.
pub fn render_grid_overlay(image: ImageU8<'_>, grid: &GridMatrix, line_value: u8) -> GrayImageU8 {
    let mut out = GrayImageU8::from_view(&image);
    let (w, h) = (out.width(), out.height());
    if w == 0 || h == 0 {
        return out;
    }
    for (_, _, tile) in grid.iter() {
        if tile.width == 0 || tile.height == 0 {
            continue;
        }
        let x0 = tile.x.min(w - 1);
        let y0 = tile.y.min(h - 1);
        let x1 = (tile.right() - 1).min(w - 1);
        let y1 = (tile.bottom() - 1).min(h - 1);
        for x in x0..=x1 {
            out.set(x, y0, line_value);
            out.set(x, y1, line_value);
        }
        for y in y0..=y1 {
            out.set(x0, y, line_value);
            out.set(x1, y, line_value);
        }
    }
    out
}
