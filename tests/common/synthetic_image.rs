/// Round colony stamped onto a synthetic plate.
#[derive(Clone, Copy, Debug)]
pub struct Colony {
    pub cx: usize,
    pub cy: usize,
    pub radius: usize,
}

impl Colony {
    pub fn new(cx: usize, cy: usize, radius: usize) -> Self {
        Self { cx, cy, radius }
    }

    /// Inclusive pixel extent as `(x0, y0, x1, y1)`.
    pub fn extent(&self) -> (usize, usize, usize, usize) {
        (
            self.cx - self.radius,
            self.cy - self.radius,
            self.cx + self.radius,
            self.cy + self.radius,
        )
    }
}

/// Flat `background` plate with filled discs of `foreground`.
pub fn plate_u8(
    width: usize,
    height: usize,
    background: u8,
    foreground: u8,
    colonies: &[Colony],
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![background; width * height];
    for c in colonies {
        let r2 = (c.radius * c.radius) as isize;
        let (x0, y0, x1, y1) = c.extent();
        for y in y0..=y1.min(height - 1) {
            for x in x0..=x1.min(width - 1) {
                let dx = x as isize - c.cx as isize;
                let dy = y as isize - c.cy as isize;
                if dx * dx + dy * dy <= r2 {
                    img[y * width + x] = foreground;
                }
            }
        }
    }
    img
}

/// Colonies of the given radius centred in each cell of an even
/// `rows × columns` layout with `pitch_x × pitch_y` cells.
pub fn regular_layout(
    rows: usize,
    columns: usize,
    pitch_x: usize,
    pitch_y: usize,
    radius: usize,
) -> Vec<Colony> {
    let mut out = Vec::with_capacity(rows * columns);
    for i in 0..rows {
        for j in 0..columns {
            out.push(Colony::new(
                j * pitch_x + pitch_x / 2,
                i * pitch_y + pitch_y / 2,
                radius,
            ));
        }
    }
    out
}
