/// Borrowed 8-bit grayscale plate image.
///
/// The core never writes through this view; every stage that needs a
/// modified raster allocates its own output buffer.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Wrap a tightly packed buffer (`stride == w`).
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Self {
        debug_assert!(data.len() >= w * h, "buffer smaller than w*h");
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Borrow the `w × h` window at `(x, y)`, sharing this view's stride.
    /// Returns `None` when the window leaves the image.
    pub fn window(&self, x: usize, y: usize, w: usize, h: usize) -> Option<ImageU8<'a>> {
        if x + w > self.w || y + h > self.h {
            return None;
        }
        let start = y * self.stride + x;
        let end = if h == 0 { start } else { start + (h - 1) * self.stride + w };
        let data = self.data.get(start..end.max(start))?;
        Some(ImageU8 {
            w,
            h,
            stride: self.stride,
            data,
        })
    }

    /// Sum of intensities over `[x0, x1) × [y0, y1)`. Bounds must lie inside
    /// the image.
    pub fn region_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u64 {
        let mut total = 0u64;
        for y in y0..y1 {
            let start = y * self.stride;
            total += self.data[start + x0..start + x1]
                .iter()
                .map(|&v| v as u64)
                .sum::<u64>();
        }
        total
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}
