/// Read access to a single-channel raster stored row by row.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Elements between the starts of consecutive rows.
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// The whole raster as one slice, when rows are packed without padding.
    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }
}

/// Row-level write access. Only owned, tightly packed buffers implement it.
pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    /// Overwrite the raster from rows computed elsewhere, top to bottom.
    ///
    /// Stops at whichever runs out first, the rows or the raster. Each row
    /// must be exactly `width()` long.
    fn fill_rows<R>(&mut self, rows: impl IntoIterator<Item = R>)
    where
        R: AsRef<[Self::Pixel]>,
    {
        for (y, row) in (0..self.height()).zip(rows) {
            self.row_mut(y).copy_from_slice(row.as_ref());
        }
    }
}

/// Top-to-bottom iterator over the rows of an [`ImageView`].
pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.image.height().saturating_sub(self.y);
        (left, Some(left))
    }
}

impl<I: ImageView> ExactSizeIterator for Rows<'_, I> {}
