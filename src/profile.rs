//! Row and column brightness profiles.
//!
//! A profile reduces an image to one intensity sum per row (or column). Gaps
//! between colony rows show up as minima of the row profile.
//!
//! Binary images are profiled by object-pixel count, so the polarity only
//! decides the stored pixel values and never where the gaps are.
use crate::image::ImageView;
use crate::threshold::BinaryImage;

/// One intensity sum per row or per column of an image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrightnessProfile {
    values: Vec<u64>,
}

impl BrightnessProfile {
    pub fn from_values(values: Vec<u64>) -> Self {
        Self { values }
    }

    /// Per-row sums; length equals the image height.
    pub fn rows<I: ImageView<Pixel = u8>>(image: &I) -> Self {
        let values = image
            .rows()
            .map(|row| row.iter().map(|&v| v as u64).sum())
            .collect();
        Self { values }
    }

    /// Per-column sums; length equals the image width.
    pub fn columns<I: ImageView<Pixel = u8>>(image: &I) -> Self {
        let mut values = vec![0u64; image.width()];
        for row in image.rows() {
            for (acc, &v) in values.iter_mut().zip(row) {
                *acc += v as u64;
            }
        }
        Self { values }
    }

    /// Object pixels per row.
    pub fn binary_rows(image: &BinaryImage) -> Self {
        let w = image.width();
        let values = (0..image.height())
            .map(|y| image.object_count_in(0, y, w, y + 1) as u64)
            .collect();
        Self { values }
    }

    /// Object pixels per column.
    pub fn binary_columns(image: &BinaryImage) -> Self {
        let mut values = vec![0u64; image.width()];
        for y in 0..image.height() {
            for (x, acc) in values.iter_mut().enumerate() {
                *acc += u64::from(image.is_object(x, y));
            }
        }
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub(crate) fn into_values(self) -> Vec<u64> {
        self.values
    }
}
