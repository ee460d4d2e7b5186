//! Owned `f32` map holding one statistic per plate pixel.
//!
//! The local mean and variance maps of
//! [`LocalStatistics`](crate::threshold::LocalStatistics) use it; rows are
//! tightly packed so the map is always its own slice.
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    w: usize,
    h: usize,
    data: Vec<f32>,
}

impl ImageF32 {
    /// Zero map of `w × h` values.
    pub fn zeros(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    fn width(&self) -> usize {
        self.w
    }

    fn height(&self) -> usize {
        self.h
    }

    fn stride(&self) -> usize {
        self.w
    }

    fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.w..(y + 1) * self.w]
    }

    fn as_slice(&self) -> Option<&[f32]> {
        Some(&self.data)
    }
}

impl ImageViewMut for ImageF32 {
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        &mut self.data[y * self.w..(y + 1) * self.w]
    }
}
