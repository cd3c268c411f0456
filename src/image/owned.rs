//! Owned contiguous image buffers.

use crate::image::ImageView;
use crate::util::{CbirError, CbirResult};

/// Owned contiguous image buffer with `stride == width`.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Copy> OwnedImage<T> {
    /// Creates an owned image from a contiguous row-major buffer.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> CbirResult<Self> {
        if width == 0 || height == 0 {
            return Err(CbirError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(CbirError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(CbirError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(CbirError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates an image with every pixel set to `value`.
    pub fn filled(value: T, width: usize, height: usize) -> CbirResult<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(CbirError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height)
    }

    /// Copies a (possibly strided) view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_, T>) -> CbirResult<Self> {
        let mut data = Vec::with_capacity(view.len());
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self::new(data, view.width(), view.height())
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the contiguous pixel buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the image and returns the pixel buffer.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }
}
