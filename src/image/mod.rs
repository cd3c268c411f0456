//! Image views and owned buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. ROI slices are zero-copy
//! views into the same backing slice and retain the original stride.
//!
//! Color images store one `Bgr` element per pixel with channels ordered blue,
//! green, red. Width is the column count and height the row count.

use crate::util::{CbirError, CbirResult};

mod gray;
#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use gray::{bgr_to_gray, grayscale};
pub use owned::OwnedImage;

/// One color pixel with channels in blue, green, red order.
pub type Bgr = [u8; 3];

/// Channel index of blue inside a `Bgr` pixel.
pub const B: usize = 0;
/// Channel index of green inside a `Bgr` pixel.
pub const G: usize = 1;
/// Channel index of red inside a `Bgr` pixel.
pub const R: usize = 2;

/// Borrowed 2D image view with an explicit stride.
#[derive(Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<T> Clone for ImageView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ImageView<'_, T> {}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> CbirResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> CbirResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(CbirError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width (column count).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height (row count).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the number of pixels covered by the view.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Views are never empty; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Iterates rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> {
        let view = *self;
        (0..self.height).filter_map(move |y| view.row(y))
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> CbirResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(CbirError::InvalidDimensions { width, height });
        }

        let out_of_bounds = CbirError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .ok_or(CbirError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let data = self.data.get(start..).ok_or(CbirError::BufferTooSmall {
            needed: start.saturating_add(1),
            got: self.data.len(),
        })?;

        ImageView::new(data, width, height, self.stride)
    }
}

impl<'a, T: Copy> ImageView<'a, T> {
    /// Iterates all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = T> + 'a {
        self.rows().flat_map(|row| row.iter().copied())
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> CbirResult<usize> {
    if width == 0 || height == 0 {
        return Err(CbirError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(CbirError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(CbirError::InvalidDimensions { width, height })?;
    Ok(needed)
}
