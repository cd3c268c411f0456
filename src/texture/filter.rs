//! Dense 2D filtering of grayscale images.
//!
//! The filter is a correlation with the anchor at the kernel center. Pixels
//! outside the image are taken from the reflected interior without repeating
//! the edge sample (`dcb|abcd|cba`), so filter responses near the border are
//! computed from real image content.

use crate::image::{ImageView, OwnedImage};
use crate::util::{CbirError, CbirResult};

/// Rectangular filter kernel stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterKernel {
    width: usize,
    height: usize,
    weights: Vec<f32>,
}

impl FilterKernel {
    /// Creates a kernel from row-major weights.
    pub fn new(weights: Vec<f32>, width: usize, height: usize) -> CbirResult<Self> {
        if width == 0 || height == 0 {
            return Err(CbirError::InvalidDimensions { width, height });
        }
        if weights.len() != width * height {
            return Err(CbirError::DimensionMismatch {
                left: weights.len(),
                right: width * height,
            });
        }
        Ok(Self {
            width,
            height,
            weights,
        })
    }

    /// Builds the outer product `column^T * row`.
    ///
    /// Kernel row `r` is `row` scaled by `column[r]`.
    pub fn outer(column: &[f32], row: &[f32]) -> CbirResult<Self> {
        let mut weights = Vec::with_capacity(column.len() * row.len());
        for &c in column {
            weights.extend(row.iter().map(|&r| c * r));
        }
        Self::new(weights, row.len(), column.len())
    }

    /// Returns the kernel width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the kernel height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the weights in row-major order.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Returns the weight at kernel row `y`, column `x`.
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.weights[y * self.width + x]
    }
}

/// Reflects `idx` into `[0, len)` without repeating the edge sample.
fn reflect_101(mut idx: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    loop {
        if idx < 0 {
            idx = -idx;
        } else if idx > last {
            idx = 2 * last - idx;
        } else {
            return idx as usize;
        }
    }
}

/// Maps padded coordinates `0..len + 2 * radius` to source coordinates.
fn border_table(len: usize, radius: usize) -> Vec<usize> {
    (0..len + 2 * radius)
        .map(|p| reflect_101(p as isize - radius as isize, len))
        .collect()
}

/// Filters a grayscale image and returns the floating-point response.
pub fn filter_2d(image: ImageView<'_, u8>, kernel: &FilterKernel) -> CbirResult<OwnedImage<f32>> {
    let width = image.width();
    let height = image.height();
    let rx = kernel.width() / 2;
    let ry = kernel.height() / 2;
    let x_map = border_table(width, rx);
    let y_map = border_table(height, ry);

    let src: Vec<f32> = image.pixels().map(f32::from).collect();
    let mut out = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for ky in 0..kernel.height() {
                let sy = y_map[y + ky];
                let src_row = &src[sy * width..(sy + 1) * width];
                let k_row = &kernel.weights()[ky * kernel.width()..(ky + 1) * kernel.width()];
                for (kx, &w) in k_row.iter().enumerate() {
                    acc += w * src_row[x_map[x + kx]];
                }
            }
            out[y * width + x] = acc;
        }
    }
    OwnedImage::new(out, width, height)
}
