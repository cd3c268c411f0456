//! Laws' texture energy measures.

use crate::image::{grayscale, Bgr, ImageView};
use crate::texture::filter::{filter_2d, FilterKernel};
use crate::util::CbirResult;

/// Level, edge, spot, wave and ripple vectors, in output order.
pub const LAWS_VECTORS: [[f32; 5]; 5] = [
    [1.0, 4.0, 6.0, 4.0, 1.0],
    [-1.0, -2.0, 0.0, 2.0, 1.0],
    [-1.0, 0.0, 2.0, 0.0, -1.0],
    [-1.0, 2.0, 0.0, -2.0, 1.0],
    [1.0, -4.0, 6.0, -4.0, 1.0],
];

/// Short names of [`LAWS_VECTORS`].
pub const LAWS_NAMES: [&str; 5] = ["L5", "E5", "S5", "W5", "R5"];

/// Number of energies produced by [`laws_texture`].
pub const LAWS_FEATURES: usize = LAWS_VECTORS.len() * LAWS_VECTORS.len();

/// Returns the 25 Laws' 5x5 masks in `(i, j)` order, `i` outer.
///
/// Mask `(i, j)` has rows taken from vector `i` and columns from vector `j`.
pub fn laws_kernels() -> CbirResult<Vec<FilterKernel>> {
    let mut kernels = Vec::with_capacity(LAWS_FEATURES);
    for column in LAWS_VECTORS.iter() {
        for row in LAWS_VECTORS.iter() {
            kernels.push(FilterKernel::outer(column, row)?);
        }
    }
    Ok(kernels)
}

/// Sums the squared response of each Laws' mask over the luma image.
///
/// The 25 energies are ordered `L5L5, L5E5, ..., R5R5`.
pub fn laws_texture(image: ImageView<'_, Bgr>) -> CbirResult<Vec<f32>> {
    let gray = grayscale(image)?;
    let mut out = Vec::with_capacity(LAWS_FEATURES);
    for kernel in laws_kernels()? {
        let response = filter_2d(gray.view(), &kernel)?;
        let energy: f64 = response
            .data()
            .iter()
            .map(|&v| f64::from(v) * f64::from(v))
            .sum();
        out.push(energy as f32);
    }
    Ok(out)
}
