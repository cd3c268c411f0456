//! Color descriptors: raw center patch and color histograms.
//!
//! Histograms are L1-normalized so their bins sum to one, which keeps
//! histogram intersection scores in `[0, 1]` regardless of image size.

use crate::image::{Bgr, ImageView, B, G, R};
use crate::util::math::{l1_normalize_in_place, quantize_u8, quantize_unit};
use crate::util::{CbirError, CbirResult};

/// Side length of the square block sampled by [`center_patch`].
pub const PATCH_SIZE: usize = 7;

/// Number of values produced by [`center_patch`].
pub const PATCH_LEN: usize = PATCH_SIZE * PATCH_SIZE * 3;

/// Extracts the raw 7x7 block around the image center.
///
/// The block starts three pixels before `(width / 2, height / 2)` on both
/// axes. Samples are emitted row-major with the three channels of each pixel
/// kept together in stored (B, G, R) order.
pub fn center_patch(image: ImageView<'_, Bgr>) -> CbirResult<Vec<f32>> {
    if image.width() < PATCH_SIZE || image.height() < PATCH_SIZE {
        return Err(CbirError::InvalidInput {
            reason: "image smaller than the 7x7 center patch",
        });
    }
    let half = PATCH_SIZE / 2;
    let x0 = image.width() / 2 - half;
    let y0 = image.height() / 2 - half;
    let patch = image.roi(x0, y0, PATCH_SIZE, PATCH_SIZE)?;

    let mut out = Vec::with_capacity(PATCH_LEN);
    for px in patch.pixels() {
        out.extend(px.iter().map(|&c| f32::from(c)));
    }
    Ok(out)
}

/// Builds an rg-chromaticity histogram with `bins * bins` cells.
///
/// Pixels whose channel sum is zero carry no chromaticity and are skipped.
/// The cell index is `bin_r * bins + bin_g`.
pub fn chroma_2d(image: ImageView<'_, Bgr>, bins: usize) -> CbirResult<Vec<f32>> {
    let mut hist = vec![0.0f32; histogram_len(bins, 2)?];
    for px in image.pixels() {
        let sum = u32::from(px[B]) + u32::from(px[G]) + u32::from(px[R]);
        if sum == 0 {
            continue;
        }
        let sum = sum as f32;
        let r = f32::from(px[R]) / sum;
        let g = f32::from(px[G]) / sum;
        let bin_r = quantize_unit(r, bins);
        let bin_g = quantize_unit(g, bins);
        hist[bin_r * bins + bin_g] += 1.0;
    }
    l1_normalize_in_place(&mut hist);
    Ok(hist)
}

/// Builds a joint RGB histogram with `bins^3` cells.
///
/// Red is the most significant index, blue the least:
/// `bin_r * bins^2 + bin_g * bins + bin_b`.
pub fn chroma_3d(image: ImageView<'_, Bgr>, bins: usize) -> CbirResult<Vec<f32>> {
    let mut hist = vec![0.0f32; histogram_len(bins, 3)?];
    for px in image.pixels() {
        let bin_r = quantize_u8(px[R], bins);
        let bin_g = quantize_u8(px[G], bins);
        let bin_b = quantize_u8(px[B], bins);
        hist[(bin_r * bins + bin_g) * bins + bin_b] += 1.0;
    }
    l1_normalize_in_place(&mut hist);
    Ok(hist)
}

/// Concatenates [`chroma_3d`] of the top and bottom halves.
///
/// The top half holds `height / 2` rows and the bottom half the rest, so a
/// single-row image has an empty top half whose histogram is all zeros.
pub fn multi_part_rgb(image: ImageView<'_, Bgr>, bins: usize) -> CbirResult<Vec<f32>> {
    let len = histogram_len(bins, 3)?;
    let (top, bottom) = split_rows(image)?;
    let mut out = match top {
        Some(top) => chroma_3d(top, bins)?,
        None => vec![0.0f32; len],
    };
    out.extend(chroma_3d(bottom, bins)?);
    Ok(out)
}

/// Splits a view into its top `height / 2` rows and the remaining rows.
pub fn split_rows<T>(
    image: ImageView<'_, T>,
) -> CbirResult<(Option<ImageView<'_, T>>, ImageView<'_, T>)> {
    let top_rows = image.height() / 2;
    let bottom = image.roi(0, top_rows, image.width(), image.height() - top_rows)?;
    if top_rows == 0 {
        return Ok((None, bottom));
    }
    let top = image.roi(0, 0, image.width(), top_rows)?;
    Ok((Some(top), bottom))
}

/// Largest number of cells a single histogram may have (`256^3`).
pub const MAX_HISTOGRAM_CELLS: usize = 1 << 24;

/// Returns `bins^dims`, the cell count of a `dims`-dimensional histogram.
///
/// Fails with `InvalidArgument` when `bins` is zero or the cell count exceeds
/// [`MAX_HISTOGRAM_CELLS`].
pub fn histogram_len(bins: usize, dims: u32) -> CbirResult<usize> {
    if bins == 0 {
        return Err(CbirError::InvalidArgument {
            reason: "bin count must be at least 1",
        });
    }
    match bins.checked_pow(dims) {
        Some(len) if len <= MAX_HISTOGRAM_CELLS => Ok(len),
        _ => Err(CbirError::InvalidArgument {
            reason: "bin count yields too many histogram cells",
        }),
    }
}
