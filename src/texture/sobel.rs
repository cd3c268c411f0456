//! Sobel gradients and gradient-magnitude histograms.

use crate::color::histogram_len;
use crate::image::{grayscale, Bgr, ImageView, OwnedImage};
use crate::util::math::{l1_normalize_in_place, quantize_u8};
use crate::util::{CbirError, CbirResult};

/// Signed per-channel gradient sample.
pub type Gradient = [i16; 3];

const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Horizontal Sobel derivative, positive where intensity grows to the right.
pub fn sobel_x(image: ImageView<'_, Bgr>) -> CbirResult<OwnedImage<Gradient>> {
    apply_3x3(image, &SOBEL_X)
}

/// Vertical Sobel derivative, positive where intensity grows downward.
pub fn sobel_y(image: ImageView<'_, Bgr>) -> CbirResult<OwnedImage<Gradient>> {
    apply_3x3(image, &SOBEL_Y)
}

/// Applies a 3x3 kernel per channel; the one-pixel border stays zero.
fn apply_3x3(image: ImageView<'_, Bgr>, kernel: &[[i32; 3]; 3]) -> CbirResult<OwnedImage<Gradient>> {
    let width = image.width();
    let height = image.height();
    let mut out = OwnedImage::filled([0i16; 3], width, height)?;
    if width < 3 || height < 3 {
        return Ok(out);
    }

    let dst = out.data_mut();
    for y in 1..height - 1 {
        let rows = [image.row(y - 1), image.row(y), image.row(y + 1)];
        let [Some(r0), Some(r1), Some(r2)] = rows else {
            return Err(CbirError::BufferTooSmall {
                needed: (y + 2) * image.stride(),
                got: image.as_slice().len(),
            });
        };
        let window = [r0, r1, r2];
        for x in 1..width - 1 {
            let mut acc = [0i32; 3];
            for (ky, src_row) in window.iter().enumerate() {
                for kx in 0..3 {
                    let w = kernel[ky][kx];
                    if w == 0 {
                        continue;
                    }
                    let px = src_row[x + kx - 1];
                    for c in 0..3 {
                        acc[c] += w * i32::from(px[c]);
                    }
                }
            }
            dst[y * width + x] = [acc[0] as i16, acc[1] as i16, acc[2] as i16];
        }
    }
    Ok(out)
}

/// Combines two gradient images into a saturated per-channel magnitude.
///
/// Both inputs must have the same width and height.
pub fn gradient_magnitude(
    sx: ImageView<'_, Gradient>,
    sy: ImageView<'_, Gradient>,
) -> CbirResult<OwnedImage<Bgr>> {
    if sx.width() != sy.width() || sx.height() != sy.height() {
        return Err(CbirError::DimensionMismatch {
            left: sx.len(),
            right: sy.len(),
        });
    }
    let data = sx
        .pixels()
        .zip(sy.pixels())
        .map(|(gx, gy)| {
            let mut px = [0u8; 3];
            for c in 0..3 {
                let fx = f32::from(gx[c]);
                let fy = f32::from(gy[c]);
                px[c] = (fx * fx + fy * fy).sqrt().round().min(255.0) as u8;
            }
            px
        })
        .collect();
    OwnedImage::new(data, sx.width(), sx.height())
}

/// Histogram of a single-channel image over `[0, 256)` with `bins` bins.
pub fn gradient_histogram(image: ImageView<'_, u8>, bins: usize) -> CbirResult<Vec<f32>> {
    let mut hist = vec![0.0f32; histogram_len(bins, 1)?];
    for value in image.pixels() {
        hist[quantize_u8(value, bins)] += 1.0;
    }
    l1_normalize_in_place(&mut hist);
    Ok(hist)
}

/// Histogram of the luma of the Sobel gradient magnitude.
pub fn gradient_texture(image: ImageView<'_, Bgr>, bins: usize) -> CbirResult<Vec<f32>> {
    histogram_len(bins, 1)?;
    let sx = sobel_x(image)?;
    let sy = sobel_y(image)?;
    let magnitude = gradient_magnitude(sx.view(), sy.view())?;
    let gray = grayscale(magnitude.view())?;
    gradient_histogram(gray.view(), bins)
}
