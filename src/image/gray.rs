//! Luma conversion for color images.

use crate::image::{Bgr, ImageView, OwnedImage, B, G, R};
use crate::util::CbirResult;

// BT.601 weights in 14-bit fixed point.
const W_B: u32 = 1868;
const W_G: u32 = 9617;
const W_R: u32 = 4899;
const SHIFT: u32 = 14;

/// Converts one BGR pixel to an 8-bit luma value.
#[inline]
pub fn bgr_to_gray(px: Bgr) -> u8 {
    let acc = u32::from(px[B]) * W_B + u32::from(px[G]) * W_G + u32::from(px[R]) * W_R;
    ((acc + (1 << (SHIFT - 1))) >> SHIFT) as u8
}

/// Converts a color view to a single-channel luma image.
pub fn grayscale(image: ImageView<'_, Bgr>) -> CbirResult<OwnedImage<u8>> {
    let data = image.pixels().map(bgr_to_gray).collect();
    OwnedImage::new(data, image.width(), image.height())
}
