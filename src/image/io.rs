//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Decoded pixels are
//! reordered to blue, green, red so extractors see the same channel layout
//! regardless of the source format.

use crate::image::{Bgr, OwnedImage};
use crate::util::{CbirError, CbirResult};
use std::path::Path;

/// Creates an owned BGR image from an RGB image buffer.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> CbirResult<OwnedImage<Bgr>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.pixels().map(|px| [px[2], px[1], px[0]]).collect();
    OwnedImage::new(data, width, height)
}

/// Creates an owned BGR image from a dynamic image, dropping any alpha.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> CbirResult<OwnedImage<Bgr>> {
    let rgb = img.to_rgb8();
    owned_from_rgb_image(&rgb)
}

/// Loads an image from disk as a three-channel BGR image.
pub fn load_bgr_image<P: AsRef<Path>>(path: P) -> CbirResult<OwnedImage<Bgr>> {
    let img = image::open(path).map_err(|err| CbirError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
