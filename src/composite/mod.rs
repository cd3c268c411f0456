//! Composite descriptors built from the color and texture extractors.
//!
//! The custom descriptor concatenates four L1-normalized parts, each scaled
//! by its normalized weight. The whole vector therefore still sums to one and
//! plain histogram intersection over it equals the weighted sum of the
//! per-part intersections.

use crate::color::{chroma_3d, histogram_len};
use crate::image::{Bgr, ImageView};
use crate::texture::gradient_texture;
use crate::util::{CbirError, CbirResult};

/// Number of weighted parts in [`custom`].
pub const CUSTOM_PARTS: usize = 4;

/// Concatenates the RGB histogram with the gradient-magnitude histogram.
///
/// The result has `color_bins^3 + texture_bins` values; the color part comes
/// first.
pub fn color_texture(
    image: ImageView<'_, Bgr>,
    color_bins: usize,
    texture_bins: usize,
) -> CbirResult<Vec<f32>> {
    let mut out = chroma_3d(image, color_bins)?;
    out.extend(gradient_texture(image, texture_bins)?);
    Ok(out)
}

/// Relative weights of the four parts of [`custom`].
///
/// Parts, in order: RGB histogram of the whole image, of the centered
/// half-size window, of the centered quarter-size window, and the
/// gradient-magnitude histogram of the whole image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CustomWeights(pub [f32; CUSTOM_PARTS]);

impl CustomWeights {
    /// Favors objects that fill a small region around the image center.
    pub const SMALL: Self = Self([0.1, 0.2, 0.5, 0.2]);
    /// Favors objects covering about half of the frame.
    pub const MEDIUM: Self = Self([0.2, 0.4, 0.2, 0.2]);
    /// Favors scene-scale content.
    pub const LARGE: Self = Self([0.5, 0.2, 0.1, 0.2]);

    /// Looks up a preset by name (`small`, `medium`, `large`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "small" => Some(Self::SMALL),
            "medium" => Some(Self::MEDIUM),
            "large" => Some(Self::LARGE),
            _ => None,
        }
    }

    /// Returns the weights scaled to sum to one.
    pub fn normalized(&self) -> CbirResult<[f32; CUSTOM_PARTS]> {
        if self.0.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(CbirError::InvalidArgument {
                reason: "custom weights must be finite and non-negative",
            });
        }
        let total: f32 = self.0.iter().sum();
        if total <= 0.0 {
            return Err(CbirError::InvalidArgument {
                reason: "custom weights must not all be zero",
            });
        }
        Ok(self.0.map(|w| w / total))
    }
}

impl Default for CustomWeights {
    fn default() -> Self {
        Self::MEDIUM
    }
}

/// Number of values produced by [`custom`].
pub fn custom_len(bins: usize) -> CbirResult<usize> {
    Ok(3 * histogram_len(bins, 3)? + bins)
}

/// Weighted multi-scale color and texture descriptor.
///
/// `bins` is used both per color channel and for the gradient histogram, so
/// the output has `3 * bins^3 + bins` values.
pub fn custom(
    image: ImageView<'_, Bgr>,
    bins: usize,
    weights: CustomWeights,
) -> CbirResult<Vec<f32>> {
    let len = custom_len(bins)?;
    let w = weights.normalized()?;
    let parts = [
        chroma_3d(image, bins)?,
        chroma_3d(centered_window(image, 2)?, bins)?,
        chroma_3d(centered_window(image, 4)?, bins)?,
        gradient_texture(image, bins)?,
    ];

    let mut out = Vec::with_capacity(len);
    for (part, weight) in parts.iter().zip(w) {
        out.extend(part.iter().map(|&v| v * weight));
    }
    Ok(out)
}

/// Centered window of `width / divisor` by `height / divisor` (at least 1x1).
fn centered_window(image: ImageView<'_, Bgr>, divisor: usize) -> CbirResult<ImageView<'_, Bgr>> {
    let width = (image.width() / divisor).max(1);
    let height = (image.height() / divisor).max(1);
    let x0 = (image.width() - width) / 2;
    let y0 = (image.height() - height) / 2;
    image.roi(x0, y0, width, height)
}
