//! Texture descriptors.
//!
//! Gradient histograms work on Sobel derivatives of the color image; the
//! co-occurrence, Laws and Gabor descriptors operate on its luma.

pub mod filter;
mod gabor;
mod glcm;
mod laws;
mod sobel;

pub use gabor::{gabor_features, gabor_kernel, GaborParams};
pub use glcm::{co_occurrence, glcm, CoMatrix, GlcmAngle, GlcmParams, GLCM_FEATURES};
pub use laws::{laws_kernels, laws_texture, LAWS_FEATURES, LAWS_NAMES, LAWS_VECTORS};
pub use sobel::{
    gradient_histogram, gradient_magnitude, gradient_texture, sobel_x, sobel_y, Gradient,
};
