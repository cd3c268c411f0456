//! Inner-loop reductions behind the distance metrics.
//!
//! Every kernel assumes its two inputs already have equal length; the
//! metric layer validates lengths before dispatching here.

/// Reduction kernels over pairs of equal-length `f32` slices.
pub trait Kernel {
    /// Returns `sum((a_i - b_i)^2)`.
    fn sum_sq_diff(a: &[f32], b: &[f32]) -> f32;

    /// Returns `sum(min(a_i, b_i))`.
    fn sum_min(a: &[f32], b: &[f32]) -> f32;

    /// Returns `(a . b, a . a, b . b)`.
    fn dot_norms(a: &[f32], b: &[f32]) -> (f32, f32, f32);
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

/// Kernel used by the metric layer: SIMD when enabled, scalar otherwise.
#[cfg(not(feature = "simd"))]
pub(crate) type Active = scalar::Scalar;
#[cfg(feature = "simd")]
pub(crate) type Active = simd::Simd;
