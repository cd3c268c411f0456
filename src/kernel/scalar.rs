//! Scalar reference kernels.

use crate::kernel::Kernel;

/// Straightforward sequential kernel.
pub struct Scalar;

impl Kernel for Scalar {
    fn sum_sq_diff(a: &[f32], b: &[f32]) -> f32 {
        let mut acc = 0.0f32;
        for (&x, &y) in a.iter().zip(b) {
            let diff = x - y;
            acc += diff * diff;
        }
        acc
    }

    fn sum_min(a: &[f32], b: &[f32]) -> f32 {
        let mut acc = 0.0f32;
        for (&x, &y) in a.iter().zip(b) {
            acc += x.min(y);
        }
        acc
    }

    fn dot_norms(a: &[f32], b: &[f32]) -> (f32, f32, f32) {
        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;
        for (&x, &y) in a.iter().zip(b) {
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        (dot, norm_a, norm_b)
    }
}
