//! SIMD-accelerated kernels using the `wide` crate.
//!
//! The main loop processes 8 elements at a time using `f32x8`; the tail is
//! handled by the scalar path. Lane-wise accumulation changes summation
//! order, so results can differ from the scalar kernel in the last bits.

use crate::kernel::scalar::Scalar;
use crate::kernel::Kernel;
use wide::f32x8;

const LANES: usize = 8;

/// Load 8 f32 values into f32x8.
#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

/// Horizontal sum of f32x8.
#[inline]
fn hsum(v: f32x8) -> f32 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3] + arr[4] + arr[5] + arr[6] + arr[7]
}

/// `f32x8` kernel with a scalar remainder.
pub struct Simd;

impl Kernel for Simd {
    fn sum_sq_diff(a: &[f32], b: &[f32]) -> f32 {
        let simd_end = a.len() / LANES * LANES;
        let mut acc = f32x8::ZERO;
        let mut i = 0;
        while i < simd_end {
            let diff = load_f32x8(&a[i..]) - load_f32x8(&b[i..]);
            acc += diff * diff;
            i += LANES;
        }
        hsum(acc) + Scalar::sum_sq_diff(&a[simd_end..], &b[simd_end..])
    }

    fn sum_min(a: &[f32], b: &[f32]) -> f32 {
        let simd_end = a.len() / LANES * LANES;
        let mut acc = f32x8::ZERO;
        let mut i = 0;
        while i < simd_end {
            acc += load_f32x8(&a[i..]).min(load_f32x8(&b[i..]));
            i += LANES;
        }
        hsum(acc) + Scalar::sum_min(&a[simd_end..], &b[simd_end..])
    }

    fn dot_norms(a: &[f32], b: &[f32]) -> (f32, f32, f32) {
        let simd_end = a.len() / LANES * LANES;
        let mut dot = f32x8::ZERO;
        let mut norm_a = f32x8::ZERO;
        let mut norm_b = f32x8::ZERO;
        let mut i = 0;
        while i < simd_end {
            let va = load_f32x8(&a[i..]);
            let vb = load_f32x8(&b[i..]);
            dot += va * vb;
            norm_a += va * va;
            norm_b += vb * vb;
            i += LANES;
        }
        let (dot_s, na_s, nb_s) = Scalar::dot_norms(&a[simd_end..], &b[simd_end..]);
        (hsum(dot) + dot_s, hsum(norm_a) + na_s, hsum(norm_b) + nb_s)
    }
}
