//! Numeric helpers shared by the histogram and texture extractors.

/// Maps an 8-bit sample to one of `bins` equal-width bins over `[0, 256)`.
#[inline]
pub(crate) fn quantize_u8(value: u8, bins: usize) -> usize {
    (usize::from(value) * bins / 256).min(bins - 1)
}

/// Maps a value in `[0, 1]` to one of `bins` equal-width bins.
#[inline]
pub(crate) fn quantize_unit(value: f32, bins: usize) -> usize {
    let idx = (value * bins as f32) as usize;
    idx.min(bins - 1)
}

/// Divides every element by the total so the slice sums to one.
///
/// An all-zero slice is left untouched.
pub(crate) fn l1_normalize_in_place(values: &mut [f32]) {
    let total: f64 = values.iter().map(|&v| f64::from(v)).sum();
    if total <= 0.0 {
        return;
    }
    for value in values.iter_mut() {
        *value = (f64::from(*value) / total) as f32;
    }
}

/// Returns the population mean and standard deviation of `values`.
pub(crate) fn mean_std(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for &v in values {
        let v = f64::from(v);
        sum += v;
        sum_sq += v * v;
    }
    let mean = sum / n;
    let variance = (sum_sq / n - mean * mean).max(0.0);
    (mean as f32, variance.sqrt() as f32)
}
