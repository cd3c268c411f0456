//! Distance and similarity metrics between feature vectors.
//!
//! Each metric declares its polarity: SSD is a distance (lower is more
//! similar) while the intersection and cosine variants are similarities
//! (higher is more similar). Comparing vectors of unequal length is always
//! an error, never a silent truncation.

use crate::kernel::{Active, Kernel};
use crate::util::{CbirError, CbirResult};
use std::cmp::Ordering;
use std::fmt;

/// Direction in which scores improve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Smaller scores are better matches.
    LowerIsBetter,
    /// Larger scores are better matches.
    HigherIsBetter,
}

impl Polarity {
    /// Orders two scores best-first; NaN scores sort after every number.
    pub fn compare(self, a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => match self {
                Self::LowerIsBetter => a.total_cmp(&b),
                Self::HigherIsBetter => b.total_cmp(&a),
            },
        }
    }
}

/// Metric used to score a corpus vector against the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    /// Sum of squared differences.
    Ssd,
    /// Histogram intersection `sum(min(a_i, b_i))`.
    Intersection,
    /// Mean of the intersections over `[0, split)` and `[split, len)`.
    SplitIntersection {
        /// Index of the first element of the second part.
        split: usize,
    },
    /// Cosine of the angle between the vectors.
    Cosine,
}

impl Metric {
    /// Returns the direction in which scores improve.
    pub fn polarity(&self) -> Polarity {
        match self {
            Self::Ssd => Polarity::LowerIsBetter,
            Self::Intersection | Self::SplitIntersection { .. } | Self::Cosine => {
                Polarity::HigherIsBetter
            }
        }
    }

    /// Scores `candidate` against `target`.
    pub fn score(&self, target: &[f32], candidate: &[f32]) -> CbirResult<f32> {
        match *self {
            Self::Ssd => ssd(target, candidate),
            Self::Intersection => histogram_intersection(target, candidate),
            Self::SplitIntersection { split } => split_intersection(target, candidate, split),
            Self::Cosine => cosine_similarity(target, candidate),
        }
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ssd => "ssd",
            Self::Intersection => "intersection",
            Self::SplitIntersection { .. } => "split_intersection",
            Self::Cosine => "cosine",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SplitIntersection { split } => write!(f, "{}@{split}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

fn check_len(a: &[f32], b: &[f32]) -> CbirResult<()> {
    if a.len() != b.len() {
        return Err(CbirError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Sum of squared differences.
pub fn ssd(a: &[f32], b: &[f32]) -> CbirResult<f32> {
    check_len(a, b)?;
    Ok(Active::sum_sq_diff(a, b))
}

/// Histogram intersection; equals one for identical L1-normalized histograms.
pub fn histogram_intersection(a: &[f32], b: &[f32]) -> CbirResult<f32> {
    check_len(a, b)?;
    Ok(Active::sum_min(a, b))
}

/// Average of the intersections of the two parts split at `split`.
///
/// Requires `0 < split < len`.
pub fn split_intersection(a: &[f32], b: &[f32], split: usize) -> CbirResult<f32> {
    check_len(a, b)?;
    if split == 0 || split >= a.len() {
        return Err(CbirError::InvalidArgument {
            reason: "split point must lie strictly inside the vector",
        });
    }
    let (a_head, a_tail) = a.split_at(split);
    let (b_head, b_tail) = b.split_at(split);
    let head = Active::sum_min(a_head, b_head);
    let tail = Active::sum_min(a_tail, b_tail);
    Ok((head + tail) / 2.0)
}

/// Cosine similarity, clamped to `[-1, 1]`.
///
/// Returns NaN when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> CbirResult<f32> {
    check_len(a, b)?;
    let (dot, norm_a, norm_b) = Active::dot_norms(a, b);
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return Ok(f32::NAN);
    }
    Ok((dot / denom).clamp(-1.0, 1.0))
}
