//! Gray-level co-occurrence statistics.
//!
//! The co-occurrence matrix counts ordered (pixel, neighbour) gray-level
//! pairs for a single displacement. Pairs whose neighbour falls outside the
//! image are not counted; the matrix is not symmetrized.

use crate::image::{grayscale, Bgr, ImageView};
use crate::util::math::quantize_u8;
use crate::util::{CbirError, CbirResult};

/// Number of statistics produced by [`glcm`].
pub const GLCM_FEATURES: usize = 5;

/// Displacement direction between a pixel and its neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlcmAngle {
    /// Neighbour to the right.
    Deg0,
    /// Neighbour up and to the right.
    Deg45,
    /// Neighbour straight up.
    Deg90,
    /// Neighbour up and to the left.
    Deg135,
}

impl GlcmAngle {
    /// Parses an angle in degrees; only the four principal directions exist.
    pub fn from_degrees(degrees: u32) -> CbirResult<Self> {
        match degrees {
            0 => Ok(Self::Deg0),
            45 => Ok(Self::Deg45),
            90 => Ok(Self::Deg90),
            135 => Ok(Self::Deg135),
            _ => Err(CbirError::InvalidArgument {
                reason: "glcm angle must be 0, 45, 90 or 135 degrees",
            }),
        }
    }

    /// Returns the angle in degrees.
    pub fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg45 => 45,
            Self::Deg90 => 90,
            Self::Deg135 => 135,
        }
    }

    /// Returns the `(dx, dy)` offset for `distance`, with `y` growing downward.
    pub fn offset(self, distance: usize) -> (isize, isize) {
        let d = distance as isize;
        match self {
            Self::Deg0 => (d, 0),
            Self::Deg45 => (d, -d),
            Self::Deg90 => (0, -d),
            Self::Deg135 => (-d, -d),
        }
    }
}

/// Parameters for [`glcm`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlcmParams {
    /// Pixel distance between the pair members.
    pub distance: usize,
    /// Pair direction.
    pub angle: GlcmAngle,
    /// Number of gray levels after requantization (1..=256).
    pub levels: usize,
}

impl Default for GlcmParams {
    fn default() -> Self {
        Self {
            distance: 1,
            angle: GlcmAngle::Deg0,
            levels: 8,
        }
    }
}

/// Normalized co-occurrence matrix with `levels * levels` cells.
#[derive(Clone, Debug, PartialEq)]
pub struct CoMatrix {
    levels: usize,
    probs: Vec<f32>,
}

impl CoMatrix {
    /// Returns the number of gray levels.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Returns the probability of the pair `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.probs[i * self.levels + j]
    }

    /// Returns the probabilities in row-major order.
    pub fn probabilities(&self) -> &[f32] {
        &self.probs
    }

    /// Returns `[energy, entropy, contrast, homogeneity, max_probability]`.
    pub fn features(&self) -> [f32; GLCM_FEATURES] {
        let mut energy = 0.0f64;
        let mut entropy = 0.0f64;
        let mut contrast = 0.0f64;
        let mut homogeneity = 0.0f64;
        let mut max_p = 0.0f32;
        for i in 0..self.levels {
            for j in 0..self.levels {
                let p32 = self.get(i, j);
                if p32 <= 0.0 {
                    continue;
                }
                let p = f64::from(p32);
                let diff = i.abs_diff(j) as f64;
                energy += p * p;
                entropy -= p * p.log2();
                contrast += p * diff * diff;
                homogeneity += p / (1.0 + diff);
                max_p = max_p.max(p32);
            }
        }
        [
            energy as f32,
            entropy as f32,
            contrast as f32,
            homogeneity as f32,
            max_p,
        ]
    }
}

/// Builds the normalized co-occurrence matrix of the image luma.
pub fn co_occurrence(image: ImageView<'_, Bgr>, params: GlcmParams) -> CbirResult<CoMatrix> {
    if params.distance == 0 {
        return Err(CbirError::InvalidArgument {
            reason: "glcm distance must be at least 1",
        });
    }
    if params.levels == 0 || params.levels > 256 {
        return Err(CbirError::InvalidArgument {
            reason: "glcm levels must be in 1..=256",
        });
    }

    let levels = params.levels;
    let gray = grayscale(image)?;
    let quantized: Vec<usize> = gray
        .data()
        .iter()
        .map(|&v| quantize_u8(v, levels))
        .collect();

    let width = gray.width() as isize;
    let height = gray.height() as isize;
    let (dx, dy) = params.angle.offset(params.distance);
    let mut counts = vec![0u64; levels * levels];
    let mut pairs = 0u64;
    for y in 0..height {
        let ny = y + dy;
        if ny < 0 || ny >= height {
            continue;
        }
        for x in 0..width {
            let nx = x + dx;
            if nx < 0 || nx >= width {
                continue;
            }
            let i = quantized[(y * width + x) as usize];
            let j = quantized[(ny * width + nx) as usize];
            counts[i * levels + j] += 1;
            pairs += 1;
        }
    }
    if pairs == 0 {
        return Err(CbirError::InvalidInput {
            reason: "image too small for the glcm displacement",
        });
    }

    let total = pairs as f64;
    let probs = counts.iter().map(|&c| (c as f64 / total) as f32).collect();
    Ok(CoMatrix { levels, probs })
}

/// Computes the five co-occurrence statistics for one displacement.
///
/// Output order is energy, entropy (base 2), contrast, homogeneity and the
/// largest cell probability.
pub fn glcm(image: ImageView<'_, Bgr>, params: GlcmParams) -> CbirResult<Vec<f32>> {
    let matrix = co_occurrence(image, params)?;
    Ok(matrix.features().to_vec())
}
