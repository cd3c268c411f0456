//! Descriptor selection: each variant pairs an extractor with its metric.
//!
//! Target and corpus vectors must come from the same variant with the same
//! parameters; [`Descriptor::vector_len`] reports the length every vector of
//! a variant shares.

use crate::color::{
    center_patch, chroma_2d, chroma_3d, histogram_len, multi_part_rgb, PATCH_LEN,
};
use crate::composite::{color_texture, custom, custom_len, CustomWeights};
use crate::image::{Bgr, ImageView};
use crate::metric::Metric;
use crate::texture::{
    gabor_features, glcm, gradient_texture, laws_texture, GaborParams, GlcmParams, GLCM_FEATURES,
    LAWS_FEATURES,
};
use crate::trace::{trace_event, trace_span};
use crate::util::{CbirError, CbirResult};
use std::str::FromStr;

/// Every descriptor tag accepted by [`Descriptor::from_tag`].
pub const TAGS: [&str; 11] = [
    "b", "h2", "h3", "m", "t", "tc", "glcm", "laws", "gabor", "c", "e",
];

/// Feature extractor together with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Descriptor {
    /// Raw 7x7 center patch, compared with SSD.
    Baseline,
    /// rg-chromaticity histogram, compared by intersection.
    Chroma2d { bins: usize },
    /// RGB histogram, compared by intersection.
    Chroma3d { bins: usize },
    /// Top and bottom RGB histograms, compared by split intersection.
    MultiPart { bins: usize },
    /// Gradient-magnitude histogram, compared by intersection.
    Texture { bins: usize },
    /// RGB plus gradient histograms, compared by split intersection.
    ColorTexture {
        color_bins: usize,
        texture_bins: usize,
    },
    /// Co-occurrence statistics, compared with SSD.
    Glcm(GlcmParams),
    /// Laws' texture energies, compared with SSD.
    Laws,
    /// Gabor response statistics, compared with SSD.
    Gabor(GaborParams),
    /// Weighted multi-scale composite, compared by intersection.
    Custom { bins: usize, weights: CustomWeights },
    /// Externally computed embeddings, compared by cosine similarity.
    Embedding,
}

impl Descriptor {
    /// Builds the descriptor named by `tag` with default parameters.
    pub fn from_tag(tag: &str) -> CbirResult<Self> {
        let descriptor = match tag {
            "b" => Self::Baseline,
            "h2" => Self::Chroma2d { bins: 16 },
            "h3" => Self::Chroma3d { bins: 8 },
            "m" => Self::MultiPart { bins: 8 },
            "t" => Self::Texture { bins: 16 },
            "tc" => Self::ColorTexture {
                color_bins: 8,
                texture_bins: 16,
            },
            "glcm" => Self::Glcm(GlcmParams::default()),
            "laws" => Self::Laws,
            "gabor" => Self::Gabor(GaborParams::default()),
            "c" => Self::Custom {
                bins: 8,
                weights: CustomWeights::default(),
            },
            "e" => Self::Embedding,
            _ => {
                return Err(CbirError::UnknownDescriptor {
                    tag: tag.to_owned(),
                })
            }
        };
        Ok(descriptor)
    }

    /// Returns the short tag naming this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Baseline => "b",
            Self::Chroma2d { .. } => "h2",
            Self::Chroma3d { .. } => "h3",
            Self::MultiPart { .. } => "m",
            Self::Texture { .. } => "t",
            Self::ColorTexture { .. } => "tc",
            Self::Glcm(_) => "glcm",
            Self::Laws => "laws",
            Self::Gabor(_) => "gabor",
            Self::Custom { .. } => "c",
            Self::Embedding => "e",
        }
    }

    /// Returns the metric paired with this descriptor.
    pub fn metric(&self) -> Metric {
        match self {
            Self::Baseline | Self::Glcm(_) | Self::Laws | Self::Gabor(_) => Metric::Ssd,
            Self::Chroma2d { .. } | Self::Chroma3d { .. } | Self::Texture { .. } => {
                Metric::Intersection
            }
            Self::Custom { .. } => Metric::Intersection,
            Self::MultiPart { bins } => Metric::SplitIntersection {
                split: bins.saturating_pow(3),
            },
            Self::ColorTexture { color_bins, .. } => Metric::SplitIntersection {
                split: color_bins.saturating_pow(3),
            },
            Self::Embedding => Metric::Cosine,
        }
    }

    /// Returns the length of every vector this descriptor produces.
    ///
    /// Embeddings have no fixed length here and return `None`, as do bin
    /// counts that extraction would reject.
    pub fn vector_len(&self) -> Option<usize> {
        let len = match self {
            Self::Baseline => PATCH_LEN,
            Self::Chroma2d { bins } => histogram_len(*bins, 2).ok()?,
            Self::Chroma3d { bins } => histogram_len(*bins, 3).ok()?,
            Self::MultiPart { bins } => 2 * histogram_len(*bins, 3).ok()?,
            Self::Texture { bins } => histogram_len(*bins, 1).ok()?,
            Self::ColorTexture {
                color_bins,
                texture_bins,
            } => histogram_len(*color_bins, 3).ok()? + histogram_len(*texture_bins, 1).ok()?,
            Self::Glcm(_) => GLCM_FEATURES,
            Self::Laws => LAWS_FEATURES,
            Self::Gabor(params) => params.feature_len(),
            Self::Custom { bins, .. } => custom_len(*bins).ok()?,
            Self::Embedding => return None,
        };
        Some(len)
    }

    /// Extracts the feature vector of `image`.
    ///
    /// Embeddings are produced outside this crate, so extracting one fails
    /// with `InvalidArgument`.
    pub fn extract(&self, image: ImageView<'_, Bgr>) -> CbirResult<Vec<f32>> {
        let _span = trace_span!(
            "extract",
            descriptor = self.tag(),
            width = image.width(),
            height = image.height()
        )
        .entered();

        let vector = match self {
            Self::Baseline => center_patch(image)?,
            Self::Chroma2d { bins } => chroma_2d(image, *bins)?,
            Self::Chroma3d { bins } => chroma_3d(image, *bins)?,
            Self::MultiPart { bins } => multi_part_rgb(image, *bins)?,
            Self::Texture { bins } => gradient_texture(image, *bins)?,
            Self::ColorTexture {
                color_bins,
                texture_bins,
            } => color_texture(image, *color_bins, *texture_bins)?,
            Self::Glcm(params) => glcm(image, *params)?,
            Self::Laws => laws_texture(image)?,
            Self::Gabor(params) => gabor_features(image, params)?,
            Self::Custom { bins, weights } => custom(image, *bins, *weights)?,
            Self::Embedding => {
                return Err(CbirError::InvalidArgument {
                    reason: "embeddings are supplied by an external model",
                })
            }
        };

        trace_event!("extracted", len = vector.len());
        Ok(vector)
    }
}

impl FromStr for Descriptor {
    type Err = CbirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}
