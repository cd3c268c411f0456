//! cbir is a content-based image retrieval engine.
//!
//! Images are summarized by feature vectors (raw patches, color histograms,
//! texture statistics or composites of these) and a corpus of vectors is
//! ranked against a target with the metric paired to the descriptor. All
//! extractors and metrics are pure functions over borrowed inputs; decoding
//! and persistence live outside the core (see the `image-io` feature and the
//! `cbir-cli` crate).
//!
//! ```
//! use cbir::{rank, CorpusEntry, Descriptor, ImageView};
//!
//! let pixels = vec![[10u8, 20, 30]; 16 * 16];
//! let image = ImageView::from_slice(&pixels, 16, 16).unwrap();
//! let descriptor = Descriptor::Chroma3d { bins: 4 };
//! let target = descriptor.extract(image).unwrap();
//! let corpus = vec![CorpusEntry::new("self", target.clone())];
//! let ranked = rank(&target, &corpus, descriptor.metric(), 3).unwrap();
//! assert_eq!(ranked[0].id, "self");
//! ```

pub mod color;
pub mod composite;
pub mod descriptor;
pub mod image;
pub mod kernel;
pub mod metric;
pub mod rank;
pub mod texture;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use color::{center_patch, chroma_2d, chroma_3d, multi_part_rgb};
pub use composite::{color_texture, custom, CustomWeights};
pub use descriptor::Descriptor;
pub use crate::image::{grayscale, Bgr, ImageView, OwnedImage};
pub use metric::{
    cosine_similarity, histogram_intersection, split_intersection, ssd, Metric, Polarity,
};
pub use rank::{rank, without_self, CorpusEntry, RankConfig, Ranker, ScoredMatch};
pub use texture::{
    gabor_features, glcm, gradient_histogram, gradient_magnitude, laws_texture, sobel_x, sobel_y,
    GaborParams, GlcmAngle, GlcmParams,
};
pub use util::{CbirError, CbirResult};
