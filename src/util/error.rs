//! Error types for cbir.

use thiserror::Error;

/// Result alias for cbir operations.
pub type CbirResult<T> = std::result::Result<T, CbirError>;

/// Errors that can occur while extracting descriptors or ranking a corpus.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CbirError {
    /// The image cannot be processed by the requested extractor.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: &'static str },
    /// Two feature vectors of different lengths were compared.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    /// A parameter is outside its valid range.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
    /// Ranking was requested over a corpus with no entries.
    #[error("corpus is empty")]
    EmptyCorpus,
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The backing buffer is shorter than the dimensions require.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The row stride is shorter than the image width.
    #[error("invalid stride: width {width}, stride {stride}")]
    InvalidStride { width: usize, stride: usize },
    /// A region of interest does not fit inside the image.
    #[error(
        "roi out of bounds: x={x}, y={y}, width={width}, height={height}, image={img_width}x{img_height}"
    )]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The descriptor tag is not recognised.
    #[error("unknown descriptor tag: {tag}")]
    UnknownDescriptor { tag: String },
    /// Image decoding failed (only produced with the `image-io` feature).
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
