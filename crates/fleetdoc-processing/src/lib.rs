//! Fleetdoc Processing Library
//!
//! The image transform pipeline of the fleet portal: validation, decode,
//! displayed-to-native crop mapping, aspect-preserving resample, quality
//! encode, and the sequential batch preparer that gates each file behind
//! the interactive crop dialog.

pub mod compression;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod upload;
pub mod validator;

pub use compression::{ImageCompressor, OutputFormat, Quality};
pub use error::ImageProcessingError;
pub use image::{CropRegion, DisplayedSize, FitDimensions, ImageProcessor, ImageResize, NativeCrop};
pub use pipeline::{transform, FormatPolicy, SourceImage, TransformOptions, TransformedFile};
pub use upload::{
    BatchOutcome, CropChoice, CropPreview, CropPrompt, FileFailure, PreparerConfig, UploadPreparer,
};
pub use validator::{MediaValidator, ValidationError};
