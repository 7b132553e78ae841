//! Typed errors for the image transform pipeline.

/// Failure while preparing one image for upload.
///
/// Failures are per-file: a batch records the failure and moves on to the
/// next file, it never aborts siblings.
#[derive(Debug, thiserror::Error)]
pub enum ImageProcessingError {
    /// The source bytes could not be decoded as an image.
    #[error("Could not decode image data: {0}")]
    Decode(String),

    /// A crop, resample, or encode step failed after a successful decode.
    #[error("Image operation failed: {0}")]
    Operation(String),
}

impl ImageProcessingError {
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn operation(err: impl std::fmt::Display) -> Self {
        Self::Operation(err.to_string())
    }
}

impl From<ImageProcessingError> for fleetdoc_core::AppError {
    fn from(err: ImageProcessingError) -> Self {
        fleetdoc_core::AppError::ImageProcessing(err.to_string())
    }
}
