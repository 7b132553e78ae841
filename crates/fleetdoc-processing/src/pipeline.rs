//! The image transform pipeline: decode, optional crop, fit-within
//! resample, quality encode, and packaging for multipart upload.
//!
//! `transform` is the single entry point. The CPU-bound body runs under
//! `spawn_blocking` so decode/encode of large photos never stalls the
//! cooperative executor, and the whole chain produces either a packaged
//! file or one typed error - no partial output.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::compression::{ImageCompressor, OutputFormat, Quality};
use crate::error::ImageProcessingError;
use crate::image::{CropRegion, DisplayedSize, ImageProcessor, ImageResize};

/// Raw user-selected file entering the pipeline.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Output encoding policy for one transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatPolicy {
    /// Keep the source format (JPEG stays JPEG, PNG stays PNG, ...).
    /// Used by the skip-crop path.
    #[default]
    PreserveSource,
    /// Re-encode as JPEG regardless of source. Used after a crop.
    Jpeg,
}

/// Parameters for one transform.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Crop rectangle in displayed-pixel space, with the preview size it was
    /// drawn against.
    pub crop: Option<(CropRegion, DisplayedSize)>,
    pub max_width: u32,
    pub max_height: u32,
    pub quality: Quality,
    pub format: FormatPolicy,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            crop: None,
            max_width: 1920,
            max_height: 1080,
            quality: Quality::SKIP_DEFAULT,
            format: FormatPolicy::PreserveSource,
        }
    }
}

/// A processed file ready to be appended to a multipart form.
#[derive(Debug, Clone)]
pub struct TransformedFile {
    pub data: Bytes,
    /// Original file name, so the upload keeps a sensible filename.
    pub file_name: String,
    pub content_type: String,
    /// Fresh timestamp assigned at packaging time.
    pub last_modified: DateTime<Utc>,
}

/// Run the full pipeline on one file.
pub async fn transform(
    source: SourceImage,
    options: TransformOptions,
) -> Result<TransformedFile, ImageProcessingError> {
    tokio::task::spawn_blocking(move || transform_blocking(source, options))
        .await
        .map_err(|e| ImageProcessingError::Operation(format!("Transform task failed: {}", e)))?
}

fn transform_blocking(
    source: SourceImage,
    options: TransformOptions,
) -> Result<TransformedFile, ImageProcessingError> {
    let img = ImageProcessor::decode(&source.data)?;
    let (native_width, native_height) = (img.width(), img.height());

    let output_format = match options.format {
        FormatPolicy::Jpeg => OutputFormat::Jpeg,
        FormatPolicy::PreserveSource => OutputFormat::from_content_type(&source.content_type),
    };

    let cropped = match &options.crop {
        Some((region, displayed)) => {
            let native = region.to_native(*displayed, native_width, native_height)?;
            tracing::debug!(
                file = %source.file_name,
                x = native.x,
                y = native.y,
                width = native.width,
                height = native.height,
                "Applying crop"
            );
            native.apply(&img)
        }
        None => img,
    };

    let fit = ImageResize::fit_within(
        cropped.width(),
        cropped.height(),
        options.max_width,
        options.max_height,
    );

    // Pass-through: no crop, already within bounds, format preserved. Strip
    // EXIF and keep the original bytes instead of a lossy re-encode.
    let unchanged = options.crop.is_none()
        && fit.width == native_width
        && fit.height == native_height
        && output_format == OutputFormat::from_content_type(&source.content_type);
    let (data, content_type) = if unchanged {
        let stripped = ImageProcessor::strip_exif(&source.data);
        (Bytes::from(stripped), source.content_type.clone())
    } else {
        let resized = ImageResize::apply(&cropped, fit);
        tracing::debug!(
            file = %source.file_name,
            width = fit.width,
            height = fit.height,
            format = ?output_format,
            "Encoding transformed image"
        );
        let encoded = ImageCompressor::compress(&resized, output_format, options.quality)?;
        (encoded, output_format.to_mime_type().to_string())
    };

    Ok(TransformedFile {
        data,
        file_name: source.file_name,
        content_type,
        last_modified: Utc::now(),
    })
}
