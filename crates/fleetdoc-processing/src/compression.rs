//! Quality-controlled image encoding.
//!
//! The pipeline encodes to JPEG via mozjpeg, WebP via the libwebp encoder,
//! and PNG losslessly via the `image` crate. Quality is the portal's 0-1
//! fidelity knob, mapped to each encoder's own scale here.

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::error::ImageProcessingError;

/// Lossy-encode fidelity in the 0-1 range the portal exposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f32);

impl Quality {
    /// Default after an applied crop.
    pub const CROP_DEFAULT: Quality = Quality(0.90);
    /// Default when the user skipped cropping.
    pub const SKIP_DEFAULT: Quality = Quality(0.80);

    pub fn new(value: f32) -> Result<Self, ImageProcessingError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ImageProcessingError::Operation(format!(
                "Quality must be between 0 and 1, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Encoder-scale quality (1-100) for JPEG and WebP.
    pub fn percent(self) -> f32 {
        (self.0 * 100.0).round().clamp(1.0, 100.0)
    }
}

/// Concrete encode target for one transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// Map a source content type to the format that preserves it.
    /// Anything the pipeline cannot re-encode in place falls back to JPEG.
    pub fn from_content_type(content_type: &str) -> OutputFormat {
        match content_type.to_lowercase().as_str() {
            "image/png" => OutputFormat::Png,
            "image/webp" => OutputFormat::WebP,
            "image/jpeg" | "image/jpg" => OutputFormat::Jpeg,
            _ => OutputFormat::Jpeg,
        }
    }

    pub fn to_mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }
}

/// Stateless encoder front-end.
pub struct ImageCompressor;

impl ImageCompressor {
    /// Encode `img` at the given quality. PNG ignores quality (lossless).
    pub fn compress(
        img: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Bytes, ImageProcessingError> {
        match format {
            OutputFormat::Jpeg => Self::compress_jpeg(img, quality),
            OutputFormat::Png => Self::compress_png(img),
            OutputFormat::WebP => Self::compress_webp(img, quality),
        }
    }

    fn compress_jpeg(img: &DynamicImage, quality: Quality) -> Result<Bytes, ImageProcessingError> {
        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(quality.percent());
        comp.set_progressive_mode();
        comp.set_optimize_coding(true);

        let mut comp = comp
            .start_compress(Vec::new())
            .map_err(ImageProcessingError::operation)?;
        comp.write_scanlines(&rgb_img)
            .map_err(ImageProcessingError::operation)?;
        let jpeg_data = comp.finish().map_err(ImageProcessingError::operation)?;

        Ok(Bytes::from(jpeg_data))
    }

    fn compress_png(img: &DynamicImage) -> Result<Bytes, ImageProcessingError> {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        img.write_to(&mut cursor, ImageFormat::Png)
            .map_err(ImageProcessingError::operation)?;
        Ok(Bytes::from(buffer))
    }

    fn compress_webp(img: &DynamicImage, quality: Quality) -> Result<Bytes, ImageProcessingError> {
        let (width, height) = (img.width(), img.height());
        let rgba_img = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
        let webp_data = encoder.encode(quality.percent());

        Ok(Bytes::copy_from_slice(&webp_data))
    }
}
