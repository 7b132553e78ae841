//! Image decoding, dimension probing, and EXIF stripping.

use image::{DynamicImage, ImageReader};
use img_parts::{jpeg::Jpeg, png::Png, ImageEXIF};
use std::io::Cursor;

use crate::error::ImageProcessingError;

pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode source bytes into a bitmap, sniffing the actual format rather
    /// than trusting the declared content type.
    pub fn decode(data: &[u8]) -> Result<DynamicImage, ImageProcessingError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(ImageProcessingError::decode)?;
        reader.decode().map_err(ImageProcessingError::decode)
    }

    /// Read native dimensions from the header without a full decode. Used to
    /// size the crop-dialog preview for each file in a batch.
    pub fn probe_dimensions(data: &[u8]) -> Result<(u32, u32), ImageProcessingError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(ImageProcessingError::decode)?;
        reader.into_dimensions().map_err(ImageProcessingError::decode)
    }

    /// Remove EXIF metadata without re-encoding pixels.
    ///
    /// Only meaningful on the pass-through path: the crop and resample paths
    /// rebuild the file from raw pixels, which drops EXIF by construction.
    /// Formats img-parts cannot rewrite are returned unchanged.
    pub fn strip_exif(data: &[u8]) -> Vec<u8> {
        if let Ok(mut jpeg) = Jpeg::from_bytes(data.to_vec().into()) {
            jpeg.set_exif(None);
            return jpeg.encoder().bytes().to_vec();
        }
        if let Ok(mut png) = Png::from_bytes(data.to_vec().into()) {
            png.set_exif(None);
            return png.encoder().bytes().to_vec();
        }
        data.to_vec()
    }
}
