//! Crop-rectangle mapping from displayed to native pixel space.
//!
//! The crop dialog reports its rectangle in the coordinate space of the
//! on-screen preview, which is usually a downscaled rendering of the image.
//! Before drawing the sub-rectangle we scale every component by the ratio of
//! native to displayed size, then clamp to the image bounds.

use image::DynamicImage;

use crate::error::ImageProcessingError;

/// User-selected rectangle in displayed-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// On-screen size of the preview the crop rectangle was drawn against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayedSize {
    pub width: f32,
    pub height: f32,
}

/// Crop rectangle mapped into native pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCrop {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// Map this displayed-space rectangle onto an image of the given native
    /// resolution.
    ///
    /// The origin and extent are clamped so the result always lies inside
    /// the image; a rectangle that collapses to zero area after clamping is
    /// rejected.
    pub fn to_native(
        &self,
        displayed: DisplayedSize,
        native_width: u32,
        native_height: u32,
    ) -> Result<NativeCrop, ImageProcessingError> {
        if displayed.width <= 0.0 || displayed.height <= 0.0 {
            return Err(ImageProcessingError::Operation(format!(
                "Displayed size must be positive, got {}x{}",
                displayed.width, displayed.height
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ImageProcessingError::Operation(format!(
                "Crop region must have positive extent, got {}x{}",
                self.width, self.height
            )));
        }

        let scale_x = native_width as f32 / displayed.width;
        let scale_y = native_height as f32 / displayed.height;

        let x = ((self.x * scale_x).round().max(0.0) as u32).min(native_width.saturating_sub(1));
        let y = ((self.y * scale_y).round().max(0.0) as u32).min(native_height.saturating_sub(1));
        let width = ((self.width * scale_x).round() as u32).min(native_width - x);
        let height = ((self.height * scale_y).round() as u32).min(native_height - y);

        if width == 0 || height == 0 {
            return Err(ImageProcessingError::Operation(
                "Crop region lies outside the image".to_string(),
            ));
        }

        Ok(NativeCrop {
            x,
            y,
            width,
            height,
        })
    }
}

impl NativeCrop {
    /// Extract the sub-rectangle as a new bitmap.
    pub fn apply(&self, img: &DynamicImage) -> DynamicImage {
        img.crop_imm(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_displayed_to_native_mapping() {
        // 400x300 preview of a 4000x3000 native image: scale factor 10.
        let region = CropRegion {
            x: 100.0,
            y: 75.0,
            width: 200.0,
            height: 150.0,
        };
        let displayed = DisplayedSize {
            width: 400.0,
            height: 300.0,
        };
        let native = region.to_native(displayed, 4000, 3000).unwrap();
        assert_eq!(
            native,
            NativeCrop {
                x: 1000,
                y: 750,
                width: 2000,
                height: 1500
            }
        );
    }

    #[test]
    fn test_identity_when_preview_is_native() {
        let region = CropRegion {
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 40.0,
        };
        let displayed = DisplayedSize {
            width: 100.0,
            height: 100.0,
        };
        let native = region.to_native(displayed, 100, 100).unwrap();
        assert_eq!(
            native,
            NativeCrop {
                x: 10,
                y: 20,
                width: 30,
                height: 40
            }
        );
    }

    #[test]
    fn test_clamps_overhanging_region() {
        let region = CropRegion {
            x: 80.0,
            y: 80.0,
            width: 50.0,
            height: 50.0,
        };
        let displayed = DisplayedSize {
            width: 100.0,
            height: 100.0,
        };
        let native = region.to_native(displayed, 100, 100).unwrap();
        assert_eq!(native.x, 80);
        assert_eq!(native.width, 20);
        assert_eq!(native.height, 20);
    }

    #[test]
    fn test_rejects_degenerate_inputs() {
        let displayed = DisplayedSize {
            width: 100.0,
            height: 100.0,
        };
        let zero_extent = CropRegion {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 10.0,
        };
        assert!(zero_extent.to_native(displayed, 100, 100).is_err());

        let region = CropRegion {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let zero_display = DisplayedSize {
            width: 0.0,
            height: 100.0,
        };
        assert!(region.to_native(zero_display, 100, 100).is_err());
    }

    #[test]
    fn test_apply_extracts_subimage() {
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
        img.put_pixel(25, 25, Rgba([255, 0, 0, 255]));
        let img = DynamicImage::ImageRgba8(img);

        let crop = NativeCrop {
            x: 20,
            y: 20,
            width: 10,
            height: 10,
        };
        let cropped = crop.apply(&img);
        assert_eq!(cropped.width(), 10);
        assert_eq!(cropped.height(), 10);
        assert_eq!(cropped.to_rgba8().get_pixel(5, 5), &Rgba([255, 0, 0, 255]));
    }
}
