//! Aspect-preserving fit-within resampling.

use image::imageops::FilterType;
use image::DynamicImage;

/// Target dimensions produced by [`ImageResize::fit_within`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitDimensions {
    pub width: u32,
    pub height: u32,
}

pub struct ImageResize;

impl ImageResize {
    /// Compute dimensions that fit inside `max_width x max_height` while
    /// preserving aspect ratio. Never upscales: a source that already fits
    /// comes back unchanged.
    pub fn fit_within(
        src_width: u32,
        src_height: u32,
        max_width: u32,
        max_height: u32,
    ) -> FitDimensions {
        if src_width == 0 || src_height == 0 {
            return FitDimensions {
                width: src_width,
                height: src_height,
            };
        }

        let scale_w = max_width as f64 / src_width as f64;
        let scale_h = max_height as f64 / src_height as f64;
        let scale = scale_w.min(scale_h).min(1.0);

        if scale >= 1.0 {
            return FitDimensions {
                width: src_width,
                height: src_height,
            };
        }

        FitDimensions {
            width: ((src_width as f64 * scale).round() as u32).max(1),
            height: ((src_height as f64 * scale).round() as u32).max(1),
        }
    }

    /// Pick a resample filter for the downscale factor: heavy reductions get
    /// the sharper (and slower) kernel.
    pub fn select_filter(src_width: u32, target_width: u32) -> FilterType {
        if target_width * 2 < src_width {
            FilterType::Lanczos3
        } else {
            FilterType::Triangle
        }
    }

    /// Resample to the target dimensions, identity when nothing changes.
    pub fn apply(img: &DynamicImage, target: FitDimensions) -> DynamicImage {
        if target.width == img.width() && target.height == img.height() {
            return img.clone();
        }
        let filter = Self::select_filter(img.width(), target.width);
        img.resize_exact(target.width, target.height, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_fit_within_landscape() {
        let fit = ImageResize::fit_within(4000, 3000, 1920, 1080);
        assert!(fit.width <= 1920 && fit.height <= 1080);
        // Aspect preserved within rounding.
        let src_ratio = 4000.0 / 3000.0;
        let out_ratio = fit.width as f64 / fit.height as f64;
        assert!((src_ratio - out_ratio).abs() < 0.01);
        assert_eq!(fit, FitDimensions { width: 1440, height: 1080 });
    }

    #[test]
    fn test_fit_within_portrait() {
        let fit = ImageResize::fit_within(3000, 4000, 1920, 1080);
        assert!(fit.width <= 1920 && fit.height <= 1080);
        assert_eq!(fit.height, 1080);
        assert_eq!(fit.width, 810);
    }

    #[test]
    fn test_never_upscales() {
        let fit = ImageResize::fit_within(800, 600, 1920, 1080);
        assert_eq!(fit, FitDimensions { width: 800, height: 600 });
    }

    #[test]
    fn test_extreme_aspect_stays_bounded() {
        let fit = ImageResize::fit_within(10000, 100, 1920, 1080);
        assert!(fit.width <= 1920 && fit.height <= 1080);
        assert!(fit.height >= 1);
    }

    #[test]
    fn test_filter_selection() {
        assert!(matches!(
            ImageResize::select_filter(4000, 1440),
            FilterType::Lanczos3
        ));
        assert!(matches!(
            ImageResize::select_filter(2000, 1440),
            FilterType::Triangle
        ));
    }

    #[test]
    fn test_apply_identity_keeps_dimensions() {
        let img =
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 80, Rgba([1, 2, 3, 255])));
        let out = ImageResize::apply(
            &img,
            FitDimensions {
                width: 100,
                height: 80,
            },
        );
        assert_eq!((out.width(), out.height()), (100, 80));

        let out = ImageResize::apply(
            &img,
            FitDimensions {
                width: 50,
                height: 40,
            },
        );
        assert_eq!((out.width(), out.height()), (50, 40));
    }
}
