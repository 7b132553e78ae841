//! Image decode, crop-mapping, and resample building blocks.

pub mod crop;
pub mod processor;
pub mod resize;

pub use crop::{CropRegion, DisplayedSize, NativeCrop};
pub use processor::ImageProcessor;
pub use resize::{FitDimensions, ImageResize};
