//! Types for the batch upload-preparation flow.

use crate::compression::Quality;
use crate::error::ImageProcessingError;
use crate::image::{CropRegion, DisplayedSize};
use crate::pipeline::TransformedFile;

use fleetdoc_core::PortalConfig;

/// What the crop dialog shows for one file awaiting a decision.
#[derive(Debug, Clone)]
pub struct CropPreview {
    pub file_name: String,
    /// Zero-based position in the selection.
    pub index: usize,
    pub total: usize,
    pub native_width: u32,
    pub native_height: u32,
}

/// The user's resolution of one crop dialog.
#[derive(Debug, Clone)]
pub enum CropChoice {
    /// Crop to the given displayed-space rectangle, then resample+encode.
    Apply {
        region: CropRegion,
        displayed: DisplayedSize,
    },
    /// No crop; the file still goes through resample+encode so every upload
    /// is size-bounded.
    Skip,
}

/// Per-call-site knobs for the preparer.
///
/// The two qualities are deliberately independent: the crop path and the
/// skip path historically encoded at different fidelities, and call sites
/// tune them separately.
#[derive(Debug, Clone)]
pub struct PreparerConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub crop_quality: Quality,
    pub skip_quality: Quality,
}

impl Default for PreparerConfig {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            crop_quality: Quality::CROP_DEFAULT,
            skip_quality: Quality::SKIP_DEFAULT,
        }
    }
}

impl PreparerConfig {
    /// Build from portal configuration, falling back to the compiled
    /// defaults when a configured quality is out of range.
    pub fn from_config(config: &PortalConfig) -> Self {
        Self {
            max_width: config.max_image_width,
            max_height: config.max_image_height,
            crop_quality: Quality::new(config.crop_encode_quality)
                .unwrap_or(Quality::CROP_DEFAULT),
            skip_quality: Quality::new(config.skip_encode_quality)
                .unwrap_or(Quality::SKIP_DEFAULT),
        }
    }
}

/// One file that failed, with enough context for an individual toast.
#[derive(Debug)]
pub struct FileFailure {
    pub file_name: String,
    pub index: usize,
    pub error: ImageProcessingError,
}

/// Result of preparing a selection: successes in order, failures recorded
/// individually.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub prepared: Vec<TransformedFile>,
    pub failures: Vec<FileFailure>,
}

impl BatchOutcome {
    pub fn is_fully_successful(&self) -> bool {
        self.failures.is_empty()
    }
}
