//! Sequential multi-file upload preparation with interactive crop gating.

pub mod preparer;
pub mod types;

pub use preparer::{CropPrompt, UploadPreparer};
pub use types::{BatchOutcome, CropChoice, CropPreview, FileFailure, PreparerConfig};
