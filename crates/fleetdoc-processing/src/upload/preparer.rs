//! The sequential batch preparer.
//!
//! Files are processed strictly in selection order: each file's crop-dialog
//! round-trip and transform complete before the next file starts. The crop
//! dialog is a single shared surface, so the preparer holds the prompt
//! mutably for the whole batch - dialog N+1 cannot open until dialog N has
//! been resolved.

use async_trait::async_trait;

use crate::image::ImageProcessor;
use crate::pipeline::{transform, FormatPolicy, SourceImage, TransformOptions};
use crate::upload::types::{
    BatchOutcome, CropChoice, CropPreview, FileFailure, PreparerConfig,
};

/// The crop dialog seam.
///
/// Production wires this to the interactive dialog; tests substitute a
/// scripted implementation. `resolve` is called at most once per file, in
/// selection order. Closing the dialog without applying maps to
/// [`CropChoice::Skip`] - there is no batch-level cancel.
#[async_trait]
pub trait CropPrompt: Send {
    async fn resolve(&mut self, preview: &CropPreview) -> CropChoice;
}

/// Prepares a multi-file selection for upload.
pub struct UploadPreparer {
    config: PreparerConfig,
}

impl UploadPreparer {
    pub fn new(config: PreparerConfig) -> Self {
        Self { config }
    }

    /// Process every file in selection order.
    ///
    /// A file that fails (undecodable bytes, crop/encode failure) is
    /// recorded in the outcome and the batch continues with its siblings.
    pub async fn prepare_batch(
        &self,
        files: Vec<SourceImage>,
        prompt: &mut dyn CropPrompt,
    ) -> BatchOutcome {
        let total = files.len();
        let mut outcome = BatchOutcome::default();

        for (index, source) in files.into_iter().enumerate() {
            match self.prepare_one(index, total, source, prompt).await {
                Ok(file) => outcome.prepared.push(file),
                Err((file_name, error)) => {
                    tracing::warn!(
                        file = %file_name,
                        index = index,
                        error = %error,
                        "Skipping file after processing failure"
                    );
                    outcome.failures.push(FileFailure {
                        file_name,
                        index,
                        error,
                    });
                }
            }
        }

        outcome
    }

    async fn prepare_one(
        &self,
        index: usize,
        total: usize,
        source: SourceImage,
        prompt: &mut dyn CropPrompt,
    ) -> Result<crate::pipeline::TransformedFile, (String, crate::error::ImageProcessingError)>
    {
        let file_name = source.file_name.clone();

        // Probe before opening the dialog: a file we cannot decode gets no
        // dialog at all, it just fails.
        let (native_width, native_height) = ImageProcessor::probe_dimensions(&source.data)
            .map_err(|e| (file_name.clone(), e))?;

        let preview = CropPreview {
            file_name: file_name.clone(),
            index,
            total,
            native_width,
            native_height,
        };
        let choice = prompt.resolve(&preview).await;

        let options = match choice {
            CropChoice::Apply { region, displayed } => TransformOptions {
                crop: Some((region, displayed)),
                max_width: self.config.max_width,
                max_height: self.config.max_height,
                quality: self.config.crop_quality,
                format: FormatPolicy::Jpeg,
            },
            CropChoice::Skip => TransformOptions {
                crop: None,
                max_width: self.config.max_width,
                max_height: self.config.max_height,
                quality: self.config.skip_quality,
                format: FormatPolicy::PreserveSource,
            },
        };

        transform(source, options)
            .await
            .map_err(|e| (file_name, e))
    }
}
