//! Pre-decode validation of user-selected files.
//!
//! Cheap checks (size, extension, declared content type) run before any
//! bytes reach the decoder, so obviously wrong selections fail fast with a
//! message the shell can toast directly.

use std::path::Path;

use fleetdoc_core::PortalConfig;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Unsupported file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Unsupported content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file")]
    EmptyFile,
}

impl From<ValidationError> for fleetdoc_core::AppError {
    fn from(err: ValidationError) -> Self {
        fleetdoc_core::AppError::Validation(err.to_string())
    }
}

/// Validates image uploads against the portal's configured limits.
pub struct MediaValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl MediaValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types,
        }
    }

    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(
            config.max_upload_size_bytes,
            config.allowed_image_extensions.clone(),
            config.allowed_image_content_types.clone(),
        )
    }

    /// Run every check; the first failure wins.
    pub fn validate(
        &self,
        filename: &str,
        content_type: &str,
        size: usize,
    ) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))?;
        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        let normalized = content_type.to_lowercase();
        if !self.allowed_content_types.contains(&normalized) {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }
}
