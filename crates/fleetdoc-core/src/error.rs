//! Error types module
//!
//! Unified portal-level error enum plus the [`UserNotice`] trait that lets
//! errors self-describe how the shell should present them (toast message,
//! severity, whether a retry is worth offering). Expected-bad input like an
//! unparsable expiry date never reaches this module; the classifier absorbs
//! it as an unknown bucket.

/// Severity for user-facing notifications and log routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational - expected rejections like validation failures.
    Info,
    /// Warning - recoverable per-file issues, siblings unaffected.
    Warn,
    /// Error - unexpected failures.
    Error,
}

/// Presentation metadata for errors surfaced to the portal user.
///
/// Errors self-describe their toast characteristics so the shell never
/// matches on variants to decide wording.
pub trait UserNotice {
    /// Message suitable for a non-fatal toast/alert.
    fn user_message(&self) -> String;

    /// Whether retrying the same action can reasonably succeed.
    fn is_recoverable(&self) -> bool;

    /// Severity for the notification and the log line.
    fn severity(&self) -> Severity;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("API request failed: {0}")]
    Api(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl AppError {
    /// Error type name for structured log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::ImageProcessing(_) => "ImageProcessing",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Validation(_) => "Validation",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Api(_) => "Api",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Detailed message including the source chain, for logs only.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }
        details
    }
}

impl UserNotice for AppError {
    fn user_message(&self) -> String {
        match self {
            AppError::ImageProcessing(msg) => msg.clone(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Unauthorized(_) => "Your session has expired. Please sign in again.".to_string(),
            AppError::Api(_) => "The server could not complete the request. Please try again.".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            AppError::ImageProcessing(_) => false,
            AppError::InvalidInput(_) | AppError::Validation(_) => false,
            AppError::Unauthorized(_) => false,
            AppError::Api(_) => true,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => true,
        }
    }

    fn severity(&self) -> Severity {
        match self {
            AppError::InvalidInput(_) | AppError::Validation(_) => Severity::Info,
            AppError::ImageProcessing(_) => Severity::Warn,
            AppError::Unauthorized(_) => Severity::Warn,
            AppError::Api(_) => Severity::Error,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => Severity::Error,
        }
    }
}
