//! Configuration module
//!
//! Environment-driven configuration for the portal core: API endpoint and
//! timeout, upload limits, and image-pipeline defaults. Every setting has a
//! compiled-in default so the core works with an empty environment.

use std::env;

// Common constants
const API_TIMEOUT_SECS: u64 = 60;
const MAX_UPLOAD_SIZE_BYTES: usize = 15 * 1024 * 1024;
const MAX_IMAGE_WIDTH: u32 = 1920;
const MAX_IMAGE_HEIGHT: u32 = 1080;
const CROP_ENCODE_QUALITY: f32 = 0.90;
const SKIP_ENCODE_QUALITY: f32 = 0.80;

/// Portal core configuration.
#[derive(Clone, Debug)]
pub struct PortalConfig {
    /// Base URL of the REST backend.
    pub api_base_url: String,
    /// Fixed per-request timeout enforced by the API client.
    pub api_timeout_secs: u64,
    // Upload validation
    pub max_upload_size_bytes: usize,
    pub allowed_image_extensions: Vec<String>,
    pub allowed_image_content_types: Vec<String>,
    // Image pipeline defaults
    pub max_image_width: u32,
    pub max_image_height: u32,
    /// Encode quality (0-1) after an applied crop.
    pub crop_encode_quality: f32,
    /// Encode quality (0-1) when the user skipped cropping.
    pub skip_encode_quality: f32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            api_timeout_secs: API_TIMEOUT_SECS,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_BYTES,
            allowed_image_extensions: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
            ],
            allowed_image_content_types: vec![
                "image/jpeg".to_string(),
                "image/jpg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            max_image_width: MAX_IMAGE_WIDTH,
            max_image_height: MAX_IMAGE_HEIGHT,
            crop_encode_quality: CROP_ENCODE_QUALITY,
            skip_encode_quality: SKIP_ENCODE_QUALITY,
        }
    }
}

impl PortalConfig {
    /// Build configuration from the process environment, falling back to
    /// defaults for anything unset or malformed.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("FLEETDOC_API_URL").unwrap_or(defaults.api_base_url),
            api_timeout_secs: parse_env("FLEETDOC_API_TIMEOUT_SECS", defaults.api_timeout_secs),
            max_upload_size_bytes: parse_env(
                "FLEETDOC_MAX_UPLOAD_SIZE_BYTES",
                defaults.max_upload_size_bytes,
            ),
            allowed_image_extensions: list_env(
                "FLEETDOC_ALLOWED_IMAGE_EXTENSIONS",
                defaults.allowed_image_extensions,
            ),
            allowed_image_content_types: list_env(
                "FLEETDOC_ALLOWED_IMAGE_CONTENT_TYPES",
                defaults.allowed_image_content_types,
            ),
            max_image_width: parse_env("FLEETDOC_MAX_IMAGE_WIDTH", defaults.max_image_width),
            max_image_height: parse_env("FLEETDOC_MAX_IMAGE_HEIGHT", defaults.max_image_height),
            crop_encode_quality: parse_env(
                "FLEETDOC_CROP_ENCODE_QUALITY",
                defaults.crop_encode_quality,
            ),
            skip_encode_quality: parse_env(
                "FLEETDOC_SKIP_ENCODE_QUALITY",
                defaults.skip_encode_quality,
            ),
        }
    }
}

fn parse_env<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key = key, value = %raw, "Ignoring malformed env value");
            default
        }),
        Err(_) => default,
    }
}

fn list_env(key: &str, default: Vec<String>) -> Vec<String> {
    match env::var(key) {
        Ok(raw) => {
            let values: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            if values.is_empty() {
                default
            } else {
                values
            }
        }
        Err(_) => default,
    }
}
