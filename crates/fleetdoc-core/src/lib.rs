//! Fleetdoc Core Library
//!
//! Shared domain layer for the fleet-management portal core: expiry-status
//! classification, typed API response models, error types, and
//! configuration used by the processing and API-client crates.

pub mod config;
pub mod error;
pub mod expiry;
pub mod models;

// Re-export commonly used types
pub use config::PortalConfig;
pub use error::{AppError, Severity, UserNotice};
pub use expiry::{
    classify, classify_datetime, classify_str, classify_with_policy, AbsentDatePolicy,
    ExpiryBucket, ExpiryStatus,
};
pub use models::{AdditionalDocument, DocumentExpiryOverview, GarageRecord, VehicleRecord};
