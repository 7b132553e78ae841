//! Typed response schemas for the REST backend.
//!
//! Payloads are deserialized leniently (every non-identity field optional)
//! and cleaned up by a single `normalize` step per entity, so display code
//! never has to re-handle empty strings or whitespace padding.

pub mod garage;
pub mod vehicle;

pub use garage::{GarageExpiryOverview, GarageRecord};
pub use vehicle::{AdditionalDocument, DocumentExpiryOverview, VehicleRecord};
