//! Domain methods for the fleet portal backend.
//!
//! Response payloads deserialize into the typed models from
//! `fleetdoc_core::models` and are normalized once here, at the API
//! boundary, so view code downstream never sees blank-string fields.

use reqwest::multipart::{Form, Part};
use uuid::Uuid;

use fleetdoc_core::models::{GarageRecord, VehicleRecord};
use fleetdoc_processing::TransformedFile;

use crate::{ApiClient, ApiError};

/// Processed files for one vehicle-document upload, keyed by the multipart
/// field names the backend expects.
#[derive(Debug, Default)]
pub struct DocumentUploadParts {
    pub image: Option<TransformedFile>,
    pub registration_document: Option<TransformedFile>,
    pub insurance_document: Option<TransformedFile>,
}

fn part_from(file: TransformedFile) -> Result<Part, ApiError> {
    Part::bytes(file.data.to_vec())
        .file_name(file.file_name)
        .mime_str(&file.content_type)
        .map_err(|e| ApiError::Decode(format!("Invalid content type for upload: {}", e)))
}

impl ApiClient {
    /// List vehicles with pagination.
    pub async fn list_vehicles(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<VehicleRecord>, ApiError> {
        let query = [("limit", limit.to_string()), ("offset", offset.to_string())];
        let vehicles: Vec<VehicleRecord> = self.get("/vehicles", &query).await?;
        Ok(vehicles.into_iter().map(VehicleRecord::normalize).collect())
    }

    /// Fetch one vehicle by id.
    pub async fn get_vehicle(&self, id: Uuid) -> Result<VehicleRecord, ApiError> {
        let vehicle: VehicleRecord = self.get(&format!("/vehicles/{}", id), &[]).await?;
        Ok(vehicle.normalize())
    }

    /// Fetch one garage by id.
    pub async fn get_garage(&self, id: Uuid) -> Result<GarageRecord, ApiError> {
        let garage: GarageRecord = self.get(&format!("/garages/{}", id), &[]).await?;
        Ok(garage.normalize())
    }

    /// Upload processed vehicle documents as multipart form data.
    ///
    /// Field names match the backend contract: `image`,
    /// `registrationDocument`, `insuranceDocument`. Only supplied parts are
    /// sent; the returned record reflects the updated document URLs.
    pub async fn upload_vehicle_documents(
        &self,
        vehicle_id: Uuid,
        parts: DocumentUploadParts,
    ) -> Result<VehicleRecord, ApiError> {
        let mut form = Form::new();
        if let Some(file) = parts.image {
            form = form.part("image", part_from(file)?);
        }
        if let Some(file) = parts.registration_document {
            form = form.part("registrationDocument", part_from(file)?);
        }
        if let Some(file) = parts.insurance_document {
            form = form.part("insuranceDocument", part_from(file)?);
        }

        let vehicle: VehicleRecord = self
            .post_multipart(&format!("/vehicles/{}/documents", vehicle_id), form)
            .await?;
        Ok(vehicle.normalize())
    }

    /// Persist a document-sharing toggle.
    ///
    /// The UI flips the switch optimistically and calls this in the
    /// background; on failure the caller reverts the switch.
    pub async fn update_document_sharing(
        &self,
        vehicle_id: Uuid,
        document_name: &str,
        shared: bool,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "documentName": document_name,
            "shared": shared,
        });
        let _: serde_json::Value = self
            .put_json(&format!("/vehicles/{}/documents/sharing", vehicle_id), &body)
            .await?;
        Ok(())
    }
}
