//! Vehicle record schema and derived expiry views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expiry::{classify_with_policy, AbsentDatePolicy, ExpiryStatus};

/// A vehicle as returned by the backend.
///
/// Expiry fields stay raw strings here; parsing happens inside the expiry
/// classifier, which tolerates every date shape the backend has produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: Uuid,
    pub plate_number: String,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub insurance_expiry: Option<String>,
    #[serde(default)]
    pub inspection_expiry: Option<String>,
    #[serde(default)]
    pub registration_expiry: Option<String>,
    #[serde(default)]
    pub additional_documents: Vec<AdditionalDocument>,
}

/// An extra uploaded document attached to a vehicle (or garage).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalDocument {
    pub name: String,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub document_url: Option<String>,
    /// Whether the document is shared with drivers. Toggled optimistically
    /// in the UI and persisted in the background.
    #[serde(default)]
    pub shared: bool,
}

/// Classified expiry statuses for every dated document of one record.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentExpiryOverview {
    pub insurance: Option<ExpiryStatus>,
    pub inspection: Option<ExpiryStatus>,
    pub registration: Option<ExpiryStatus>,
    /// `(document name, status)` for each additional document.
    pub additional: Vec<(String, Option<ExpiryStatus>)>,
}

impl DocumentExpiryOverview {
    fn statuses(&self) -> impl Iterator<Item = &ExpiryStatus> {
        self.insurance
            .iter()
            .chain(self.inspection.iter())
            .chain(self.registration.iter())
            .chain(self.additional.iter().filter_map(|(_, s)| s.as_ref()))
    }

    /// Coarse list-row coloring: any document already past its date.
    pub fn any_expired(&self) -> bool {
        self.statuses().any(|s| s.is_expired())
    }

    /// Coarse list-row coloring: any document inside the warning window.
    pub fn any_expiring_soon(&self) -> bool {
        self.statuses().any(|s| s.is_expiring_soon())
    }
}

pub(crate) fn blank_to_none(field: &mut Option<String>) {
    if let Some(value) = field {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            *field = None;
        } else if trimmed.len() != value.len() {
            *field = Some(trimmed.to_string());
        }
    }
}

impl VehicleRecord {
    /// One-shot cleanup applied right after deserialization: blank strings
    /// collapse to `None` so the rest of the code only checks presence.
    pub fn normalize(mut self) -> Self {
        blank_to_none(&mut self.make);
        blank_to_none(&mut self.model);
        blank_to_none(&mut self.image_url);
        blank_to_none(&mut self.insurance_expiry);
        blank_to_none(&mut self.inspection_expiry);
        blank_to_none(&mut self.registration_expiry);
        for doc in &mut self.additional_documents {
            blank_to_none(&mut doc.expiry);
            blank_to_none(&mut doc.document_url);
        }
        self
    }

    /// Classify every dated document against `now`.
    ///
    /// The absent-date policy is caller-selected: detail views that render a
    /// "No date provided" badge pass [`AbsentDatePolicy::Unknown`], views
    /// that omit the row entirely pass [`AbsentDatePolicy::Skip`].
    pub fn expiry_overview(
        &self,
        now: NaiveDate,
        policy: AbsentDatePolicy,
    ) -> DocumentExpiryOverview {
        DocumentExpiryOverview {
            insurance: classify_with_policy(self.insurance_expiry.as_deref(), now, policy),
            inspection: classify_with_policy(self.inspection_expiry.as_deref(), now, policy),
            registration: classify_with_policy(self.registration_expiry.as_deref(), now, policy),
            additional: self
                .additional_documents
                .iter()
                .map(|doc| {
                    (
                        doc.name.clone(),
                        classify_with_policy(doc.expiry.as_deref(), now, policy),
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::ExpiryBucket;

    fn sample_json() -> &'static str {
        r#"{
            "id": "7b0a3a6a-1111-4222-8333-444455556666",
            "plateNumber": "B 1042 FD",
            "make": "  Volvo ",
            "model": "",
            "insuranceExpiry": "2026-03-15",
            "inspectionExpiry": "",
            "additionalDocuments": [
                {"name": "Tachograph calibration", "expiry": "2026-02-01", "shared": true},
                {"name": "Toll transponder", "expiry": null}
            ]
        }"#
    }

    #[test]
    fn test_deserialize_and_normalize() {
        let vehicle: VehicleRecord = serde_json::from_str(sample_json()).unwrap();
        let vehicle = vehicle.normalize();

        assert_eq!(vehicle.plate_number, "B 1042 FD");
        assert_eq!(vehicle.make.as_deref(), Some("Volvo"));
        assert_eq!(vehicle.model, None);
        assert_eq!(vehicle.inspection_expiry, None);
        assert_eq!(vehicle.registration_expiry, None);
        assert_eq!(vehicle.additional_documents.len(), 2);
        assert!(vehicle.additional_documents[0].shared);
        assert!(!vehicle.additional_documents[1].shared);
    }

    #[test]
    fn test_expiry_overview_policies() {
        let vehicle: VehicleRecord = serde_json::from_str(sample_json()).unwrap();
        let vehicle = vehicle.normalize();
        let now = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        let overview = vehicle.expiry_overview(now, AbsentDatePolicy::Skip);
        assert_eq!(
            overview.insurance.as_ref().unwrap().bucket,
            ExpiryBucket::Critical
        );
        assert!(overview.inspection.is_none());
        assert!(overview.registration.is_none());
        assert!(overview.additional[1].1.is_none());

        let overview = vehicle.expiry_overview(now, AbsentDatePolicy::Unknown);
        assert_eq!(
            overview.inspection.as_ref().unwrap().bucket,
            ExpiryBucket::Unknown
        );
        assert_eq!(
            overview.additional[1].1.as_ref().unwrap().message,
            "No date provided"
        );
    }

    #[test]
    fn test_overview_coarse_flags() {
        let vehicle: VehicleRecord = serde_json::from_str(sample_json()).unwrap();
        let vehicle = vehicle.normalize();
        let now = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

        let overview = vehicle.expiry_overview(now, AbsentDatePolicy::Skip);
        // Tachograph calibration expired 2026-02-01; insurance is 5 days out.
        assert!(overview.any_expired());
        assert!(overview.any_expiring_soon());
    }
}
