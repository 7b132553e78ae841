//! Garage record schema.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expiry::{classify_with_policy, AbsentDatePolicy, ExpiryStatus};
use crate::models::vehicle::AdditionalDocument;

/// A garage/workshop as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarageRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub license_expiry: Option<String>,
    #[serde(default)]
    pub insurance_expiry: Option<String>,
    #[serde(default)]
    pub additional_documents: Vec<AdditionalDocument>,
}

/// Classified expiry statuses for a garage's documents.
#[derive(Debug, Clone, Serialize)]
pub struct GarageExpiryOverview {
    pub license: Option<ExpiryStatus>,
    pub insurance: Option<ExpiryStatus>,
    pub additional: Vec<(String, Option<ExpiryStatus>)>,
}

impl GarageRecord {
    pub fn normalize(mut self) -> Self {
        super::vehicle::blank_to_none(&mut self.city);
        super::vehicle::blank_to_none(&mut self.address);
        super::vehicle::blank_to_none(&mut self.license_expiry);
        super::vehicle::blank_to_none(&mut self.insurance_expiry);
        for doc in &mut self.additional_documents {
            super::vehicle::blank_to_none(&mut doc.expiry);
            super::vehicle::blank_to_none(&mut doc.document_url);
        }
        self
    }

    pub fn expiry_overview(
        &self,
        now: NaiveDate,
        policy: AbsentDatePolicy,
    ) -> GarageExpiryOverview {
        GarageExpiryOverview {
            license: classify_with_policy(self.license_expiry.as_deref(), now, policy),
            insurance: classify_with_policy(self.insurance_expiry.as_deref(), now, policy),
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

    #[test]
    fn test_garage_expiry_overview() {
        let garage: GarageRecord = serde_json::from_str(
            r#"{
                "id": "2f8c9e10-aaaa-4bbb-8ccc-ddddeeee0001",
                "name": "Northside Truck Service",
                "licenseExpiry": "2025-12-01",
                "insuranceExpiry": " "
            }"#,
        )
        .unwrap();
        let garage = garage.normalize();
        assert_eq!(garage.insurance_expiry, None);

        let now = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let overview = garage.expiry_overview(now, AbsentDatePolicy::Unknown);
        assert_eq!(
            overview.license.as_ref().unwrap().bucket,
            ExpiryBucket::Expired
        );
        assert_eq!(
            overview.insurance.as_ref().unwrap().bucket,
            ExpiryBucket::Unknown
        );
    }
}
