//! Business records.
//!
//! Writes go through multipart forms (see [`crate::forms::business`]) because
//! they carry images, so only the read shapes live here.

use serde::{Deserialize, Serialize};

use crate::types::BusinessId;

/// Row in the business list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessItem {
    pub id: BusinessId,
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub tax_code: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Full business record (`/business/current`, `/business/detail/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tax_code: String,
    #[serde(default)]
    pub address_full: String,
    #[serde(default)]
    pub province_code: String,
    #[serde(default)]
    pub district_code: String,
    #[serde(default)]
    pub ward_code: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    /// Logo URL.
    #[serde(default)]
    pub logo: Option<String>,
    /// Slide image URLs.
    #[serde(default)]
    pub slide_images: Vec<String>,
    /// Intro image URLs.
    #[serde(default)]
    pub intro_images: Vec<String>,
    /// Scanned registration document URLs.
    #[serde(default)]
    pub business_registration_scans: Vec<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_business_tolerates_sparse_records() {
        let business: Business =
            serde_json::from_value(json!({"id": "b1", "name": "Acme", "taxCode": "0101"})).unwrap();
        assert_eq!(business.tax_code, "0101");
        assert!(business.slide_images.is_empty());
        assert_eq!(business.website, None);
    }

    #[test]
    fn test_business_reads_camel_case() {
        let business: Business = serde_json::from_value(json!({
            "id": "b1",
            "name": "Acme",
            "shortName": "ACM",
            "addressFull": "1 Main St",
            "businessRegistrationScans": ["https://cdn/x.pdf"]
        }))
        .unwrap();
        assert_eq!(business.short_name, "ACM");
        assert_eq!(business.address_full, "1 Main St");
        assert_eq!(business.business_registration_scans.len(), 1);
    }
}
