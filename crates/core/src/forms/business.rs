//! Business forms. Both are multipart because they carry images.

use super::{FieldError, FormDraft, Prefill, Rules};
use crate::dto::Business;
use crate::multipart::{FileUpload, FormPayload};

/// First-time business registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBusinessDraft {
    pub name: String,
    pub tax_code: String,
    pub phone: String,
    pub logo: Option<FileUpload>,
}

impl FormDraft for NewBusinessDraft {
    type Submission = FormPayload;

    fn validate(&self) -> Vec<FieldError> {
        Rules::new()
            .required("name", &self.name, "Name is required")
            .finish()
    }

    fn to_submission(&self) -> FormPayload {
        let mut form = FormPayload::new();
        form.text("name", self.name.trim())
            .optional_text("taxCode", Some(&self.tax_code))
            .optional_text("phone", Some(&self.phone));
        if let Some(logo) = &self.logo {
            form.file("logo", logo.clone());
        }
        form
    }
}

/// Full edit of the current business.
///
/// Image fields hold newly picked files only; existing images stay on the
/// server unless replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessDraft {
    pub name: String,
    pub short_name: String,
    pub full_name: String,
    pub code: String,
    pub phone: String,
    pub email: String,
    pub tax_code: String,
    pub address_full: String,
    pub province_code: String,
    pub district_code: String,
    pub ward_code: String,
    pub website: String,
    pub youtube: String,
    pub logo: Option<FileUpload>,
    pub slide_images: Vec<FileUpload>,
    pub intro_images: Vec<FileUpload>,
    pub business_registration_scans: Vec<FileUpload>,
}

impl FormDraft for BusinessDraft {
    type Submission = FormPayload;

    fn validate(&self) -> Vec<FieldError> {
        Rules::new()
            .required("name", &self.name, "Name is required")
            .required("shortName", &self.short_name, "Short name is required")
            .required("fullName", &self.full_name, "Full name is required")
            .required("code", &self.code, "Code is required")
            .required("phone", &self.phone, "Phone is required")
            .required_email("email", &self.email, "Email is required")
            .required("taxCode", &self.tax_code, "Tax code is required")
            .required("addressFull", &self.address_full, "Address is required")
            .required("provinceCode", &self.province_code, "Province is required")
            .required("districtCode", &self.district_code, "District is required")
            .required("wardCode", &self.ward_code, "Ward is required")
            .finish()
    }

    fn to_submission(&self) -> FormPayload {
        let mut form = FormPayload::new();
        for (name, value) in [
            ("name", &self.name),
            ("shortName", &self.short_name),
            ("fullName", &self.full_name),
            ("code", &self.code),
            ("phone", &self.phone),
            ("email", &self.email),
            ("taxCode", &self.tax_code),
            ("addressFull", &self.address_full),
            ("provinceCode", &self.province_code),
            ("districtCode", &self.district_code),
            ("wardCode", &self.ward_code),
        ] {
            form.text(name, value.trim());
        }
        form.optional_text("website", Some(&self.website))
            .optional_text("youtube", Some(&self.youtube));
        if let Some(logo) = &self.logo {
            form.file("logo", logo.clone());
        }
        form.files("slideImages", &self.slide_images)
            .files("introImages", &self.intro_images)
            .files("businessRegistrationScans", &self.business_registration_scans);
        form
    }
}

impl Prefill<Business> for BusinessDraft {
    fn prefill(business: &Business) -> Self {
        Self {
            name: business.name.clone(),
            short_name: business.short_name.clone(),
            full_name: business.full_name.clone(),
            code: business.code.clone(),
            phone: business.phone.clone(),
            email: business.email.clone(),
            tax_code: business.tax_code.clone(),
            address_full: business.address_full.clone(),
            province_code: business.province_code.clone(),
            district_code: business.district_code.clone(),
            ward_code: business.ward_code.clone(),
            website: business.website.clone().unwrap_or_default(),
            youtube: business.youtube.clone().unwrap_or_default(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::BusinessId;

    fn business() -> Business {
        Business {
            id: BusinessId::new("b1"),
            name: "Acme".to_string(),
            short_name: "ACM".to_string(),
            full_name: "Acme Trading Co".to_string(),
            code: "AC-01".to_string(),
            phone: "0900000000".to_string(),
            email: "ops@acme.vn".to_string(),
            tax_code: "0101234567".to_string(),
            address_full: "1 Main St".to_string(),
            province_code: "01".to_string(),
            district_code: "001".to_string(),
            ward_code: "00001".to_string(),
            website: None,
            youtube: Some("https://youtube.com/acme".to_string()),
            logo: None,
            slide_images: vec![],
            intro_images: vec![],
            business_registration_scans: vec![],
            created_by: None,
        }
    }

    #[test]
    fn test_new_business_requires_name() {
        let err = NewBusinessDraft::default().submit().unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
        assert_eq!(err.errors().len(), 1);
    }

    #[test]
    fn test_new_business_optional_fields_skipped() {
        let draft = NewBusinessDraft {
            name: "Acme".to_string(),
            tax_code: "  ".to_string(),
            ..NewBusinessDraft::default()
        };
        let form = draft.submit().unwrap();
        assert_eq!(form.parts().len(), 1);
    }

    #[test]
    fn test_update_rejects_bad_email() {
        let mut draft = BusinessDraft::prefill(&business());
        draft.email = "not-an-email".to_string();
        let err = draft.submit().unwrap_err();
        assert_eq!(err.message_for("email"), Some("Invalid email"));
    }

    #[test]
    fn test_update_repeats_image_parts() {
        let mut draft = BusinessDraft::prefill(&business());
        draft.slide_images = vec![
            FileUpload::new("s1.jpg", vec![1]),
            FileUpload::new("s2.jpg", vec![2]),
        ];
        draft.business_registration_scans = vec![FileUpload::new("reg.pdf", vec![3])];
        let form = draft.submit().unwrap();
        assert_eq!(form.file_count("slideImages"), 2);
        assert_eq!(form.file_count("businessRegistrationScans"), 1);
        assert_eq!(form.text_value("youtube"), Some("https://youtube.com/acme"));
        assert_eq!(form.text_value("website"), None);
    }

    #[test]
    fn test_prefill_is_valid() {
        assert!(BusinessDraft::prefill(&business()).validate().is_empty());
    }
}
