//! Stamp lifecycle forms.

use super::{FieldError, FormDraft, Rules, non_blank};
use crate::dto::{
    CreateActivation, CreateDestruction, CreateGeneration, CreateRetailOrder, CreateStampTemplate,
};
use crate::types::{ProductId, StampId, StampTemplateId};

fn stamp_ids(raw: &[String]) -> Vec<StampId> {
    raw.iter()
        .filter_map(|id| non_blank(id))
        .map(StampId::from)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StampTemplateDraft {
    pub name: String,
    pub size: String,
    pub description: String,
}

impl FormDraft for StampTemplateDraft {
    type Submission = CreateStampTemplate;

    fn validate(&self) -> Vec<FieldError> {
        Rules::new()
            .required("name", &self.name, "Name is required")
            .required("size", &self.size, "Size is required")
            .finish()
    }

    fn to_submission(&self) -> CreateStampTemplate {
        CreateStampTemplate {
            name: self.name.trim().to_string(),
            size: self.size.trim().to_string(),
            description: non_blank(&self.description),
        }
    }
}

/// A batch of stamps printed from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationDraft {
    pub template_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub note: String,
}

impl Default for GenerationDraft {
    fn default() -> Self {
        Self {
            template_id: String::new(),
            product_id: String::new(),
            quantity: 1,
            note: String::new(),
        }
    }
}

impl FormDraft for GenerationDraft {
    type Submission = CreateGeneration;

    fn validate(&self) -> Vec<FieldError> {
        Rules::new()
            .required("templateId", &self.template_id, "Template is required")
            .at_least("quantity", self.quantity, 1, "Quantity must be at least 1")
            .finish()
    }

    fn to_submission(&self) -> CreateGeneration {
        CreateGeneration {
            template_id: StampTemplateId::new(self.template_id.trim()),
            product_id: non_blank(&self.product_id).map(ProductId::from),
            quantity: self.quantity,
            note: non_blank(&self.note),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationDraft {
    pub stamp_ids: Vec<String>,
    pub product_id: String,
    pub note: String,
}

impl FormDraft for ActivationDraft {
    type Submission = CreateActivation;

    fn validate(&self) -> Vec<FieldError> {
        Rules::new()
            .non_empty("stampIds", &self.stamp_ids, "At least one stamp is required")
            .finish()
    }

    fn to_submission(&self) -> CreateActivation {
        CreateActivation {
            stamp_ids: stamp_ids(&self.stamp_ids),
            product_id: non_blank(&self.product_id).map(ProductId::from),
            note: non_blank(&self.note),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetailOrderDraft {
    pub stamp_ids: Vec<String>,
    pub customer_name: String,
    pub customer_phone: String,
}

impl FormDraft for RetailOrderDraft {
    type Submission = CreateRetailOrder;

    fn validate(&self) -> Vec<FieldError> {
        Rules::new()
            .non_empty("stampIds", &self.stamp_ids, "At least one stamp is required")
            .finish()
    }

    fn to_submission(&self) -> CreateRetailOrder {
        CreateRetailOrder {
            stamp_ids: stamp_ids(&self.stamp_ids),
            customer_name: non_blank(&self.customer_name),
            customer_phone: non_blank(&self.customer_phone),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestructionDraft {
    pub stamp_ids: Vec<String>,
    pub reason: String,
}

impl FormDraft for DestructionDraft {
    type Submission = CreateDestruction;

    fn validate(&self) -> Vec<FieldError> {
        Rules::new()
            .non_empty("stampIds", &self.stamp_ids, "At least one stamp is required")
            .required("reason", &self.reason, "Reason is required")
            .finish()
    }

    fn to_submission(&self) -> CreateDestruction {
        CreateDestruction {
            stamp_ids: stamp_ids(&self.stamp_ids),
            reason: self.reason.trim().to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_template_requires_name_and_size() {
        let err = StampTemplateDraft::default().submit().unwrap_err();
        let fields: Vec<_> = err.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "size"]);
    }

    #[test]
    fn test_generation_quantity_lower_bound() {
        let draft = GenerationDraft {
            template_id: "t1".to_string(),
            quantity: 0,
            ..GenerationDraft::default()
        };
        let err = draft.submit().unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be at least 1");
    }

    #[test]
    fn test_generation_drops_blank_product() {
        let draft = GenerationDraft {
            template_id: " t1 ".to_string(),
            product_id: " ".to_string(),
            quantity: 500,
            note: String::new(),
        };
        let body = draft.submit().unwrap();
        assert_eq!(body.template_id.as_str(), "t1");
        assert!(body.product_id.is_none());
    }

    #[test]
    fn test_blank_stamp_ids_do_not_count() {
        let draft = ActivationDraft {
            stamp_ids: vec![" ".to_string(), String::new()],
            ..ActivationDraft::default()
        };
        assert!(draft.submit().is_err());
    }

    #[test]
    fn test_retail_order_keeps_non_blank_ids() {
        let draft = RetailOrderDraft {
            stamp_ids: vec!["s1".to_string(), "  ".to_string(), " s2".to_string()],
            customer_name: "Bao".to_string(),
            customer_phone: String::new(),
        };
        let body = draft.submit().unwrap();
        let ids: Vec<_> = body.stamp_ids.iter().map(StampId::as_str).collect();
        assert_eq!(ids, ["s1", "s2"]);
        assert!(body.customer_phone.is_none());
    }

    #[test]
    fn test_destruction_requires_reason() {
        let draft = DestructionDraft {
            stamp_ids: vec!["s1".to_string()],
            reason: String::new(),
        };
        let err = draft.submit().unwrap_err();
        assert_eq!(err.first().field, "reason");
    }
}
