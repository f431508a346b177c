//! Product create and edit form.

use super::{FieldError, FormDraft, Prefill, Rules};
use crate::dto::{CreateProduct, Product};
use crate::types::Price;

/// Product fields as typed. `price` stays text until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub gtin: String,
    pub price: String,
}

impl FormDraft for ProductDraft {
    type Submission = CreateProduct;

    fn validate(&self) -> Vec<FieldError> {
        Rules::new()
            .required("name", &self.name, "Name is required")
            .required("gtin", &self.gtin, "GTIN is required")
            .price("price", &self.price)
            .finish()
    }

    fn to_submission(&self) -> CreateProduct {
        CreateProduct {
            name: self.name.trim().to_string(),
            gtin: self.gtin.trim().to_string(),
            price: Price::parse(&self.price).unwrap_or_default(),
        }
    }
}

impl Prefill<Product> for ProductDraft {
    fn prefill(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            gtin: product.gtin.clone(),
            price: product.price.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductId;
    use rust_decimal::Decimal;

    fn draft(name: &str, gtin: &str, price: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            gtin: gtin.to_string(),
            price: price.to_string(),
        }
    }

    #[test]
    fn test_empty_name_is_first_error() {
        let err = draft("", "0123", "5").submit().unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = draft("Tea", "0123", "-5").submit().unwrap_err();
        assert_eq!(err.message_for("price"), Some("Price must be positive"));
    }

    #[test]
    fn test_valid_draft_builds_body() {
        let body = draft(" Tea ", "0123", "19.99").submit().unwrap();
        assert_eq!(body.name, "Tea");
        assert_eq!(body.price.amount(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_prefill_round_trips_price() {
        let product = Product {
            id: ProductId::new("p1"),
            name: "Tea".to_string(),
            gtin: "0123".to_string(),
            price: Price::parse("12.50").unwrap(),
        };
        let draft = ProductDraft::prefill(&product);
        assert_eq!(draft.price, "12.5");
        assert!(draft.validate().is_empty());
    }
}
