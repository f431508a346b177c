//! Form drafts and their validation rules.
//!
//! A draft is the plain struct a screen edits. It knows how to check itself
//! ([`FormDraft::validate`]) and how to become a request payload
//! ([`FormDraft::to_submission`]). Nothing is sent unless `validate` comes back
//! empty; [`FormDraft::submit`] enforces that ordering.

pub mod auth;
pub mod business;
pub mod product;
pub mod profile;
pub mod stamp;

pub use auth::LoginDraft;
pub use business::{BusinessDraft, NewBusinessDraft};
pub use product::ProductDraft;
pub use profile::ProfileDraft;
pub use stamp::{
    ActivationDraft, DestructionDraft, GenerationDraft, RetailOrderDraft, StampTemplateDraft,
};

use thiserror::Error;

use crate::types::{Email, Price};

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// A draft that failed validation. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.first().message)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Wrap a non-empty error list. Returns `None` if `errors` is empty.
    #[must_use]
    pub fn from_errors(errors: Vec<FieldError>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self(errors))
    }

    /// The first failing field, the one a screen shows as its headline.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // constructor guarantees at least one entry
    pub fn first(&self) -> &FieldError {
        &self.0[0]
    }

    /// All failures in rule order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for a specific field, if it failed.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// A form draft for one entity.
pub trait FormDraft {
    /// Request payload produced from a valid draft.
    type Submission;

    /// Check every rule. An empty list means the draft may be submitted.
    fn validate(&self) -> Vec<FieldError>;

    /// Build the request payload. Only meaningful for a draft that validates.
    fn to_submission(&self) -> Self::Submission;

    /// Validate, then build the payload.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if any rule fails.
    fn submit(&self) -> Result<Self::Submission, ValidationErrors> {
        match ValidationErrors::from_errors(self.validate()) {
            Some(errors) => Err(errors),
            None => Ok(self.to_submission()),
        }
    }
}

/// Drafts that an update screen pre-fills from a fetched record.
pub trait Prefill<R> {
    /// Build a draft holding the record's current values.
    fn prefill(record: &R) -> Self;
}

/// Accumulates rule failures in declaration order.
#[derive(Debug, Default)]
pub struct Rules {
    errors: Vec<FieldError>,
}

impl Rules {
    /// Start an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &'static str, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    /// `value` must contain something other than whitespace.
    pub fn required(&mut self, field: &'static str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, message);
        }
        self
    }

    /// `value` must be a valid email when non-blank.
    pub fn optional_email(&mut self, field: &'static str, value: &str) -> &mut Self {
        let value = value.trim();
        if !value.is_empty() && Email::parse(value).is_err() {
            self.fail(field, "Invalid email");
        }
        self
    }

    /// `value` must be present and a valid email.
    pub fn required_email(&mut self, field: &'static str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, message);
        } else {
            self.optional_email(field, value);
        }
        self
    }

    /// `value` must parse as a non-negative price.
    pub fn price(&mut self, field: &'static str, value: &str) -> &mut Self {
        if let Err(e) = Price::parse(value) {
            let message = match e {
                crate::types::PriceError::NotANumber => "Price must be a number",
                crate::types::PriceError::Negative => "Price must be positive",
            };
            self.fail(field, message);
        }
        self
    }

    /// `value` must be at least `min`.
    pub fn at_least(&mut self, field: &'static str, value: u32, min: u32, message: &str) -> &mut Self {
        if value < min {
            self.fail(field, message);
        }
        self
    }

    /// At least one non-blank entry.
    pub fn non_empty(&mut self, field: &'static str, values: &[String], message: &str) -> &mut Self {
        if values.iter().all(|v| v.trim().is_empty()) {
            self.fail(field, message);
        }
        self
    }

    /// Collected failures.
    #[must_use]
    pub fn finish(&mut self) -> Vec<FieldError> {
        std::mem::take(&mut self.errors)
    }
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_keep_declaration_order() {
        let errors = Rules::new()
            .required("name", "", "Name is required")
            .required("code", " ", "Code is required")
            .optional_email("email", "nope")
            .finish();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "code", "email"]);
    }

    #[test]
    fn test_optional_email_allows_blank() {
        assert!(Rules::new().optional_email("email", "").finish().is_empty());
    }

    #[test]
    fn test_required_email_reports_missing_once() {
        let errors = Rules::new()
            .required_email("email", "", "Email is required")
            .finish();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Email is required");
    }

    #[test]
    fn test_price_messages() {
        let errors = Rules::new().price("price", "-5").finish();
        assert_eq!(errors[0].message, "Price must be positive");

        let errors = Rules::new().price("price", "ten").finish();
        assert_eq!(errors[0].message, "Price must be a number");
    }

    #[test]
    fn test_validation_errors_display_first_message() {
        let errors = ValidationErrors::from_errors(vec![
            FieldError {
                field: "name",
                message: "Name is required".to_string(),
            },
            FieldError {
                field: "gtin",
                message: "GTIN is required".to_string(),
            },
        ])
        .unwrap();
        assert_eq!(errors.to_string(), "Name is required");
        assert_eq!(errors.message_for("gtin"), Some("GTIN is required"));
    }

    #[test]
    fn test_validation_errors_never_empty() {
        assert!(ValidationErrors::from_errors(Vec::new()).is_none());
    }
}
