//! Login form.

use secrecy::SecretString;

use super::{FieldError, FormDraft, Rules};
use crate::dto::LoginRequest;

/// Identifier and password as typed.
#[derive(Clone, Default)]
pub struct LoginDraft {
    pub identifier: String,
    pub password: String,
}

impl LoginDraft {
    #[must_use]
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginDraft")
            .field("identifier", &self.identifier)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl FormDraft for LoginDraft {
    type Submission = LoginRequest;

    fn validate(&self) -> Vec<FieldError> {
        Rules::new()
            .required("identifier", &self.identifier, "Email or username is required")
            .required("password", &self.password, "Password is required")
            .finish()
    }

    fn to_submission(&self) -> LoginRequest {
        LoginRequest {
            identifier: self.identifier.trim().to_string(),
            password: SecretString::from(self.password.clone()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_blank_login_fails() {
        let err = LoginDraft::default().submit().unwrap_err();
        assert_eq!(err.errors().len(), 2);
        assert_eq!(err.to_string(), "Email or username is required");
    }

    #[test]
    fn test_identifier_is_trimmed() {
        let request = LoginDraft::new("  user@x.com ", "pw").submit().unwrap();
        assert_eq!(request.identifier, "user@x.com");
        assert_eq!(request.password.expose_secret(), "pw");
    }

    #[test]
    fn test_debug_hides_password() {
        let draft = LoginDraft::new("user", "hunter2");
        assert!(!format!("{draft:?}").contains("hunter2"));
    }
}
