//! Profile form, used for both the first-time profile and later edits.

use super::{FieldError, FormDraft, Prefill, Rules};
use crate::dto::CurrentUser;
use crate::multipart::{FileUpload, FormPayload};

/// Editable profile fields. The avatar is only sent when a new file is picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<FileUpload>,
}

impl FormDraft for ProfileDraft {
    type Submission = FormPayload;

    fn validate(&self) -> Vec<FieldError> {
        Rules::new()
            .required("full_name", &self.full_name, "Full name is required")
            .optional_email("email", &self.email)
            .finish()
    }

    fn to_submission(&self) -> FormPayload {
        let mut form = FormPayload::new();
        form.text("full_name", self.full_name.trim())
            .optional_text("email", Some(&self.email))
            .optional_text("phone", Some(&self.phone));
        if let Some(avatar) = &self.avatar {
            form.file("avatar", avatar.clone());
        }
        form
    }
}

impl Prefill<CurrentUser> for ProfileDraft {
    fn prefill(user: &CurrentUser) -> Self {
        Self {
            full_name: user.full_name.clone(),
            email: user.email.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            avatar: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_required() {
        let err = ProfileDraft::default().submit().unwrap_err();
        assert_eq!(err.first().field, "full_name");
    }

    #[test]
    fn test_avatar_sent_as_file_part() {
        let draft = ProfileDraft {
            full_name: "Jane Doe".to_string(),
            avatar: Some(FileUpload::new("me.png", vec![1, 2, 3])),
            ..ProfileDraft::default()
        };
        let form = draft.submit().unwrap();
        assert_eq!(form.text_value("full_name"), Some("Jane Doe"));
        assert_eq!(form.file_count("avatar"), 1);
        assert_eq!(form.text_value("email"), None);
    }

    #[test]
    fn test_prefill_from_current_user() {
        let user = CurrentUser {
            id: None,
            full_name: "Jane Doe".to_string(),
            email: Some("jane@x.com".to_string()),
            phone: None,
            avatar: Some("https://cdn/x.png".to_string()),
        };
        let draft = ProfileDraft::prefill(&user);
        assert_eq!(draft.email, "jane@x.com");
        assert_eq!(draft.phone, "");
        assert!(draft.avatar.is_none());
    }
}
