//! Screen state machines.
//!
//! Every entity gets the same four shapes:
//! - [`ListScreen`] - one page of a collection
//! - [`DetailScreen`] - one record
//! - [`CreateScreen`] - validate a draft, submit, go to the list
//! - [`UpdateScreen`] - fetch, pre-fill a draft once, submit, go back
//!
//! Screens own their state and take the client and navigator as arguments.
//! An authentication failure anywhere sends the navigator to the login
//! screen; the client has already cleared the session by then.

pub mod auth;
pub mod create;
pub mod detail;
pub mod entities;
pub mod list;
pub mod update;

pub use auth::{DashboardScreen, LoginScreen};
pub use create::CreateScreen;
pub use detail::DetailScreen;
pub use list::{ListScreen, PaginationControls};
pub use update::UpdateScreen;

use crate::error::ApiError;
use crate::navigation::Navigator;

/// Progress of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    /// Static message; nothing retries automatically.
    Error(String),
}

impl<T> LoadState<T> {
    /// The loaded value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// The error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Progress of a form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Initial fetch of an update screen.
    Loading,
    #[default]
    Editing,
    Submitting,
    /// Submitted; the navigator has moved on.
    Succeeded,
    /// Validation or server failure. The draft stays editable.
    Failed(String),
    /// An update screen could not fetch its record.
    LoadFailed(String),
}

impl FormPhase {
    /// Whether the draft may be edited and resubmitted.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing | Self::Failed(_))
    }

    /// Headline error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) | Self::LoadFailed(message) => Some(message),
            _ => None,
        }
    }
}

/// Turn an API error into the screen's message, redirecting on auth failure.
pub(crate) fn screen_error(error: &ApiError, nav: &mut Navigator) -> String {
    if error.is_auth_failure() {
        nav.to_login();
    }
    error.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Route;

    #[test]
    fn test_auth_failure_redirects() {
        let mut nav = Navigator::new(Route::ProductList);
        let message = screen_error(&ApiError::Unauthorized { status: 401 }, &mut nav);
        assert_eq!(nav.current(), &Route::Login);
        assert!(message.contains("401"));
    }

    #[test]
    fn test_other_errors_stay_put() {
        let mut nav = Navigator::new(Route::ProductList);
        let error = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
            body: None,
        };
        assert_eq!(screen_error(&error, &mut nav), "API error: 500 - boom");
        assert_eq!(nav.current(), &Route::ProductList);
    }

    #[test]
    fn test_form_phase_editing() {
        assert!(FormPhase::Editing.is_editing());
        assert!(FormPhase::Failed("x".to_string()).is_editing());
        assert!(!FormPhase::Submitting.is_editing());
        assert_eq!(FormPhase::LoadFailed("gone".to_string()).error(), Some("gone"));
    }
}
