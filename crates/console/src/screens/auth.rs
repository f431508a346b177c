//! Login and dashboard screens.

use stampdesk_core::dto::CurrentUser;
use stampdesk_core::forms::LoginDraft;
use stampdesk_core::{FieldError, FormDraft};
use tracing::warn;

use super::{FormPhase, LoadState, screen_error};
use crate::api::{ApiClient, ops};
use crate::error::ApiError;
use crate::navigation::{Navigator, Route};

const NOT_AVAILABLE: &str = "N/A";

/// Credentials form. Success stores the token and opens the dashboard.
#[derive(Debug, Default)]
pub struct LoginScreen {
    pub draft: LoginDraft,
    phase: FormPhase,
    field_errors: Vec<FieldError>,
}

impl LoginScreen {
    #[must_use]
    pub fn new(draft: LoginDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn phase(&self) -> &FormPhase {
        &self.phase
    }

    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Validate, sign in and navigate to the dashboard.
    pub async fn submit(&mut self, client: &ApiClient, nav: &mut Navigator) -> bool {
        let request = match self.draft.submit() {
            Ok(request) => request,
            Err(errors) => {
                self.phase = FormPhase::Failed(errors.to_string());
                self.field_errors = errors.errors().to_vec();
                return false;
            }
        };

        self.field_errors.clear();
        self.phase = FormPhase::Submitting;
        match client.login(request).await {
            Ok(_) => {
                self.phase = FormPhase::Succeeded;
                nav.navigate(Route::Dashboard);
                true
            }
            Err(ApiError::Unauthorized { .. }) => {
                self.phase = FormPhase::Failed("Invalid credentials".to_string());
                nav.to_login();
                false
            }
            Err(e) => {
                self.phase = FormPhase::Failed(screen_error(&e, nav));
                false
            }
        }
    }
}

/// Landing screen showing the signed-in user.
#[derive(Debug)]
pub struct DashboardScreen {
    state: LoadState<CurrentUser>,
}

impl DashboardScreen {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: LoadState::Loading,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState<CurrentUser> {
        &self.state
    }

    /// Load the current user. Without a token, or on any failure, the
    /// session is cleared and the navigator goes to login.
    pub async fn load(&mut self, client: &ApiClient, nav: &mut Navigator) {
        self.state = LoadState::Loading;

        if !client.session().is_authenticated() {
            self.sign_out(client, nav, "Not signed in".to_string()).await;
            return;
        }

        match client.refetch::<ops::GetCurrentUser>(()).await {
            Ok(user) => self.state = LoadState::Loaded(user),
            Err(e) => {
                let message = e.to_string();
                self.sign_out(client, nav, message).await;
            }
        }
    }

    async fn sign_out(&mut self, client: &ApiClient, nav: &mut Navigator, message: String) {
        if let Err(e) = client.logout().await {
            warn!(error = %e, "Failed to clear session");
        }
        nav.to_login();
        self.state = LoadState::Error(message);
    }

    /// `Welcome, <name>` plus contact lines, once loaded.
    #[must_use]
    pub fn greeting(&self) -> Option<String> {
        self.state.value().map(welcome)
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Dashboard text for `user`.
#[must_use]
pub fn welcome(user: &CurrentUser) -> String {
    let or_na = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    };
    format!(
        "Welcome, {}\nEmail: {}\nPhone: {}",
        user.full_name,
        or_na(&user.email),
        or_na(&user.phone)
    )
}
