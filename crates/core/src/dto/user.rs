//! Authenticated user profile.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// The account behind the current session (`GET /me`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Server-assigned id. Some deployments omit it on `/me`.
    #[serde(default)]
    pub id: Option<UserId>,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
}
