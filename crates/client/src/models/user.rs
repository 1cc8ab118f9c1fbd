//! Signed-in user records.

use serde::{Deserialize, Serialize};

use bistro_core::{UserId, UserRole};

/// The current user's profile.
///
/// `/auth/login` returns only `id`, `username` and `role`; `/auth/user`
/// and the admin user list add `email` (and `address` for the former).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub address: Option<String>,
}

impl UserProfile {
    /// Whether this user may use the admin console.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Body of a successful `/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    pub user: UserProfile,
}
