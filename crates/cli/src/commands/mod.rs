//! Command implementations.
//!
//! Every command runs against an [`App`]: the API client plus the session
//! restored from the token file.

pub mod account;
pub mod admin;
pub mod browse;
pub mod order;
pub mod reservations;
pub mod reviews;

use bistro_client::models::UserProfile;
use bistro_client::{ApiClient, AuthService, ClientConfig, FileTokenStore, Session};
use tracing::debug;

use crate::error::CliError;
use crate::output;

/// Shared state for one CLI invocation.
pub struct App {
    pub api: ApiClient,
}

impl App {
    /// Open the saved session and check it with the backend.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the token file cannot be read or the HTTP
    /// client cannot be built. A stale token is not an error.
    pub async fn connect(config: &ClientConfig) -> Result<Self, CliError> {
        let session = Session::open(FileTokenStore::new(config.token_path.clone()))?;
        let api = ApiClient::builder(config, session)
            .on_unauthorized(|| output::notice("Your session has expired. Please log in again."))
            .build()?;

        if let Some(user) = AuthService::new(&api).restore().await {
            debug!(username = %user.username, "Session restored");
        }
        Ok(Self { api })
    }

    pub const fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.api)
    }

    /// The signed-in user, or `LoginRequired`.
    pub fn require_login(&self) -> Result<UserProfile, CliError> {
        self.api.session().user().ok_or(CliError::LoginRequired)
    }

    /// The signed-in admin, or `LoginRequired`/`AdminRequired`.
    pub fn require_admin(&self) -> Result<UserProfile, CliError> {
        let user = self.require_login()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(CliError::AdminRequired)
        }
    }
}
