//! Authentication service.
//!
//! Drives the session lifecycle against the backend: restoring a saved
//! token at startup, password login, registration and logout.

mod error;

pub use error::AuthError;

use secrecy::SecretString;
use tracing::{info, instrument, warn};

use crate::api::ApiClient;
use crate::forms::{RegisterForm, validate_login};
use crate::models::{MessageResponse, UserProfile};

/// Authentication service.
///
/// Borrows the API client and works on the session it was built with.
pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Resolve a saved token to a user profile.
    ///
    /// Fails open: if the token is rejected or the backend cannot be
    /// reached, the session is expired and `None` is returned.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Option<UserProfile> {
        let session = self.api.session();
        if !session.has_token() {
            return None;
        }

        match self.api.current_user().await {
            Ok(user) => {
                session.set_user(user.clone());
                Some(user)
            }
            Err(e) => {
                warn!(error = %e, "Stored token could not be restored");
                session.expire();
                None
            }
        }
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for a malformed email or empty
    /// password (no request is made), `AuthError::Api` otherwise.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<UserProfile, AuthError> {
        let email = validate_login(email, password)?;
        let response = self.api.login(&email, password).await?;

        let session = self.api.session();
        if let Err(e) = session.set_token(SecretString::from(response.token)) {
            warn!(error = %e, "Token not persisted; login lasts for this run only");
        }
        session.set_user(response.user.clone());

        info!(user_id = %response.user.id, role = %response.user.role, "Logged in");
        Ok(response.user)
    }

    /// Create an account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if a required field is missing,
    /// `AuthError::Api` if the backend rejects the account.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: &RegisterForm) -> Result<MessageResponse, AuthError> {
        let payload = form.validate()?;
        let response = self.api.register(&payload).await?;
        info!("Account registered");
        Ok(response)
    }

    /// Log out. The server is told on a best-effort basis; the local
    /// session is cleared whatever it says.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "Logout request failed");
        }
        self.api.session().expire();
        info!("Logged out");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::forms::ValidationError;
    use crate::session::Session;

    fn api() -> ApiClient {
        let config = ClientConfig::for_api_url("http://127.0.0.1:9/api").unwrap();
        ApiClient::new(&config, Session::anonymous()).unwrap()
    }

    #[tokio::test]
    async fn test_login_validates_before_sending() {
        let api = api();
        let auth = AuthService::new(&api);

        let err = auth
            .login("not-an-email", &SecretString::from("pw".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthError::Validation(ValidationError::Email(_))
        ));

        let err = auth
            .login("kim@example.com", &SecretString::from(String::new()))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Password is required");
    }

    #[tokio::test]
    async fn test_restore_without_token_skips_request() {
        let api = api();
        assert!(AuthService::new(&api).restore().await.is_none());
    }
}
