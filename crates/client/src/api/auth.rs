//! `/auth/*` endpoints.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use bistro_core::Email;

use super::ApiClient;
use crate::error::Result;
use crate::forms::RegisterPayload;
use crate::models::{LoginResponse, MessageResponse, UserProfile};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange credentials for a token. Does not touch the session.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` for wrong credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &Email, password: &SecretString) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        self.post("/auth/login", &body).await
    }

    /// # Errors
    ///
    /// Returns `ClientError::Api` if the backend rejects the account.
    #[instrument(skip(self, payload), fields(username = %payload.username))]
    pub async fn register(&self, payload: &RegisterPayload<'_>) -> Result<MessageResponse> {
        self.post("/auth/register", payload).await
    }

    /// Tell the backend the session is over.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<MessageResponse> {
        self.post("/auth/logout", &serde_json::json!({})).await
    }

    /// Profile of whoever the current token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` if the token is missing or stale.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<UserProfile> {
        self.get("/auth/user").await
    }
}
