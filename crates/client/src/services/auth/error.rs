//! Authentication error types.

use thiserror::Error;

use crate::error::ClientError;
use crate::forms::ValidationError;

/// Errors that can occur during login or registration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input rejected before anything was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend refused or could not be reached.
    #[error(transparent)]
    Api(#[from] ClientError),
}

impl AuthError {
    /// Text to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Api(err) => err.user_message(),
        }
    }
}
