//! CLI error type.

use thiserror::Error;

use bistro_client::checkout::CheckoutError;
use bistro_client::combo::ComboError;
use bistro_client::config::ConfigError;
use bistro_client::forms::ValidationError;
use bistro_client::{AuthError, ClientError, SessionError};

/// Anything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Combo(#[from] ComboError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Please log in first (bistro login)")]
    LoginRequired,

    #[error("Admin access required")]
    AdminRequired,
}

impl CliError {
    /// Text to show the user. Backend messages are passed through.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Client(err) => err.user_message(),
            Self::Auth(err) => err.user_message(),
            Self::Checkout(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
