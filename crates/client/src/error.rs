//! Error type for backend calls.
//!
//! Every API method returns [`Result<T>`]. Callers that need to show
//! something to a person use [`ClientError::user_message`], which prefers
//! the server's own wording and falls back to a generic notice.

use reqwest::StatusCode;
use thiserror::Error;

use crate::forms::ValidationError;

/// Shown when neither the server nor the error itself has anything useful.
pub const GENERIC_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Result alias for client operations.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Errors returned by [`ApiClient`](crate::ApiClient) and the services
/// built on it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered 401. The session has already been expired.
    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("session expired"))]
    Unauthorized(Option<String>),

    /// The server answered with a non-success status.
    #[error("API error: {status} - {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: StatusCode,
        /// `message` (or `error`) field of the response body, if any.
        message: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Input was rejected before any request was made.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Reading or writing local state (token file, upload) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered 2xx but said no (e.g. `{"valid": false}`).
    #[error("Rejected: {0}")]
    Rejected(String),

    /// The server answered 2xx with a body missing required data.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Text suitable for showing to the user.
    ///
    /// Server-provided messages are passed through verbatim; transport and
    /// parse failures collapse to [`GENERIC_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            }
            | Self::Unauthorized(Some(message))
            | Self::Rejected(message) => message.clone(),
            Self::Unauthorized(None) => "Your session has expired. Please log in again.".to_string(),
            Self::Validation(err) => err.to_string(),
            Self::Http(_)
            | Self::Api { message: None, .. }
            | Self::Parse(_)
            | Self::Url(_)
            | Self::Io(_)
            | Self::InvalidResponse(_) => GENERIC_MESSAGE.to_string(),
        }
    }

    /// Whether this error came from a 401.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status of the failed response, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: Some("Item is unavailable".to_string()),
        };
        assert_eq!(err.user_message(), "Item is unavailable");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_user_message_falls_back_to_generic() {
        let err = ClientError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_MESSAGE);

        let err = ClientError::InvalidResponse("missing order_id".to_string());
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn test_unauthorized() {
        let err = ClientError::Unauthorized(None);
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(err.user_message().contains("log in"));

        let err = ClientError::Unauthorized(Some("Invalid credentials".to_string()));
        assert_eq!(err.user_message(), "Invalid credentials");
    }
}
