//! Typed REST client for the Bistro backend.
//!
//! One [`ApiClient`] serves every endpoint. Endpoint methods live in the
//! submodules, grouped by resource, as `impl ApiClient` blocks.
//!
//! # Authentication
//!
//! The client reads the bearer token from the [`Session`] it was built
//! with. Any 401 response, from any endpoint, expires that session and
//! calls the registered `on_unauthorized` handler before the error is
//! returned.
//!
//! # Example
//!
//! ```rust,ignore
//! let session = Session::open(FileTokenStore::new(&config.token_path))?;
//! let api = ApiClient::builder(&config, session)
//!     .on_unauthorized(|| eprintln!("Session expired, please log in again."))
//!     .build()?;
//! let menu = api.menu().await?;
//! ```

mod admin;
mod auth;
mod categories;
mod combos;
mod coupons;
mod menu;
mod orders;
mod reservations;
mod reviews;

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::forms::MenuItemFields;
use crate::session::Session;

/// Callback run after a 401 has expired the session.
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// Client for the Bistro REST API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    session: Session,
    on_unauthorized: Option<UnauthorizedHandler>,
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    config: ClientConfig,
    session: Session,
    on_unauthorized: Option<UnauthorizedHandler>,
}

impl ApiClientBuilder {
    /// Register the observer run whenever a request comes back 401.
    #[must_use]
    pub fn on_unauthorized(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(handler));
        self
    }

    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client fails to build.
    pub fn build(self) -> Result<ApiClient> {
        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .build()?;

        Ok(ApiClient {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: self.config.api_url,
                session: self.session,
                on_unauthorized: self.on_unauthorized,
            }),
        })
    }
}

impl ApiClient {
    #[must_use]
    pub fn builder(config: &ClientConfig, session: Session) -> ApiClientBuilder {
        ApiClientBuilder {
            config: config.clone(),
            session,
            on_unauthorized: None,
        }
    }

    /// Client with no unauthorized observer.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self> {
        Self::builder(config, session).build()
    }

    /// The session whose token this client sends.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Append `path` (which may carry a query string) to the base URL.
    fn url(&self, path: &str) -> Result<Url> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        let builder = self.inner.client.request(method, url);
        Ok(match self.inner.session.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send a request and turn non-success statuses into errors.
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response> {
        let response = builder.send().await.map_err(|e| {
            error!(path, error = %e, "Request to backend failed");
            ClientError::Http(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(path, status = %status, "Backend request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        if status == StatusCode::UNAUTHORIZED {
            warn!(path, "Backend returned 401, expiring session");
            self.handle_unauthorized();
            return Err(ClientError::Unauthorized(message));
        }

        warn!(
            path,
            status = %status,
            message = message.as_deref().unwrap_or(""),
            "Backend returned non-success status"
        );
        Err(ClientError::Api { status, message })
    }

    fn handle_unauthorized(&self) {
        self.inner.session.expire();
        if let Some(handler) = &self.inner.on_unauthorized {
            handler();
        }
    }

    /// Read and parse a successful response body.
    async fn handle_response<T: DeserializeOwned>(response: Response, path: &str) -> Result<T> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!(
                path,
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            ClientError::Parse(e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::GET, path)?;
        let response = self.send(builder, path).await?;
        Self::handle_response(response, path).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send_json(Method::POST, path, body).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send_json(Method::PUT, path, body).await
    }

    async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send_json(Method::PATCH, path, body).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::DELETE, path)?;
        let response = self.send(builder, path).await?;
        Self::handle_response(response, path).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let builder = self.request(method, path)?.json(body);
        let response = self.send(builder, path).await?;
        Self::handle_response(response, path).await
    }

    /// Send a multipart form. reqwest sets the content type and boundary.
    async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        fields: MenuItemFields,
    ) -> Result<T> {
        let form = multipart_form(fields)?;
        let builder = self.request(method, path)?.multipart(form);
        let response = self.send(builder, path).await?;
        Self::handle_response(response, path).await
    }
}

/// Pull `message` (or failing that `error`) out of an error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(str::to_owned)
}

fn multipart_form(fields: MenuItemFields) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in fields.text_parts() {
        form = form.text(name, value);
    }
    if let Some(image) = fields.image {
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(image.content_type)?;
        form = form.part("image", part);
    }
    Ok(form)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let config = ClientConfig::for_api_url(base).unwrap();
        ApiClient::new(&config, Session::anonymous()).unwrap()
    }

    #[test]
    fn test_url_keeps_base_path() {
        let api = client("http://localhost:5000/api");
        assert_eq!(
            api.url("/menu").unwrap().as_str(),
            "http://localhost:5000/api/menu"
        );
        assert_eq!(
            api.url("menu?all=true").unwrap().as_str(),
            "http://localhost:5000/api/menu?all=true"
        );

        let trailing = client("http://localhost:5000/api/");
        assert_eq!(
            trailing.url("/orders").unwrap().as_str(),
            "http://localhost:5000/api/orders"
        );
    }

    #[test]
    fn test_error_message_prefers_message() {
        assert_eq!(
            error_message(r#"{"message": "Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            error_message(r#"{"error": "UNIQUE constraint failed"}"#).as_deref(),
            Some("UNIQUE constraint failed")
        );
        assert_eq!(
            error_message(r#"{"message": "first", "error": "second"}"#).as_deref(),
            Some("first")
        );
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(r#"{"message": ""}"#), None);
    }
}
