//! Integration test support for the Bistro client.
//!
//! [`StubBackend`] serves a small, fixed slice of the Bistro REST API on
//! an ephemeral port and records what the client sends, so tests can
//! drive the real [`ApiClient`] end to end.
//!
//! # Accounts
//!
//! | Email | Password | Token |
//! |---|---|---|
//! | `kim@example.com` | `hunter2` | `customer-token` |
//! | `admin@example.com` | `hunter2` | `admin-token` |
//!
//! Any other bearer token gets a 401.
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = StubBackend::start().await?;
//! let api = backend.client(Session::anonymous());
//! let menu = api.menu().await?;
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use bistro_client::{ApiClient, ClientConfig, Session};

pub const CUSTOMER_EMAIL: &str = "kim@example.com";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "hunter2";
pub const CUSTOMER_TOKEN: &str = "customer-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const COUPON_CODE: &str = "SAVE20";
pub const PLACED_ORDER_ID: i32 = 101;

/// A multipart menu form as the backend saw it.
#[derive(Debug, Clone, Default)]
pub struct RecordedUpload {
    pub item_id: Option<i32>,
    pub content_type: Option<String>,
    pub fields: HashMap<String, String>,
    pub image: Option<RecordedImage>,
}

#[derive(Debug, Clone)]
pub struct RecordedImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub len: usize,
}

/// What the stub has seen, plus switches tests flip to force failures.
#[derive(Default)]
pub struct StubState {
    pub orders: Mutex<Vec<Value>>,
    pub coupon_checks: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<RecordedUpload>>,
    pub logout_calls: AtomicUsize,
    pub reject_orders: AtomicBool,
    pub fail_logout: AtomicBool,
}

impl StubState {
    #[must_use]
    pub fn orders(&self) -> Vec<Value> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn coupon_checks(&self) -> Vec<String> {
        self.coupon_checks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A running stub backend. The server stops when this is dropped.
pub struct StubBackend {
    addr: SocketAddr,
    pub state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubBackend {
    /// Bind `127.0.0.1:0` and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(StubState::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(Arc::clone(&state));

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Base URL including the `/api` prefix.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::for_api_url(&self.api_url())
            .unwrap_or_else(|e| panic!("stub URL should parse: {e}"))
    }

    /// A client for this backend using `session`.
    #[must_use]
    pub fn client(&self, session: Session) -> ApiClient {
        ApiClient::new(&self.config(), session)
            .unwrap_or_else(|e| panic!("HTTP client should build: {e}"))
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/user", get(current_user))
        .route("/api/menu", get(menu).post(create_menu_item))
        .route("/api/menu/{id}", put(update_menu_item))
        .route("/api/combos", get(combos))
        .route("/api/coupons/verify", post(verify_coupon))
        .route("/api/orders", get(order_history).post(place_order))
        .with_state(state)
}

// =============================================================================
// Helpers
// =============================================================================

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Caller {
    Customer,
    Admin,
}

fn caller(headers: &HeaderMap) -> Result<Caller, Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    match token {
        Some(CUSTOMER_TOKEN) => Ok(Caller::Customer),
        Some(ADMIN_TOKEN) => Ok(Caller::Admin),
        Some(_) => Err(message(StatusCode::UNAUTHORIZED, "Token is invalid")),
        None => Err(message(StatusCode::UNAUTHORIZED, "Authentication required")),
    }
}

fn require_admin(headers: &HeaderMap) -> Result<(), Response> {
    match caller(headers)? {
        Caller::Admin => Ok(()),
        Caller::Customer => Err(message(StatusCode::FORBIDDEN, "Unauthorized")),
    }
}

fn profile(caller: Caller) -> Value {
    match caller {
        Caller::Customer => json!({
            "id": 1, "username": "kim", "email": CUSTOMER_EMAIL,
            "role": "customer", "address": "1 Main St"
        }),
        Caller::Admin => json!({
            "id": 2, "username": "admin", "email": ADMIN_EMAIL, "role": "admin"
        }),
    }
}

// =============================================================================
// Auth
// =============================================================================

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let (token, who) = match (email, password) {
        (CUSTOMER_EMAIL, PASSWORD) => (CUSTOMER_TOKEN, Caller::Customer),
        (ADMIN_EMAIL, PASSWORD) => (ADMIN_TOKEN, Caller::Admin),
        _ => return message(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    };
    Json(json!({
        "message": "Login successful",
        "token": token,
        "user": profile(who),
    }))
    .into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == CUSTOMER_EMAIL {
        return message(StatusCode::BAD_REQUEST, "Email already registered");
    }
    message(StatusCode::CREATED, "User registered successfully")
}

async fn logout(State(state): State<Arc<StubState>>) -> Response {
    state.logout_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_logout.load(Ordering::SeqCst) {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "Logout failed");
    }
    message(StatusCode::OK, "Logged out successfully")
}

async fn current_user(headers: HeaderMap) -> Response {
    match caller(&headers) {
        Ok(who) => Json(profile(who)).into_response(),
        Err(response) => response,
    }
}

// =============================================================================
// Menu
// =============================================================================

async fn menu() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "Steak", "description": "Ribeye", "price": 30.0,
         "category": "Mains", "image_url": null, "is_deal": false, "availability": true},
        {"id": 2, "name": "Wine", "description": "House red", "price": 20.0,
         "category": "Drinks", "image_url": null, "is_deal": false, "availability": true},
        {"id": 3, "name": "Fries", "description": null, "price": 3.5,
         "category": "Sides", "image_url": "/uploads/fries.png", "is_deal": true,
         "availability": true}
    ]))
}

async fn combos() -> Json<Value> {
    Json(json!([{
        "id": 1, "name": "Burger Meal", "description": "Burger, fries and two sodas",
        "combo_price": 12.0, "original_price": 15.5, "savings": 3.5,
        "image_url": null, "category": "Burgers",
        "items": [
            {"id": 10, "name": "Burger", "price": 9.0, "quantity": 1, "image_url": null, "category": "Burgers"},
            {"id": 11, "name": "Fries", "price": 3.5, "quantity": 1, "image_url": null, "category": "Sides"},
            {"id": 12, "name": "Soda", "price": 1.5, "quantity": 2, "image_url": null, "category": "Drinks"}
        ]
    }]))
}

async fn read_menu_form(
    headers: &HeaderMap,
    multipart: &mut Multipart,
) -> Result<RecordedUpload, MultipartError> {
    let mut upload = RecordedUpload {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        ..RecordedUpload::default()
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        if let Some(file_name) = field.file_name().map(str::to_owned) {
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field.bytes().await?;
            upload.image = Some(RecordedImage {
                file_name,
                content_type,
                len: bytes.len(),
            });
        } else {
            let text = field.text().await?;
            upload.fields.insert(name, text);
        }
    }
    Ok(upload)
}

async fn create_menu_item(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(response) = require_admin(&headers) {
        return response;
    }
    match read_menu_form(&headers, &mut multipart).await {
        Ok(upload) => {
            state
                .uploads
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(upload);
            (
                StatusCode::CREATED,
                Json(json!({ "message": "Menu item created", "id": 42 })),
            )
                .into_response()
        }
        Err(e) => message(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

async fn update_menu_item(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(response) = require_admin(&headers) {
        return response;
    }
    match read_menu_form(&headers, &mut multipart).await {
        Ok(mut upload) => {
            upload.item_id = Some(id);
            state
                .uploads
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(upload);
            message(StatusCode::OK, "Menu item updated")
        }
        Err(e) => message(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

// =============================================================================
// Coupons & orders
// =============================================================================

async fn verify_coupon(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    let code = body["code"].as_str().unwrap_or_default().to_owned();
    state
        .coupon_checks
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(code.clone());

    if code == COUPON_CODE {
        return Json(json!({ "valid": true, "discount": 20.0 })).into_response();
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "valid": false, "message": "Invalid or expired coupon" })),
    )
        .into_response()
}

async fn place_order(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = caller(&headers) {
        return response;
    }
    state
        .orders
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(body);

    if state.reject_orders.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Kitchen is closed" })),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Order placed", "order_id": PLACED_ORDER_ID })),
    )
        .into_response()
}

async fn order_history(headers: HeaderMap) -> Response {
    if let Err(response) = caller(&headers) {
        return response;
    }
    Json(json!([{
        "id": PLACED_ORDER_ID, "status": "preparing", "total": 40.0,
        "date": "2024-06-01T18:04:11",
        "items": [
            {"name": "Steak", "quantity": 1, "id": 1, "combo_id": null},
            {"name": "Wine", "quantity": 1, "id": 2, "combo_id": null}
        ]
    }]))
    .into_response()
}
