//! Bistro client library.
//!
//! Everything the ordering front end needs besides rendering:
//!
//! - [`api`] - Typed REST client for the backend (bearer auth, 401 handling)
//! - [`session`] - Signed-in identity and the persisted token
//! - [`services::auth`] - Login, registration, logout and session restore
//! - [`cart`] - In-memory cart with derived totals
//! - [`combo`] - Combo customization options and pricing
//! - [`checkout`] - Coupon application, price breakdown and order placement
//! - [`forms`] - Validation that runs before anything is sent
//!
//! The backend owns all persistent state. This crate mirrors the records it
//! renders and keeps the cart and session in memory.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod combo;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod services;
pub mod session;

pub use api::{ApiClient, ApiClientBuilder};
pub use cart::{Cart, CartItem, CartLine, ComboLine, LineId, PlainLine};
pub use checkout::{
    Checkout, CheckoutError, Coupon, CouponVerifier, OrderDraft, OrderPayload, OrderSubmitter,
    PriceBreakdown, price_breakdown,
};
pub use combo::{ComboGroup, ComboSelection, Customizations};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use services::auth::{AuthError, AuthService};
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionError, TokenStore};
