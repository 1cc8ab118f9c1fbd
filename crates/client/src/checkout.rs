//! Coupon application, price breakdown and order placement.
//!
//! Pricing is a pure function of the cart and the applied coupon:
//!
//! ```text
//! discount = subtotal * percent / 100   (0 without a coupon)
//! total    = subtotal - discount
//! ```
//!
//! A coupon is only ever applied after the backend has confirmed it. The
//! network sits behind [`CouponVerifier`] and [`OrderSubmitter`] so the
//! flow can be driven without a server.

use std::future::Future;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use bistro_core::{DiscountPercent, FulfillmentType, OrderId, PaymentMethod};

use crate::cart::{Cart, CartLine, LineId};
use crate::error::ClientError;
use crate::models::OrderPlaced;
use crate::session::Session;

/// Field error shown when the backend does not accept a code.
pub const INVALID_COUPON_MESSAGE: &str = "Invalid or expired coupon";

/// A code the backend has confirmed, with its discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    pub code: String,
    pub discount: DiscountPercent,
}

/// Checks a coupon code with the backend.
pub trait CouponVerifier {
    /// Resolve `code` to a valid coupon, or fail.
    fn verify_coupon(&self, code: &str) -> impl Future<Output = Result<Coupon, ClientError>> + Send;
}

/// Sends a finished order to the backend.
pub trait OrderSubmitter {
    fn submit_order(
        &self,
        payload: &OrderPayload,
    ) -> impl Future<Output = Result<OrderPlaced, ClientError>> + Send;
}

/// Why checkout could not proceed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Please enter a coupon code")]
    EmptyCouponCode,

    #[error("{0}")]
    InvalidCoupon(String),

    #[error("Please login first to place an order.")]
    LoginRequired,

    #[error("Your cart is empty")]
    EmptyCart,

    /// The session expired while verifying a coupon.
    #[error("Coupon check failed: {0}")]
    Session(#[source] ClientError),

    #[error("Order failed: {0}")]
    Submit(#[source] ClientError),
}

impl CheckoutError {
    /// Text to show the user. Server messages are passed through.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Session(err) | Self::Submit(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Amounts shown on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Price a cart with an optional coupon.
#[must_use]
pub fn price_breakdown(cart: &Cart, coupon: Option<&Coupon>) -> PriceBreakdown {
    let subtotal = cart.subtotal();
    let discount = coupon.map_or(Decimal::ZERO, |c| c.discount.apply_to(subtotal));
    PriceBreakdown {
        subtotal,
        discount,
        total: subtotal - discount,
    }
}

// =============================================================================
// Order draft
// =============================================================================

/// The order as it will be submitted. Built fresh at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub fulfillment: FulfillmentType,
    pub payment: PaymentMethod,
}

impl OrderDraft {
    #[must_use]
    pub fn new(
        cart: &Cart,
        coupon: Option<&Coupon>,
        fulfillment: FulfillmentType,
        payment: PaymentMethod,
    ) -> Self {
        let PriceBreakdown {
            subtotal,
            discount,
            total,
        } = price_breakdown(cart, coupon);
        Self {
            lines: cart.lines().to_vec(),
            subtotal,
            discount,
            total,
            fulfillment,
            payment,
        }
    }

    /// Wire body for `POST /orders`. The total is rounded to cents.
    #[must_use]
    pub fn payload(&self) -> OrderPayload {
        OrderPayload {
            items: self
                .lines
                .iter()
                .map(|line| OrderLinePayload {
                    id: line.id(),
                    quantity: line.quantity(),
                    name: line.name().to_owned(),
                    price: line.unit_price(),
                })
                .collect(),
            total: self
                .total
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            payment: self.payment,
            fulfillment: self.fulfillment,
        }
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPayload {
    pub items: Vec<OrderLinePayload>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment: PaymentMethod,
    #[serde(rename = "type")]
    pub fulfillment: FulfillmentType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLinePayload {
    pub id: LineId,
    pub quantity: u32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

// =============================================================================
// Checkout state
// =============================================================================

/// Checkout page state: the applied coupon and the customer's choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkout {
    applied_coupon: Option<Coupon>,
    coupon_error: Option<String>,
    pub fulfillment: FulfillmentType,
    pub payment: PaymentMethod,
}

impl Checkout {
    #[must_use]
    pub fn new(fulfillment: FulfillmentType, payment: PaymentMethod) -> Self {
        Self {
            fulfillment,
            payment,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn applied_coupon(&self) -> Option<&Coupon> {
        self.applied_coupon.as_ref()
    }

    /// Field error from the last failed coupon attempt.
    #[must_use]
    pub fn coupon_error(&self) -> Option<&str> {
        self.coupon_error.as_deref()
    }

    #[must_use]
    pub fn breakdown(&self, cart: &Cart) -> PriceBreakdown {
        price_breakdown(cart, self.applied_coupon.as_ref())
    }

    /// Verify `code` and apply it.
    ///
    /// Codes are trimmed and upper-cased first. On rejection the applied
    /// coupon is cleared and [`coupon_error`](Self::coupon_error) is set.
    ///
    /// # Errors
    ///
    /// - `EmptyCouponCode` for a blank code (no request is made)
    /// - `InvalidCoupon` if the backend does not accept the code
    /// - `Session` if the backend answered 401
    pub async fn apply_coupon<V: CouponVerifier + Sync>(
        &mut self,
        verifier: &V,
        code: &str,
    ) -> Result<&Coupon, CheckoutError> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(CheckoutError::EmptyCouponCode);
        }

        match verifier.verify_coupon(&code).await {
            Ok(coupon) => {
                info!(code = %coupon.code, discount = %coupon.discount, "Coupon applied");
                self.coupon_error = None;
                Ok(&*self.applied_coupon.insert(coupon))
            }
            Err(err) => {
                self.applied_coupon = None;
                if err.is_unauthorized() {
                    return Err(CheckoutError::Session(err));
                }
                warn!(code = %code, error = %err, "Coupon rejected");
                self.coupon_error = Some(INVALID_COUPON_MESSAGE.to_string());
                Err(CheckoutError::InvalidCoupon(INVALID_COUPON_MESSAGE.to_string()))
            }
        }
    }

    pub fn remove_coupon(&mut self) {
        self.applied_coupon = None;
        self.coupon_error = None;
    }

    #[must_use]
    pub fn draft(&self, cart: &Cart) -> OrderDraft {
        OrderDraft::new(
            cart,
            self.applied_coupon.as_ref(),
            self.fulfillment,
            self.payment,
        )
    }

    /// Submit the cart as an order.
    ///
    /// On success the cart is emptied and the coupon removed. On failure
    /// both are left exactly as they were so the customer can retry.
    ///
    /// # Errors
    ///
    /// - `LoginRequired` if nobody is signed in (no request is made)
    /// - `EmptyCart` if there is nothing to order (no request is made)
    /// - `Submit` with the backend's error otherwise
    pub async fn place_order<S: OrderSubmitter + Sync>(
        &mut self,
        cart: &mut Cart,
        submitter: &S,
        session: &Session,
    ) -> Result<OrderId, CheckoutError> {
        if !session.is_authenticated() {
            return Err(CheckoutError::LoginRequired);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let draft = self.draft(cart);
        let placed = submitter
            .submit_order(&draft.payload())
            .await
            .map_err(|err| {
                warn!(error = %err, "Order submission failed");
                CheckoutError::Submit(err)
            })?;

        info!(order_id = %placed.order_id, total = %draft.total, "Order placed");
        cart.clear();
        self.remove_coupon();
        Ok(placed.order_id)
    }
}
