//! Cart and checkout driven through the real client.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::Ordering;

use bistro_client::checkout::{CheckoutError, INVALID_COUPON_MESSAGE};
use bistro_client::combo::{ComboGroup, ComboSelection};
use bistro_client::{ApiClient, AuthService, Cart, Checkout, MemoryTokenStore, Session};
use bistro_core::{FulfillmentType, MenuItemId, OrderId, PaymentMethod};
use bistro_integration_tests::{CUSTOMER_TOKEN, PLACED_ORDER_ID, StubBackend};
use rust_decimal::Decimal;

async fn signed_in(backend: &StubBackend) -> ApiClient {
    let session = Session::open(MemoryTokenStore::with_token(CUSTOMER_TOKEN)).unwrap();
    let api = backend.client(session);
    AuthService::new(&api).restore().await.unwrap();
    api
}

/// Steak ($30) and wine ($20).
async fn fifty_dollar_cart(api: &ApiClient) -> Cart {
    let menu = api.menu().await.unwrap();
    let mut cart = Cart::new();
    for id in [1, 2] {
        let item = menu.iter().find(|item| item.id == MenuItemId::new(id)).unwrap();
        cart.add_item(item);
    }
    cart
}

#[tokio::test]
async fn test_order_with_coupon() {
    let backend = StubBackend::start().await.unwrap();
    let api = signed_in(&backend).await;
    let mut cart = fifty_dollar_cart(&api).await;

    let mut checkout = Checkout::new(FulfillmentType::Pickup, PaymentMethod::Card);
    checkout.apply_coupon(&api, " save20 ").await.unwrap();
    assert_eq!(backend.state.coupon_checks(), vec!["SAVE20".to_string()]);

    let breakdown = checkout.breakdown(&cart);
    assert_eq!(breakdown.subtotal, Decimal::from(50));
    assert_eq!(breakdown.discount, Decimal::from(10));
    assert_eq!(breakdown.total, Decimal::from(40));

    let order_id = checkout
        .place_order(&mut cart, &api, api.session())
        .await
        .unwrap();
    assert_eq!(order_id, OrderId::new(PLACED_ORDER_ID));
    assert!(cart.is_empty());
    assert!(checkout.applied_coupon().is_none());

    let orders = backend.state.orders();
    assert_eq!(orders.len(), 1);
    let body = &orders[0];
    assert_eq!(body["total"], 40.0);
    assert_eq!(body["type"], "pickup");
    assert_eq!(body["payment"], "card");
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][1]["name"], "Wine");
    assert_eq!(body["items"][1]["quantity"], 1);

    let history = api.orders().await.unwrap();
    assert_eq!(history[0].id, order_id);
}

#[tokio::test]
async fn test_rejected_order_keeps_cart() {
    let backend = StubBackend::start().await.unwrap();
    backend.state.reject_orders.store(true, Ordering::SeqCst);
    let api = signed_in(&backend).await;
    let mut cart = fifty_dollar_cart(&api).await;

    let mut checkout = Checkout::default();
    checkout.apply_coupon(&api, "SAVE20").await.unwrap();

    let err = checkout
        .place_order(&mut cart, &api, api.session())
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Submit(_)));
    assert_eq!(err.user_message(), "Kitchen is closed");
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(checkout.breakdown(&cart).total, Decimal::from(40));
}

#[tokio::test]
async fn test_invalid_coupon() {
    let backend = StubBackend::start().await.unwrap();
    let api = signed_in(&backend).await;
    let cart = fifty_dollar_cart(&api).await;

    let mut checkout = Checkout::default();
    let err = checkout.apply_coupon(&api, "bogus").await.unwrap_err();

    assert!(matches!(err, CheckoutError::InvalidCoupon(_)));
    assert_eq!(checkout.coupon_error(), Some(INVALID_COUPON_MESSAGE));
    assert_eq!(checkout.breakdown(&cart).total, Decimal::from(50));
    // The session survives a rejected coupon.
    assert!(api.session().is_authenticated());
}

#[tokio::test]
async fn test_customized_combo_order() {
    let backend = StubBackend::start().await.unwrap();
    let api = signed_in(&backend).await;
    let combos = api.combos().await.unwrap();

    let selection = ComboSelection::default()
        .with(ComboGroup::Side, "onion_rings")
        .unwrap();
    let mut cart = Cart::new();
    cart.add_customized_combo(&combos[0], &selection);
    assert_eq!(cart.subtotal(), Decimal::new(1350, 2));

    let mut checkout = Checkout::default();
    checkout
        .place_order(&mut cart, &api, api.session())
        .await
        .unwrap();

    let orders = backend.state.orders();
    let line = &orders[0]["items"][0];
    assert!(line["id"].as_str().unwrap().starts_with("combo-1-"));
    assert_eq!(line["price"], 13.5);
    assert_eq!(orders[0]["total"], 13.5);
}

#[tokio::test]
async fn test_combo_expands_into_items() {
    let backend = StubBackend::start().await.unwrap();
    let api = signed_in(&backend).await;
    let combos = api.combos().await.unwrap();

    let mut cart = Cart::new();
    cart.add_combo_items(&combos[0]);

    // Burger, fries and two sodas at their own prices.
    assert_eq!(cart.lines().len(), 3);
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.subtotal(), Decimal::new(1550, 2));
}

#[tokio::test]
async fn test_signed_out_order_is_not_sent() {
    let backend = StubBackend::start().await.unwrap();
    let api = backend.client(Session::anonymous());
    let mut cart = fifty_dollar_cart(&api).await;

    let err = Checkout::default()
        .place_order(&mut cart, &api, api.session())
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::LoginRequired));
    assert!(backend.state.orders().is_empty());
    assert_eq!(cart.lines().len(), 2);
}
