//! Any 401 expires the session and notifies the registered observer.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bistro_client::{ApiClient, ClientError, MemoryTokenStore, Session};
use bistro_integration_tests::StubBackend;

#[tokio::test]
async fn test_401_expires_session_and_notifies() {
    let backend = StubBackend::start().await.unwrap();
    let session = Session::open(MemoryTokenStore::with_token("expired-token")).unwrap();
    let notified = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&notified);
    let api = ApiClient::builder(&backend.config(), session)
        .on_unauthorized(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    let err = api.orders().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Token is invalid");
    assert_eq!(notified.load(Ordering::SeqCst), 1);
    assert!(!api.session().has_token());

    // The next request goes out without a token and is refused again.
    let err = api.orders().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert_eq!(notified.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_public_endpoints_work_signed_out() {
    let backend = StubBackend::start().await.unwrap();
    let api = backend.client(Session::anonymous());

    let menu = api.menu().await.unwrap();
    assert_eq!(menu.len(), 3);
    let combos = api.combos().await.unwrap();
    assert_eq!(combos[0].items.len(), 3);
}
