//! Admin menu edits go out as multipart forms.

#![allow(clippy::unwrap_used)]

use bistro_client::forms::{ImageUpload, MenuItemForm};
use bistro_client::{ApiClient, AuthService, MemoryTokenStore, Session};
use bistro_core::MenuItemId;
use bistro_integration_tests::{ADMIN_TOKEN, CUSTOMER_TOKEN, StubBackend};

async fn signed_in_as(backend: &StubBackend, token: &str) -> ApiClient {
    let session = Session::open(MemoryTokenStore::with_token(token)).unwrap();
    let api = backend.client(session);
    AuthService::new(&api).restore().await.unwrap();
    api
}

fn burger_form() -> MenuItemForm {
    MenuItemForm {
        name: " Veggie Burger ".to_string(),
        description: Some("Grilled halloumi".to_string()),
        price: "9.50".to_string(),
        category: "Burgers".to_string(),
        is_deal: false,
        image: Some(ImageUpload::new("burger.PNG", vec![0x89, 0x50, 0x4e]).unwrap()),
    }
}

#[tokio::test]
async fn test_create_menu_item_with_image() {
    let backend = StubBackend::start().await.unwrap();
    let api = signed_in_as(&backend, ADMIN_TOKEN).await;
    assert!(api.session().is_admin());

    let created = api
        .create_menu_item(burger_form().validate().unwrap())
        .await
        .unwrap();
    assert_eq!(created.id, MenuItemId::new(42));

    let uploads = backend.state.uploads();
    assert_eq!(uploads.len(), 1);
    let upload = &uploads[0];

    let content_type = upload.content_type.as_deref().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    assert_eq!(upload.fields["name"], "Veggie Burger");
    assert_eq!(upload.fields["price"], "9.50");
    assert_eq!(upload.fields["category"], "Burgers");
    assert_eq!(upload.fields["is_deal"], "false");
    assert!(!upload.fields.contains_key("availability"));

    let image = upload.image.as_ref().unwrap();
    assert_eq!(image.file_name, "burger.PNG");
    assert_eq!(image.content_type.as_deref(), Some("image/png"));
    assert_eq!(image.len, 3);
}

#[tokio::test]
async fn test_availability_toggle_sends_only_that_field() {
    let backend = StubBackend::start().await.unwrap();
    let api = signed_in_as(&backend, ADMIN_TOKEN).await;

    api.set_menu_item_availability(MenuItemId::new(3), false)
        .await
        .unwrap();

    let uploads = backend.state.uploads();
    let upload = &uploads[0];
    assert_eq!(upload.item_id, Some(3));
    assert_eq!(upload.fields.len(), 1);
    assert_eq!(upload.fields["availability"], "false");
    assert!(upload.image.is_none());
}

#[tokio::test]
async fn test_customer_is_forbidden_but_stays_signed_in() {
    let backend = StubBackend::start().await.unwrap();
    let api = signed_in_as(&backend, CUSTOMER_TOKEN).await;

    let err = api
        .create_menu_item(burger_form().validate().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|status| status.as_u16()), Some(403));
    assert_eq!(err.user_message(), "Unauthorized");
    assert!(api.session().is_authenticated());
    assert!(backend.state.uploads().is_empty());
}
