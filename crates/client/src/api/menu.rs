//! `/menu` endpoints.

use reqwest::Method;
use tracing::instrument;

use bistro_core::MenuItemId;

use super::ApiClient;
use crate::error::Result;
use crate::forms::{MenuItemFields, MenuItemUpdate};
use crate::models::{Created, MenuItem, MessageResponse};

impl ApiClient {
    /// Available menu items.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn menu(&self) -> Result<Vec<MenuItem>> {
        self.get("/menu").await
    }

    /// Every menu item, unavailable ones included. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn menu_all(&self) -> Result<Vec<MenuItem>> {
        self.get("/menu?all=true").await
    }

    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 if there is no such item.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn menu_item(&self, id: MenuItemId) -> Result<MenuItem> {
        self.get(&format!("/menu/{id}")).await
    }

    /// Create a menu item, uploading its image if one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, item), fields(name = ?item.name))]
    pub async fn create_menu_item(&self, item: MenuItemFields) -> Result<Created<MenuItemId>> {
        self.send_multipart(Method::POST, "/menu", item).await
    }

    /// Update the fields that are set.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, changes), fields(item_id = %id))]
    pub async fn update_menu_item(
        &self,
        id: MenuItemId,
        changes: MenuItemFields,
    ) -> Result<MessageResponse> {
        self.send_multipart(Method::PUT, &format!("/menu/{id}"), changes)
            .await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn set_menu_item_availability(
        &self,
        id: MenuItemId,
        available: bool,
    ) -> Result<MessageResponse> {
        let changes = MenuItemUpdate::availability(available).validate()?;
        self.update_menu_item(id, changes).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn delete_menu_item(&self, id: MenuItemId) -> Result<MessageResponse> {
        self.delete(&format!("/menu/{id}")).await
    }
}
