//! Category endpoints (`/categories`, `/admin/categories`).

use serde_json::json;
use tracing::instrument;

use bistro_core::CategoryId;

use super::ApiClient;
use crate::error::Result;
use crate::forms::CategoryPayload;
use crate::models::{Category, Created, MessageResponse};

impl ApiClient {
    /// Active categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.get("/categories").await
    }

    /// All categories, inactive ones included. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_categories(&self) -> Result<Vec<Category>> {
        self.get("/admin/categories").await
    }

    /// # Errors
    ///
    /// Returns `ClientError::Api` if the name is already taken.
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<Created<CategoryId>> {
        self.post("/admin/categories", payload).await
    }

    /// # Errors
    ///
    /// Returns `ClientError::Api` if the name is already taken.
    #[instrument(skip(self, payload), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        payload: &CategoryPayload,
    ) -> Result<MessageResponse> {
        self.put(&format!("/admin/categories/{id}"), payload).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn set_category_active(
        &self,
        id: CategoryId,
        is_active: bool,
    ) -> Result<MessageResponse> {
        self.put(
            &format!("/admin/categories/{id}"),
            &json!({ "is_active": is_active }),
        )
        .await
    }

    /// Delete a category. The backend only deactivates it while menu items
    /// still use it; the returned message says which happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<MessageResponse> {
        self.delete(&format!("/admin/categories/{id}")).await
    }
}
