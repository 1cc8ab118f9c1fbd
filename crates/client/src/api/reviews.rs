//! Review endpoints for menu items and combos.

use tracing::instrument;

use bistro_core::MenuItemId;

use super::ApiClient;
use crate::error::Result;
use crate::forms::ReviewTarget;
use crate::models::review::ReviewPayload;
use crate::models::{ItemReview, MessageResponse, Review};

impl ApiClient {
    /// Reviews of one menu item, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn item_reviews(&self, id: MenuItemId) -> Result<Vec<ItemReview>> {
        self.get(&format!("/menu/{id}/reviews")).await
    }

    /// Every review on the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn reviews(&self) -> Result<Vec<Review>> {
        self.get("/reviews").await
    }

    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` without a valid session.
    #[instrument(skip(self, payload), fields(target = %target, rating = payload.rating))]
    pub async fn create_review(
        &self,
        target: ReviewTarget,
        payload: &ReviewPayload,
    ) -> Result<MessageResponse> {
        self.post(&review_path(target), payload).await
    }
}

fn review_path(target: ReviewTarget) -> String {
    match target {
        ReviewTarget::Item(id) => format!("/menu/{id}/reviews"),
        ReviewTarget::Combo(id) => format!("/combos/{id}/reviews"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::ComboId;

    #[test]
    fn test_review_path() {
        assert_eq!(
            review_path(ReviewTarget::Item(MenuItemId::new(3))),
            "/menu/3/reviews"
        );
        assert_eq!(
            review_path(ReviewTarget::Combo(ComboId::new(8))),
            "/combos/8/reviews"
        );
    }
}
