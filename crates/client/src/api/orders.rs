//! `/orders` endpoints for customers.

use tracing::instrument;

use super::ApiClient;
use crate::checkout::{OrderPayload, OrderSubmitter};
use crate::error::Result;
use crate::models::{OrderPlaced, OrderSummary};

impl ApiClient {
    /// # Errors
    ///
    /// Returns `ClientError::Api` if the backend refuses the order.
    #[instrument(skip(self, payload), fields(lines = payload.items.len(), total = %payload.total))]
    pub async fn place_order(&self, payload: &OrderPayload) -> Result<OrderPlaced> {
        self.post("/orders", payload).await
    }

    /// The signed-in customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` without a valid session.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<OrderSummary>> {
        self.get("/orders").await
    }
}

impl OrderSubmitter for ApiClient {
    async fn submit_order(&self, payload: &OrderPayload) -> Result<OrderPlaced> {
        self.place_order(payload).await
    }
}
