//! `/reservations` endpoint.

use tracing::instrument;

use super::ApiClient;
use crate::error::Result;
use crate::models::MessageResponse;
use crate::models::reservation::ReservationPayload;

impl ApiClient {
    /// Book a table.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` without a valid session.
    #[instrument(skip(self, payload), fields(party_size = payload.party_size))]
    pub async fn create_reservation(&self, payload: &ReservationPayload) -> Result<MessageResponse> {
        self.post("/reservations", payload).await
    }
}
