//! `/combos` endpoint.

use tracing::instrument;

use super::ApiClient;
use crate::error::Result;
use crate::models::Combo;

impl ApiClient {
    /// Active combo deals with their constituent items.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn combos(&self) -> Result<Vec<Combo>> {
        self.get("/combos").await
    }
}
