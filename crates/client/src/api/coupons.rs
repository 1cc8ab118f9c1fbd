//! `/coupons/verify` endpoint.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use bistro_core::DiscountPercent;

use super::ApiClient;
use crate::checkout::{Coupon, CouponVerifier, INVALID_COUPON_MESSAGE};
use crate::error::{ClientError, Result};

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    valid: bool,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    discount: Option<Decimal>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    /// Ask the backend whether `code` is a live coupon.
    ///
    /// The code is sent as given; callers normalize it.
    ///
    /// # Errors
    ///
    /// - `ClientError::Api` (400) for unknown or expired codes
    /// - `ClientError::Rejected` if the backend answers `valid: false`
    /// - `ClientError::InvalidResponse` if the discount is missing or outside 0..=100
    #[instrument(skip(self))]
    pub async fn verify_coupon(&self, code: &str) -> Result<Coupon> {
        let response: VerifyResponse = self.post("/coupons/verify", &json!({ "code": code })).await?;
        coupon_from_response(code, response)
    }
}

fn coupon_from_response(code: &str, response: VerifyResponse) -> Result<Coupon> {
    if !response.valid {
        return Err(ClientError::Rejected(
            response
                .message
                .unwrap_or_else(|| INVALID_COUPON_MESSAGE.to_string()),
        ));
    }
    let percent = response
        .discount
        .ok_or_else(|| ClientError::InvalidResponse("coupon has no discount".to_string()))?;
    let discount =
        DiscountPercent::new(percent).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
    Ok(Coupon {
        code: code.to_owned(),
        discount,
    })
}

impl CouponVerifier for ApiClient {
    async fn verify_coupon(&self, code: &str) -> Result<Coupon> {
        Self::verify_coupon(self, code).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(body: &str) -> VerifyResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_valid_coupon() {
        let coupon =
            coupon_from_response("SAVE20", parse(r#"{"valid": true, "discount": 20.0}"#)).unwrap();
        assert_eq!(coupon.code, "SAVE20");
        assert_eq!(coupon.discount.percent(), Decimal::from(20));
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        let err = coupon_from_response("OLD", parse(r#"{"valid": false}"#)).unwrap_err();
        assert_eq!(err.user_message(), INVALID_COUPON_MESSAGE);
    }

    #[test]
    fn test_out_of_range_discount() {
        let err = coupon_from_response("HUGE", parse(r#"{"valid": true, "discount": 150}"#))
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));

        let err = coupon_from_response("NONE", parse(r#"{"valid": true}"#)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
