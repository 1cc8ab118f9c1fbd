//! Money and percentage-discount types using decimal arithmetic.
//!
//! All cart and checkout math runs on [`Decimal`] so totals never drift the
//! way binary floats do. Rounding happens only when an amount is formatted
//! for display.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for currency amounts.
const DISPLAY_SCALE: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a USD price.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, DISPLAY_SCALE), currency_code)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            round_for_display(self.amount)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

/// Format a bare amount as dollars (e.g., `$7.50`).
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    Price::usd(amount).display()
}

fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Discounts
// =============================================================================

/// Errors that can occur when constructing a [`DiscountPercent`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscountError {
    /// The percentage is below zero or above one hundred.
    #[error("discount must be between 0 and 100 percent (got {0})")]
    OutOfRange(Decimal),
}

/// A percentage discount in the closed range `0..=100`.
///
/// ```
/// use bistro_core::DiscountPercent;
/// use rust_decimal::Decimal;
///
/// let twenty = DiscountPercent::new(Decimal::from(20)).unwrap();
/// assert_eq!(twenty.apply_to(Decimal::from(50)), Decimal::from(10));
///
/// assert!(DiscountPercent::new(Decimal::from(101)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    /// No discount at all.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Validate a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::OutOfRange`] unless `0 <= percent <= 100`.
    pub fn new(percent: Decimal) -> Result<Self, DiscountError> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DiscountError::OutOfRange(percent));
        }
        Ok(Self(percent.normalize()))
    }

    /// The raw percentage (e.g., `20` for 20% off).
    #[must_use]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Amount taken off `subtotal`: `subtotal * percent / 100`.
    #[must_use]
    pub fn apply_to(&self, subtotal: Decimal) -> Decimal {
        subtotal * self.0 / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<Decimal> for DiscountPercent {
    type Error = DiscountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for DiscountPercent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(format_money(Decimal::from(20)), "$20.00");
        assert_eq!(format_money(Decimal::new(75, 1)), "$7.50");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(format_money(Decimal::new(10_005, 3)), "$10.01");
        assert_eq!(format_money(Decimal::new(10_004, 3)), "$10.00");
    }

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(1999, CurrencyCode::USD);
        assert_eq!(price.amount, Decimal::new(1999, 2));
        assert_eq!(price.to_string(), "$19.99");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(
            Price::new(Decimal::ONE, CurrencyCode::EUR).display(),
            "€1.00"
        );
        assert_eq!(
            Price::new(Decimal::ONE, CurrencyCode::GBP).display(),
            "£1.00"
        );
    }

    #[test]
    fn test_discount_bounds() {
        assert!(DiscountPercent::new(Decimal::ZERO).is_ok());
        assert!(DiscountPercent::new(Decimal::ONE_HUNDRED).is_ok());
        assert_eq!(
            DiscountPercent::new(Decimal::NEGATIVE_ONE),
            Err(DiscountError::OutOfRange(Decimal::NEGATIVE_ONE))
        );
        assert!(DiscountPercent::new(Decimal::new(1001, 1)).is_err());
    }

    #[test]
    fn test_discount_apply() {
        let pct = DiscountPercent::new(Decimal::from(20)).unwrap();
        assert_eq!(pct.apply_to(Decimal::from(50)), Decimal::from(10));

        let full = DiscountPercent::new(Decimal::ONE_HUNDRED).unwrap();
        assert_eq!(full.apply_to(Decimal::new(1234, 2)), Decimal::new(1234, 2));

        assert_eq!(DiscountPercent::ZERO.apply_to(Decimal::from(9)), Decimal::ZERO);
    }

    #[test]
    fn test_discount_deserializes_from_json_number() {
        let pct: DiscountPercent = serde_json::from_str("20.0").unwrap();
        assert_eq!(pct.percent(), Decimal::from(20));

        let err = serde_json::from_str::<DiscountPercent>("150");
        assert!(err.is_err());
    }

    #[test]
    fn test_discount_display() {
        let pct = DiscountPercent::new(Decimal::from(25)).unwrap();
        assert_eq!(pct.to_string(), "25%");
    }
}
