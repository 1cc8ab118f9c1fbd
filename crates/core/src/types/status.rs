//! Status and choice enums shared with the backend.
//!
//! Every enum here uses the backend's `snake_case` string on the wire and
//! round-trips through `Display`/`FromStr` so CLI arguments parse the same
//! way JSON does.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when a string does not name a known variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseStatusError {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Implements `Display`, `FromStr` and `as_str` from one wire-name table.
macro_rules! wire_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// All variants, in workflow order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The backend's wire name.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseStatusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($name => Ok(Self::$variant),)+
                    other => Err(ParseStatusError {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

/// Like `wire_names!`, for enums whose last variant is `Unknown(String)`.
///
/// The backend stores whatever status an admin sends, so deserializing
/// keeps unrecognized text in `Unknown` instead of failing the whole
/// listing. `FromStr` stays strict: only known names parse.
macro_rules! open_wire_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// All known variants, in workflow order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The backend's wire name, or the raw text for `Unknown`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $name,)+
                    Self::Unknown(raw) => raw.as_str(),
                }
            }

            /// Whether the backend sent a status this client does not know.
            #[must_use]
            pub const fn is_unknown(&self) -> bool {
                matches!(self, Self::Unknown(_))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseStatusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($name => Ok(Self::$variant),)+
                    other => Err(ParseStatusError {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(raw.parse().unwrap_or_else(|_| Self::Unknown(raw)))
            }
        }
    };
}

// =============================================================================
// Orders
// =============================================================================

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentType {
    #[default]
    Delivery,
    Pickup,
}

wire_names!(FulfillmentType, "fulfillment type", {
    Delivery => "delivery",
    Pickup => "pickup",
});

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

wire_names!(PaymentMethod, "payment method", {
    Cash => "cash",
    Card => "card",
});

/// Order lifecycle status, as set by the kitchen through the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Denied,
    Preparing,
    Ready,
    OnTheWay,
    Delivered,
    PickedUp,
    /// A status outside the workflow, kept as sent.
    Unknown(String),
}

open_wire_names!(OrderStatus, "order status", {
    Pending => "pending",
    Accepted => "accepted",
    Denied => "denied",
    Preparing => "preparing",
    Ready => "ready",
    OnTheWay => "on_the_way",
    Delivered => "delivered",
    PickedUp => "picked_up",
});

impl OrderStatus {
    /// Human-readable label (`on_the_way` becomes "on the way").
    #[must_use]
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Whether the order has reached the customer.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Delivered | Self::PickedUp)
    }

    /// Statuses an admin may move an order to from this one.
    ///
    /// Delivery orders pass through `on_the_way`; pickup orders go straight
    /// from `ready` to `picked_up`.
    #[must_use]
    pub fn next_actions(&self, fulfillment: FulfillmentType) -> Vec<Self> {
        let handed_over = match fulfillment {
            FulfillmentType::Delivery => Self::Delivered,
            FulfillmentType::Pickup => Self::PickedUp,
        };

        match (self, fulfillment) {
            (Self::Pending, _) => vec![Self::Accepted, Self::Denied],
            (Self::Accepted, _) => vec![Self::Preparing],
            (Self::Preparing, _) => vec![Self::Ready],
            (Self::Ready, FulfillmentType::Delivery) => vec![Self::OnTheWay, handed_over],
            (Self::Ready | Self::OnTheWay, _) => vec![handed_over],
            (Self::Denied | Self::Delivered | Self::PickedUp | Self::Unknown(_), _) => Vec::new(),
        }
    }
}

// =============================================================================
// Reservations
// =============================================================================

/// Table reservation status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ReservationStatus {
    #[default]
    Confirmed,
    Cancelled,
    Completed,
    /// A status outside the workflow, kept as sent.
    Unknown(String),
}

open_wire_names!(ReservationStatus, "reservation status", {
    Confirmed => "confirmed",
    Cancelled => "cancelled",
    Completed => "completed",
});

impl ReservationStatus {
    /// Statuses an admin may move a reservation to from this one.
    #[must_use]
    pub fn next_actions(&self) -> Vec<Self> {
        match self {
            Self::Confirmed => vec![Self::Cancelled, Self::Completed],
            Self::Cancelled | Self::Completed | Self::Unknown(_) => Vec::new(),
        }
    }
}

// =============================================================================
// Users & analytics
// =============================================================================

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
}

wire_names!(UserRole, "user role", {
    Customer => "customer",
    Admin => "admin",
});

/// Bucket size for the sales chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SalesPeriod {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

wire_names!(SalesPeriod, "sales period", {
    Day => "day",
    Week => "week",
    Month => "month",
    Year => "year",
});

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_names_match_serde() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(&status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unrecognized_status_is_kept() {
        let status: OrderStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(status, OrderStatus::Unknown("cancelled".to_string()));
        assert!(status.is_unknown());
        assert_eq!(status.label(), "cancelled");
        assert_eq!(status.to_string(), "cancelled");
        assert!(status.next_actions(FulfillmentType::Delivery).is_empty());
        assert!(!status.is_complete());
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""cancelled""#);

        let reservation: ReservationStatus = serde_json::from_str(r#""no_show""#).unwrap();
        assert_eq!(reservation.as_str(), "no_show");
        assert!(reservation.next_actions().is_empty());
    }

    #[test]
    fn test_unknown_status_does_not_parse_from_text() {
        let err = "cancelled".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid order status: cancelled");
    }

    #[test]
    fn test_order_status_label() {
        assert_eq!(OrderStatus::OnTheWay.label(), "on the way");
        assert_eq!(OrderStatus::Pending.label(), "pending");
    }

    #[test]
    fn test_pending_can_be_accepted_or_denied() {
        assert_eq!(
            OrderStatus::Pending.next_actions(FulfillmentType::Pickup),
            vec![OrderStatus::Accepted, OrderStatus::Denied]
        );
    }

    #[test]
    fn test_ready_delivery_goes_on_the_way() {
        assert_eq!(
            OrderStatus::Ready.next_actions(FulfillmentType::Delivery),
            vec![OrderStatus::OnTheWay, OrderStatus::Delivered]
        );
        assert_eq!(
            OrderStatus::OnTheWay.next_actions(FulfillmentType::Delivery),
            vec![OrderStatus::Delivered]
        );
    }

    #[test]
    fn test_ready_pickup_is_picked_up() {
        assert_eq!(
            OrderStatus::Ready.next_actions(FulfillmentType::Pickup),
            vec![OrderStatus::PickedUp]
        );
    }

    #[test]
    fn test_terminal_statuses_have_no_actions() {
        for status in [
            OrderStatus::Denied,
            OrderStatus::Delivered,
            OrderStatus::PickedUp,
        ] {
            assert!(status.next_actions(FulfillmentType::Delivery).is_empty());
        }
        assert!(OrderStatus::PickedUp.is_complete());
        assert!(!OrderStatus::Ready.is_complete());
    }

    #[test]
    fn test_reservation_actions() {
        assert_eq!(
            ReservationStatus::Confirmed.next_actions(),
            vec![ReservationStatus::Cancelled, ReservationStatus::Completed]
        );
        assert!(ReservationStatus::Cancelled.next_actions().is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "chef".parse::<UserRole>().unwrap_err();
        assert_eq!(err.to_string(), "invalid user role: chef");
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("week".parse::<SalesPeriod>().unwrap(), SalesPeriod::Week);
    }
}
