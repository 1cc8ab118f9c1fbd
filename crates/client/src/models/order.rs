//! Customer order history and placement responses.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bistro_core::{ComboId, MenuItemId, OrderId, OrderStatus};

/// Body of a successful `POST /orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPlaced {
    #[serde(default)]
    pub message: Option<String>,
    pub order_id: OrderId,
}

/// One of the signed-in customer's orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub items: Vec<OrderHistoryLine>,
}

impl OrderSummary {
    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

/// A line of a past order. Exactly one of `id` and `combo_id` is usually
/// set; both are null when the menu item has since been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHistoryLine {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub id: Option<MenuItemId>,
    #[serde(default)]
    pub combo_id: Option<ComboId>,
}
