//! Combo deals as listed by `/combos`.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bistro_core::{ComboId, MenuItemId};

/// Category shown for combos the server did not categorize.
pub const MIXED_CATEGORY: &str = "Mixed";

/// Pseudo-category that matches every combo in the deals filter.
pub const ALL_CATEGORIES: &str = "All";

/// A bundle of menu items sold at a fixed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub id: ComboId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price of the bundle before any customization surcharge.
    #[serde(with = "rust_decimal::serde::float")]
    pub combo_price: Decimal,
    /// Sum of the constituent items' own prices.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub original_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub savings: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub items: Vec<ComboItem>,
}

impl Combo {
    /// Category for filtering, `"Mixed"` when the server sent none.
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(MIXED_CATEGORY)
    }

    /// Savings over buying the items separately.
    ///
    /// Uses the server's figure when present, otherwise derives it from
    /// the listed item prices.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.savings.unwrap_or_else(|| {
            let original = self.original_price.unwrap_or_else(|| {
                self.items
                    .iter()
                    .map(|item| item.price * Decimal::from(item.quantity))
                    .sum()
            });
            original - self.combo_price
        })
    }
}

/// One constituent of a combo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Filter options for the deals page: `"All"` followed by every distinct
/// combo category in sorted order.
#[must_use]
pub fn combo_categories(combos: &[Combo]) -> Vec<String> {
    let unique: BTreeSet<&str> = combos.iter().map(Combo::category_name).collect();
    std::iter::once(ALL_CATEGORIES)
        .chain(unique)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn burger_combo() -> Combo {
        serde_json::from_str(
            r#"{
                "id": 1, "name": "Burger Meal", "description": "Burger, fries and a drink",
                "combo_price": 12.0, "original_price": 15.5, "savings": 3.5,
                "image_url": null, "category": "Burgers",
                "items": [
                    {"id": 10, "name": "Burger", "price": 9.0, "quantity": 1, "image_url": null, "category": "Mains"},
                    {"id": 11, "name": "Fries", "price": 3.5, "quantity": 1, "image_url": null, "category": "Sides"},
                    {"id": 12, "name": "Soda", "price": 1.5, "quantity": 2, "image_url": null, "category": "Drinks"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_combo_listing_parses() {
        let combo = burger_combo();
        assert_eq!(combo.combo_price, Decimal::from(12));
        assert_eq!(combo.items.len(), 3);
        assert_eq!(combo.savings(), Decimal::new(35, 1));
    }

    #[test]
    fn test_savings_derived_from_items() {
        let mut combo = burger_combo();
        combo.savings = None;
        combo.original_price = None;
        // 9 + 3.5 + 2 * 1.5 = 15.5
        assert_eq!(combo.savings(), Decimal::new(35, 1));
    }

    #[test]
    fn test_combo_categories() {
        let burgers = burger_combo();
        let mut uncategorized = burger_combo();
        uncategorized.category = None;
        let mut pizza = burger_combo();
        pizza.category = Some("Pizza".to_string());

        let categories = combo_categories(&[pizza, burgers.clone(), uncategorized, burgers]);
        assert_eq!(categories, vec!["All", "Burgers", "Mixed", "Pizza"]);
        assert_eq!(combo_categories(&[]), vec!["All"]);
    }
}
