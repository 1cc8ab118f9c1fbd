//! Menu items and categories.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bistro_core::{CategoryId, MenuItemId, Price};

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_deal: bool,
    /// Unavailable items only show up in the admin listing.
    #[serde(default = "default_true")]
    pub availability: bool,
}

impl MenuItem {
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }
}

/// A menu category.
///
/// `created_at` is only present in the admin listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_from_listing() {
        let body = r#"{
            "id": 4, "name": "Burger", "description": null, "price": 8.5,
            "category": "Mains", "image_url": "/api/uploads/b.png",
            "is_deal": false, "availability": true
        }"#;
        let item: MenuItem = serde_json::from_str(body).unwrap();
        assert_eq!(item.price, Decimal::new(85, 1));
        assert_eq!(item.unit_price().display(), "$8.50");
        assert!(item.availability);
    }

    #[test]
    fn test_menu_item_integer_price() {
        let body = r#"{"id": 1, "name": "Soup", "price": 6, "category": "Starters"}"#;
        let item: MenuItem = serde_json::from_str(body).unwrap();
        assert_eq!(item.price, Decimal::from(6));
        assert!(item.availability);
        assert!(!item.is_deal);
    }

    #[test]
    fn test_admin_category_has_timestamp() {
        let body = r#"{
            "id": 2, "name": "Drinks", "description": "", "is_active": false,
            "created_at": "2024-05-01T09:30:00.123456"
        }"#;
        let category: Category = serde_json::from_str(body).unwrap();
        assert!(!category.is_active);
        assert!(category.created_at.is_some());
    }
}
