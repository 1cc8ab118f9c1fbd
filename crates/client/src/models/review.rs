//! Reviews for menu items and combos.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use bistro_core::ReviewId;

/// A review in the site-wide feed (`GET /reviews`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user: String,
    /// Menu item or combo name, `"Unknown"` if it was deleted.
    pub item_name: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub date: NaiveDateTime,
}

/// A review attached to one menu item (`GET /menu/:id/reviews`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReview {
    pub user: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub date: NaiveDateTime,
}

/// Body of `POST /menu/:id/reviews` and `POST /combos/:id/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewPayload {
    pub rating: u8,
    pub comment: Option<String>,
}

/// Mean rating rounded to one decimal place, `None` with no reviews.
#[must_use]
pub fn average_rating(reviews: &[ItemReview]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = f64::from(sum) / reviews.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_review_feed_parses() {
        let body = r#"[{"id": 1, "user": "kim", "item_name": "Burger", "rating": 5,
                        "comment": "Great", "date": "2024-06-01T12:00:00"}]"#;
        let reviews: Vec<Review> = serde_json::from_str(body).unwrap();
        assert_eq!(reviews[0].rating, 5);
        assert_eq!(reviews[0].item_name, "Burger");
    }

    #[test]
    fn test_average_rating() {
        let body = r#"[
            {"user": "a", "rating": 5, "comment": null, "date": "2024-06-01T12:00:00"},
            {"user": "b", "rating": 4, "comment": null, "date": "2024-06-01T12:00:00"},
            {"user": "c", "rating": 4, "comment": null, "date": "2024-06-01T12:00:00"}
        ]"#;
        let reviews: Vec<ItemReview> = serde_json::from_str(body).unwrap();
        assert_eq!(average_rating(&reviews), Some(4.3));
        assert_eq!(average_rating(&[]), None);
    }
}
