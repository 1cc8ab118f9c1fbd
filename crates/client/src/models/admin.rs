//! Admin console records: all orders, reservations and dashboard analytics.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bistro_core::{
    FulfillmentType, OrderId, OrderStatus, PaymentMethod, ReservationId, ReservationStatus,
    SalesPeriod,
};

/// An order as listed in the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminOrder {
    pub id: OrderId,
    /// Username of whoever placed the order.
    pub customer: String,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub date: NaiveDateTime,
    #[serde(rename = "type")]
    pub fulfillment: FulfillmentType,
    pub payment: PaymentMethod,
    #[serde(default)]
    pub items: Vec<AdminOrderLine>,
}

impl AdminOrder {
    /// Statuses this order can move to next.
    #[must_use]
    pub fn next_actions(&self) -> Vec<OrderStatus> {
        self.status.next_actions(self.fulfillment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOrderLine {
    pub name: String,
    pub quantity: u32,
}

/// A reservation as listed in the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminReservation {
    pub id: ReservationId,
    pub customer: String,
    pub party_size: u32,
    pub time: NaiveDateTime,
    pub status: ReservationStatus,
    #[serde(default)]
    pub requests: Option<String>,
}

// =============================================================================
// Analytics
// =============================================================================

/// `GET /admin/analytics/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub today: PeriodStats,
    pub week: PeriodStats,
    pub month: PeriodStats,
    pub total: TotalStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub sales: Decimal,
    pub orders: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub sales: Decimal,
    pub orders: u64,
    pub users: u64,
    pub menu_items: u64,
    pub pending_orders: u64,
}

/// `GET /admin/analytics/sales?period=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub period: SalesPeriod,
    pub data: Vec<SalesPoint>,
    pub summary: SalesSummary,
}

impl SalesReport {
    /// The bucket with the highest sales, if any.
    #[must_use]
    pub fn best(&self) -> Option<&SalesPoint> {
        self.data.iter().max_by_key(|point| point.sales)
    }
}

/// One bucket of the sales chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesPoint {
    /// First day of the bucket.
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub sales: Decimal,
    pub orders: u64,
    /// Axis label (`"Mon"`, `"Jun 2024"`, `"2024"`).
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    pub total_orders: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_sales: Decimal,
    pub average_orders: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_order_uses_type_field() {
        let body = r#"{
            "id": 3, "customer": "kim", "status": "ready", "total": 21.5,
            "date": "2024-06-01T18:00:00", "type": "pickup", "payment": "card",
            "items": [{"name": "Burger", "quantity": 1}]
        }"#;
        let order: AdminOrder = serde_json::from_str(body).unwrap();
        assert_eq!(order.fulfillment, FulfillmentType::Pickup);
        assert_eq!(order.next_actions(), vec![OrderStatus::PickedUp]);
    }

    #[test]
    fn test_unrecognized_statuses_have_no_actions() {
        let body = r#"{
            "id": 4, "customer": "sam", "status": "refunded", "total": 9.0,
            "date": "2024-06-01T18:00:00", "type": "delivery", "payment": "cash"
        }"#;
        let order: AdminOrder = serde_json::from_str(body).unwrap();
        assert_eq!(order.status.as_str(), "refunded");
        assert!(order.next_actions().is_empty());

        let body = r#"[
            {"id": 1, "customer": "kim", "party_size": 2, "time": "2024-06-01T19:30:00", "status": "confirmed"},
            {"id": 2, "customer": "lee", "party_size": 4, "time": "2024-06-01T20:00:00", "status": "no_show"}
        ]"#;
        let reservations: Vec<AdminReservation> = serde_json::from_str(body).unwrap();
        assert_eq!(reservations[0].status, ReservationStatus::Confirmed);
        assert!(reservations[1].status.is_unknown());
        assert!(reservations[1].status.next_actions().is_empty());
    }

    #[test]
    fn test_sales_report_parses() {
        let body = r#"{
            "period": "week",
            "data": [
                {"date": "2024-05-27", "sales": 120.5, "orders": 6, "label": "Mon"},
                {"date": "2024-05-28", "sales": 310.0, "orders": 11, "label": "Tue"}
            ],
            "summary": {"total_sales": 430.5, "total_orders": 17,
                        "average_sales": 215.25, "average_orders": 8.5}
        }"#;
        let report: SalesReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.period, SalesPeriod::Week);
        assert_eq!(report.best().unwrap().label, "Tue");
        assert_eq!(report.summary.total_sales, Decimal::new(4305, 1));
    }

    #[test]
    fn test_dashboard_stats_parse() {
        let body = r#"{
            "today": {"sales": 0.0, "orders": 0},
            "week": {"sales": 99.99, "orders": 3},
            "month": {"sales": 150.0, "orders": 5},
            "total": {"sales": 1000.0, "orders": 40, "users": 12, "menu_items": 30, "pending_orders": 2}
        }"#;
        let stats: DashboardStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.week.sales, Decimal::new(9999, 2));
        assert_eq!(stats.total.pending_orders, 2);
    }
}
