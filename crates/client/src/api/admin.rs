//! `/admin/*` endpoints for orders, reservations, users and analytics.
//!
//! The backend answers 403 for non-admins; that surfaces as
//! `ClientError::Api` and leaves the session alone.

use serde_json::json;
use tracing::instrument;

use bistro_core::{
    OrderId, OrderStatus, ReservationId, ReservationStatus, SalesPeriod, UserId, UserRole,
};

use super::ApiClient;
use crate::error::Result;
use crate::models::{
    AdminOrder, AdminReservation, DashboardStats, MessageResponse, SalesReport, UserProfile,
};

impl ApiClient {
    // =========================================================================
    // Orders
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_orders(&self) -> Result<Vec<AdminOrder>> {
        self.get("/admin/orders").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<MessageResponse> {
        self.patch(
            &format!("/admin/orders/{id}/status"),
            &json!({ "status": status }),
        )
        .await
    }

    // =========================================================================
    // Reservations
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn admin_reservations(&self) -> Result<Vec<AdminReservation>> {
        self.get("/admin/reservations").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(reservation_id = %id, status = %status))]
    pub async fn update_reservation_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<MessageResponse> {
        self.patch(
            &format!("/admin/reservations/{id}/status"),
            &json!({ "status": status }),
        )
        .await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<UserProfile>> {
        self.get("/admin/users").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %id, role = %role))]
    pub async fn update_user_role(&self, id: UserId, role: UserRole) -> Result<MessageResponse> {
        self.patch(&format!("/admin/users/{id}/role"), &json!({ "role": role }))
            .await
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    /// Headline numbers for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.get("/admin/analytics/stats").await
    }

    /// Sales bucketed by `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(period = %period))]
    pub async fn sales_report(&self, period: SalesPeriod) -> Result<SalesReport> {
        self.get(&format!("/admin/analytics/sales?period={period}"))
            .await
    }
}
