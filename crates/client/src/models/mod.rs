//! Records mirrored from the backend.
//!
//! The server owns every one of these. The client deserializes only the
//! fields it renders and never enforces business rules on them.
//!
//! Timestamps arrive without a zone offset, so they are kept as
//! [`chrono::NaiveDateTime`].

pub mod admin;
pub mod combo;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod review;
pub mod user;

pub use admin::{
    AdminOrder, AdminOrderLine, AdminReservation, DashboardStats, PeriodStats, SalesPoint,
    SalesReport, SalesSummary, TotalStats,
};
pub use combo::{Combo, ComboItem, combo_categories};
pub use menu::{Category, MenuItem};
pub use order::{OrderHistoryLine, OrderPlaced, OrderSummary};
pub use reservation::ReservationPayload;
pub use review::{ItemReview, Review, ReviewPayload, average_rating};
pub use user::{LoginResponse, UserProfile};

use serde::Deserialize;

/// `{"message": "..."}` body returned by most mutations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// `{"message": "...", "id": 7}` body returned by create endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Created<Id> {
    pub id: Id,
    #[serde(default)]
    pub message: Option<String>,
}
