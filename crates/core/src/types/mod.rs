//! Core types for Bistro.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, DiscountError, DiscountPercent, Price, format_money};
pub use status::*;
