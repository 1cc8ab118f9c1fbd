//! Bistro Core - Shared domain types.
//!
//! This crate provides the types used across all Bistro components:
//! - `client` - REST client, cart, checkout and session state
//! - `cli` - Command-line front end for customers and admins
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! HTTP clients. Money arithmetic lives here so every crate prices things
//! the same way.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, prices, discounts, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
