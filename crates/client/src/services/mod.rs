//! Flows that combine several API calls with session state.
//!
//! # Services
//!
//! - `auth` - Login, registration, logout and session restore

pub mod auth;
