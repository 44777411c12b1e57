//! Seller-registration gateway library.
//!
//! A single-endpoint HTTP service: it accepts a registration form
//! submission, sanitizes and validates it, rate-limits the submitter per
//! session, and forwards accepted submissions to an automation webhook.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod registration;
pub mod security;
pub mod webhook;

pub use config::GatewayConfig;
pub use http::{build_router, AppState, GatewayServer};
