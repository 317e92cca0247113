//! API module for delivery analytics
//!
//! REST interface over the scoped aggregation core.

pub mod auth;
pub mod handlers;
pub mod service;

pub use service::AnalyticsService;
