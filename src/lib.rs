//! Role-scoped analytics over a corpus of pizza-delivery orders
//!
//! The aggregation core fans out grouped counts against the record store,
//! joins them, derives the summary metrics and projects the payloads served
//! by the REST API.

pub mod access;
pub mod analytics;
pub mod api;
pub mod db;
pub mod models;
pub mod store;
