//! Aggregation core: concurrent grouped counts, derived metrics and
//! payload projection over an access-scoped record set

pub mod engine;
pub mod metrics;
pub mod names;
pub mod projection;

pub use engine::{Aggregates, AggregationEngine, DashboardAggregates};
