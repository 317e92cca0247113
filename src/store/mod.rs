//! Record-store capability behind the aggregation engine
//!
//! One method per grouping keeps the read contract narrow enough that the
//! SurrealDB store and the in-memory store stay interchangeable. Every
//! method filters by the caller's [`AccessScope`]; none of them mutates.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::access::AccessScope;
use crate::models::Restaurant;

pub mod memory;
pub mod surreal;

pub use memory::MemoryStore;
pub use surreal::SurrealStore;

/// Count for one value of a categorical dimension
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

/// Count for one calendar month, 1-12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MonthCount {
    pub month: u8,
    pub count: i64,
}

/// Count for one hour of day, 0-23
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HourCount {
    pub hour: u8,
    pub count: i64,
}

/// On-time/delayed partition of the scoped set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelayCounts {
    pub on_time: i64,
    pub delayed: i64,
}

/// Weekday/weekend partition of the scoped set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayKindCounts {
    pub weekday: i64,
    pub weekend: i64,
}

/// Arithmetic means of the numeric measures; zeros for an empty set
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct MeasureMeans {
    pub avg_duration_min: f64,
    pub avg_distance_km: f64,
    pub avg_delay_min: f64,
}

/// Record-store failure surface
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("record store query failed: {0}")]
    Query(String),
}

/// Grouped counting over the delivery-order corpus.
///
/// The operations of one request are issued concurrently, so
/// implementations must be safe to call from multiple tasks at once.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Total orders under the scope
    async fn count_orders(&self, scope: &AccessScope) -> Result<i64, StoreError>;

    /// Orders per restaurant id, most common first
    async fn count_by_restaurant(&self, scope: &AccessScope)
        -> Result<Vec<LabelCount>, StoreError>;

    /// Orders per pizza size, most common first
    async fn count_by_size(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError>;

    /// Orders per pizza type, most common first
    async fn count_by_type(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError>;

    /// Orders per calendar month, January first
    async fn count_by_month(&self, scope: &AccessScope) -> Result<Vec<MonthCount>, StoreError>;

    /// Top ten drop-off areas by order count
    async fn count_by_location(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError>;

    /// On-time/delayed partition
    async fn count_by_delay(&self, scope: &AccessScope) -> Result<DelayCounts, StoreError>;

    /// Orders per hour of day, midnight first
    async fn count_by_hour(&self, scope: &AccessScope) -> Result<Vec<HourCount>, StoreError>;

    /// Orders per payment method, most common first
    async fn count_by_payment(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError>;

    /// Weekday/weekend partition
    async fn count_by_day_kind(&self, scope: &AccessScope) -> Result<DayKindCounts, StoreError>;

    /// Orders per traffic condition, most common first
    async fn count_by_traffic(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError>;

    /// Means of duration, distance and delay over the scoped set
    async fn measure_means(&self, scope: &AccessScope) -> Result<MeasureMeans, StoreError>;

    /// Batched reference lookup for grouped restaurant ids
    async fn restaurants_by_ids(&self, ids: &[String]) -> Result<Vec<Restaurant>, StoreError>;

    /// Full restaurant reference list, sorted by name
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError>;
}
