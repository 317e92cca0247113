use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Orders arriving more than this many minutes past the quoted time count as delayed
pub const DELAY_TOLERANCE_MIN: f64 = 5.0;

/// Pizza size vocabulary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PizzaSize {
    Small,
    Medium,
    Large,
    #[serde(rename = "XL")]
    ExtraLarge,
}

impl PizzaSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PizzaSize::Small => "Small",
            PizzaSize::Medium => "Medium",
            PizzaSize::Large => "Large",
            PizzaSize::ExtraLarge => "XL",
        }
    }
}

/// Weekday/weekend partition of the order timestamp
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DayKind {
    Weekday,
    Weekend,
}

impl DayKind {
    pub fn from_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sat | Weekday::Sun => DayKind::Weekend,
            _ => DayKind::Weekday,
        }
    }
}

/// Traffic condition reported for the delivery run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
}

impl TrafficLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficLevel::Low => "Low",
            TrafficLevel::Medium => "Medium",
            TrafficLevel::High => "High",
        }
    }
}

/// Delivery-order record for SurrealDB
///
/// `month`, `hour`, `day_kind` and `delayed` are denormalized from
/// `ordered_at` and `delay_min` so the grouped queries never re-derive them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub order_id: String,
    /// Restaurant id the order was fulfilled by
    pub restaurant: String,
    pub size: PizzaSize,
    pub pizza_type: String,
    pub payment: String,
    /// Drop-off area label
    pub location: String,
    pub ordered_at: NaiveDateTime,
    /// Calendar month 1-12
    pub month: u8,
    /// Hour of day 0-23
    pub hour: u8,
    pub day_kind: DayKind,
    pub traffic: TrafficLevel,
    pub duration_min: f64,
    pub distance_km: f64,
    pub delay_min: f64,
    pub delayed: bool,
}

impl DeliveryRecord {
    /// Recompute the denormalized fields from `ordered_at` and `delay_min`
    pub fn with_derived_fields(mut self) -> Self {
        self.month = self.ordered_at.month() as u8;
        self.hour = self.ordered_at.hour() as u8;
        self.day_kind = DayKind::from_weekday(self.ordered_at.weekday());
        self.delayed = self.delay_min > DELAY_TOLERANCE_MIN;
        self
    }
}

/// Restaurant reference entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub restaurant_id: String,
    pub name: String,
    pub code: String,
}
