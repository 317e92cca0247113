//! Payload assembly for the two read endpoints
//!
//! Field naming and label mapping only; the numeric rules live in
//! [`super::metrics`].

use std::collections::HashMap;

use serde::Serialize;

use super::engine::{Aggregates, DashboardAggregates};
use super::metrics::{self, DerivedMetrics};
use super::names::UNKNOWN_RESTAURANT;
use crate::store::LabelCount;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_name(month: u8) -> String {
    match month {
        1..=12 => MONTH_NAMES[month as usize - 1].to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct RestaurantCount {
    pub restaurant: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct SizeCount {
    pub size: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub pizza_type: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct LocationCount {
    pub location: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct HourlyCount {
    pub hour: u8,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct PaymentCount {
    pub method: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct DelaySummary {
    pub on_time: i64,
    pub delayed: i64,
    /// On-time percentage, one decimal place
    pub rate: f64,
}

/// Detail-analytics payload
#[derive(Debug, Serialize)]
pub struct DetailAnalytics {
    pub total_orders: i64,
    pub orders_by_restaurant: Vec<RestaurantCount>,
    pub orders_by_size: Vec<SizeCount>,
    pub orders_by_type: Vec<TypeCount>,
    pub orders_by_month: Vec<MonthlyCount>,
    pub orders_by_location: Vec<LocationCount>,
    pub delay_stats: DelaySummary,
    pub peak_hour_stats: Vec<HourlyCount>,
    pub payment_stats: Vec<PaymentCount>,
}

/// One chart point
#[derive(Debug, Serialize)]
pub struct LabelValue {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Serialize)]
pub struct WeekendVsWeekday {
    pub weekend: i64,
    pub weekday: i64,
}

#[derive(Debug, Serialize)]
pub struct PeakOffPeak {
    pub peak: i64,
    pub off_peak: i64,
}

/// Dashboard-summary payload: chart-ready lists plus the derived scalars
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_orders: i64,
    pub avg_delivery_time: i64,
    pub delayed_orders: i64,
    pub on_time_rate: f64,
    /// Busiest hour of day; null when the scope matches no orders
    pub peak_hour: Option<u8>,
    pub peak_hours: Vec<LabelValue>,
    pub pizza_sizes: Vec<LabelValue>,
    pub pizza_types: Vec<LabelValue>,
    pub delivery_performance: Vec<LabelValue>,
    pub traffic_impact: Vec<LabelValue>,
    pub payment_methods: Vec<LabelValue>,
    pub weekend_vs_weekday: WeekendVsWeekday,
    pub peak_off_peak: PeakOffPeak,
    pub avg_distance_km: i64,
    pub avg_delay_min: i64,
}

fn label_value(entry: LabelCount) -> LabelValue {
    LabelValue {
        label: entry.label,
        value: entry.count,
    }
}

/// Assemble the detail payload from one aggregate snapshot and the
/// resolved restaurant names
pub fn detail(aggregates: Aggregates, names: &HashMap<String, String>) -> DetailAnalytics {
    let rate = metrics::on_time_rate(aggregates.by_delay.on_time, aggregates.total);

    DetailAnalytics {
        total_orders: aggregates.total,
        orders_by_restaurant: aggregates
            .by_restaurant
            .into_iter()
            .map(|entry| RestaurantCount {
                restaurant: names
                    .get(&entry.label)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_RESTAURANT.to_string()),
                count: entry.count,
            })
            .collect(),
        orders_by_size: aggregates
            .by_size
            .into_iter()
            .map(|entry| SizeCount {
                size: entry.label,
                count: entry.count,
            })
            .collect(),
        orders_by_type: aggregates
            .by_type
            .into_iter()
            .map(|entry| TypeCount {
                pizza_type: entry.label,
                count: entry.count,
            })
            .collect(),
        orders_by_month: aggregates
            .by_month
            .into_iter()
            .map(|entry| MonthlyCount {
                month: month_name(entry.month),
                count: entry.count,
            })
            .collect(),
        orders_by_location: aggregates
            .by_location
            .into_iter()
            .map(|entry| LocationCount {
                location: entry.label,
                count: entry.count,
            })
            .collect(),
        delay_stats: DelaySummary {
            on_time: aggregates.by_delay.on_time,
            delayed: aggregates.by_delay.delayed,
            rate,
        },
        peak_hour_stats: aggregates
            .by_hour
            .into_iter()
            .map(|entry| HourlyCount {
                hour: entry.hour,
                count: entry.count,
            })
            .collect(),
        payment_stats: aggregates
            .by_payment
            .into_iter()
            .map(|entry| PaymentCount {
                method: entry.label,
                count: entry.count,
            })
            .collect(),
    }
}

/// Assemble the dashboard payload from one aggregate snapshot and its
/// derived metrics
pub fn dashboard(aggregates: DashboardAggregates, derived: DerivedMetrics) -> DashboardSummary {
    let core = aggregates.core;

    DashboardSummary {
        total_orders: core.total,
        avg_delivery_time: derived.avg_delivery_min,
        delayed_orders: derived.delayed_orders,
        on_time_rate: derived.on_time_rate,
        peak_hour: derived.peak_hour,
        peak_hours: core
            .by_hour
            .into_iter()
            .map(|entry| LabelValue {
                label: format!("{:02}:00", entry.hour),
                value: entry.count,
            })
            .collect(),
        pizza_sizes: core.by_size.into_iter().map(label_value).collect(),
        pizza_types: core.by_type.into_iter().map(label_value).collect(),
        delivery_performance: core
            .by_month
            .into_iter()
            .map(|entry| LabelValue {
                label: month_name(entry.month),
                value: entry.count,
            })
            .collect(),
        traffic_impact: aggregates.by_traffic.into_iter().map(label_value).collect(),
        payment_methods: core.by_payment.into_iter().map(label_value).collect(),
        weekend_vs_weekday: WeekendVsWeekday {
            weekend: aggregates.by_day_kind.weekend,
            weekday: aggregates.by_day_kind.weekday,
        },
        peak_off_peak: PeakOffPeak {
            peak: derived.peak_off_peak.peak,
            off_peak: derived.peak_off_peak.off_peak,
        },
        avg_distance_km: derived.avg_distance_km,
        avg_delay_min: derived.avg_delay_min,
    }
}
