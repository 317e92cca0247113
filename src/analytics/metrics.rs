//! Derived metrics over the raw grouped counts
//!
//! Pure arithmetic only; nothing here touches the store.

use crate::store::{DayKindCounts, HourCount};

use super::engine::DashboardAggregates;

/// Busy-hour window covering the lunch and dinner rush. Distinct from the
/// single busiest hour, which is derived from the data.
pub const PEAK_HOURS: [u8; 6] = [11, 12, 13, 18, 19, 20];

pub fn is_peak_hour(hour: u8) -> bool {
    PEAK_HOURS.contains(&hour)
}

/// count / total * 100 at one decimal place; 0 when total is 0
pub fn percent_of_total(count: i64, total: i64) -> f64 {
    if total > 0 {
        round1(count as f64 / total as f64 * 100.0)
    } else {
        0.0
    }
}

/// Percentage of on-time orders, one decimal place; 0 for an empty set
pub fn on_time_rate(on_time: i64, total: i64) -> f64 {
    percent_of_total(on_time, total)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Whole-unit rounding for the average measures
pub fn round_whole(v: f64) -> i64 {
    v.round() as i64
}

/// Hour with the highest order count; ties resolve to the earliest hour.
/// An empty aggregate has no peak.
pub fn peak_hour(by_hour: &[HourCount]) -> Option<u8> {
    let max = by_hour.iter().map(|h| h.count).max()?;
    by_hour
        .iter()
        .filter(|h| h.count == max)
        .map(|h| h.hour)
        .min()
}

/// Orders inside vs outside the busy-hour window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeakSplit {
    pub peak: i64,
    pub off_peak: i64,
}

pub fn peak_off_peak(by_hour: &[HourCount], total: i64) -> PeakSplit {
    let peak: i64 = by_hour
        .iter()
        .filter(|h| is_peak_hour(h.hour))
        .map(|h| h.count)
        .sum();
    PeakSplit {
        peak,
        off_peak: total - peak,
    }
}

/// Scalar metrics the dashboard payload carries
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub on_time_rate: f64,
    pub delayed_orders: i64,
    pub peak_hour: Option<u8>,
    pub weekend_vs_weekday: DayKindCounts,
    pub peak_off_peak: PeakSplit,
    pub avg_delivery_min: i64,
    pub avg_distance_km: i64,
    pub avg_delay_min: i64,
}

/// Derive every dashboard metric from one aggregate snapshot
pub fn derive(aggregates: &DashboardAggregates) -> DerivedMetrics {
    let core = &aggregates.core;
    DerivedMetrics {
        on_time_rate: on_time_rate(core.by_delay.on_time, core.total),
        delayed_orders: core.by_delay.delayed,
        peak_hour: peak_hour(&core.by_hour),
        weekend_vs_weekday: aggregates.by_day_kind,
        peak_off_peak: peak_off_peak(&core.by_hour, core.total),
        avg_delivery_min: round_whole(aggregates.means.avg_duration_min),
        avg_distance_km: round_whole(aggregates.means.avg_distance_km),
        avg_delay_min: round_whole(aggregates.means.avg_delay_min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(pairs: &[(u8, i64)]) -> Vec<HourCount> {
        pairs
            .iter()
            .map(|&(hour, count)| HourCount { hour, count })
            .collect()
    }

    #[test]
    fn test_on_time_rate_rounds_to_one_decimal() {
        assert_eq!(on_time_rate(2, 3), 66.7);
        assert_eq!(on_time_rate(1, 3), 33.3);
        assert_eq!(on_time_rate(3, 3), 100.0);
    }

    #[test]
    fn test_on_time_rate_is_zero_for_empty_set() {
        assert_eq!(on_time_rate(0, 0), 0.0);
        assert_eq!(percent_of_total(5, 0), 0.0);
    }

    #[test]
    fn test_peak_hour_picks_highest_count() {
        assert_eq!(peak_hour(&hours(&[(9, 5), (14, 8), (20, 3)])), Some(14));
    }

    #[test]
    fn test_peak_hour_tie_resolves_to_earliest() {
        assert_eq!(peak_hour(&hours(&[(9, 5), (14, 8), (20, 8)])), Some(14));
        assert_eq!(peak_hour(&hours(&[(20, 8), (14, 8), (9, 5)])), Some(14));
        assert_eq!(peak_hour(&hours(&[(3, 1), (2, 1), (23, 1)])), Some(2));
    }

    #[test]
    fn test_peak_hour_of_nothing_is_none() {
        assert_eq!(peak_hour(&[]), None);
    }

    #[test]
    fn test_peak_split_covers_the_total() {
        let by_hour = hours(&[(9, 4), (12, 6), (19, 5), (23, 2)]);
        let split = peak_off_peak(&by_hour, 17);
        assert_eq!(split.peak, 11);
        assert_eq!(split.off_peak, 6);
    }

    #[test]
    fn test_busy_window_membership() {
        assert!(is_peak_hour(11));
        assert!(is_peak_hour(20));
        assert!(!is_peak_hour(10));
        assert!(!is_peak_hour(21));
    }

    #[test]
    fn test_round_whole() {
        assert_eq!(round_whole(29.4), 29);
        assert_eq!(round_whole(29.5), 30);
        assert_eq!(round_whole(0.0), 0);
    }
}
