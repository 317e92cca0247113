//! In-memory record store
//!
//! Same ordering contracts as the SurrealDB store: descending groupings
//! break count ties on the label so results are stable run to run.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use crate::access::AccessScope;
use crate::models::{DayKind, DeliveryRecord, Restaurant};

use super::{
    DayKindCounts, DelayCounts, HourCount, LabelCount, MeasureMeans, MonthCount, RecordStore,
    StoreError,
};

#[derive(Default)]
pub struct MemoryStore {
    records: Vec<DeliveryRecord>,
    restaurants: Vec<Restaurant>,
}

impl MemoryStore {
    pub fn new(records: Vec<DeliveryRecord>, restaurants: Vec<Restaurant>) -> Self {
        Self {
            records,
            restaurants,
        }
    }

    fn scoped(&self, scope: &AccessScope) -> Vec<&DeliveryRecord> {
        self.records
            .iter()
            .filter(|record| match scope {
                AccessScope::All => true,
                AccessScope::Restaurant(id) => record.restaurant == *id,
                AccessScope::Empty => false,
            })
            .collect()
    }
}

fn grouped_desc(
    records: &[&DeliveryRecord],
    key: impl Fn(&DeliveryRecord) -> String,
) -> Vec<LabelCount> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    let mut out: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn count_orders(&self, scope: &AccessScope) -> Result<i64, StoreError> {
        Ok(self.scoped(scope).len() as i64)
    }

    async fn count_by_restaurant(
        &self,
        scope: &AccessScope,
    ) -> Result<Vec<LabelCount>, StoreError> {
        Ok(grouped_desc(&self.scoped(scope), |r| r.restaurant.clone()))
    }

    async fn count_by_size(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError> {
        Ok(grouped_desc(&self.scoped(scope), |r| {
            r.size.as_str().to_string()
        }))
    }

    async fn count_by_type(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError> {
        Ok(grouped_desc(&self.scoped(scope), |r| r.pizza_type.clone()))
    }

    async fn count_by_month(&self, scope: &AccessScope) -> Result<Vec<MonthCount>, StoreError> {
        let mut counts: BTreeMap<u8, i64> = BTreeMap::new();
        for record in self.scoped(scope) {
            *counts.entry(record.month).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(month, count)| MonthCount { month, count })
            .collect())
    }

    async fn count_by_location(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError> {
        let mut out = grouped_desc(&self.scoped(scope), |r| r.location.clone());
        out.truncate(10);
        Ok(out)
    }

    async fn count_by_delay(&self, scope: &AccessScope) -> Result<DelayCounts, StoreError> {
        let mut counts = DelayCounts::default();
        for record in self.scoped(scope) {
            if record.delayed {
                counts.delayed += 1;
            } else {
                counts.on_time += 1;
            }
        }
        Ok(counts)
    }

    async fn count_by_hour(&self, scope: &AccessScope) -> Result<Vec<HourCount>, StoreError> {
        let mut counts: BTreeMap<u8, i64> = BTreeMap::new();
        for record in self.scoped(scope) {
            *counts.entry(record.hour).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(hour, count)| HourCount { hour, count })
            .collect())
    }

    async fn count_by_payment(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError> {
        Ok(grouped_desc(&self.scoped(scope), |r| r.payment.clone()))
    }

    async fn count_by_day_kind(&self, scope: &AccessScope) -> Result<DayKindCounts, StoreError> {
        let mut counts = DayKindCounts::default();
        for record in self.scoped(scope) {
            match record.day_kind {
                DayKind::Weekday => counts.weekday += 1,
                DayKind::Weekend => counts.weekend += 1,
            }
        }
        Ok(counts)
    }

    async fn count_by_traffic(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError> {
        Ok(grouped_desc(&self.scoped(scope), |r| {
            r.traffic.as_str().to_string()
        }))
    }

    async fn measure_means(&self, scope: &AccessScope) -> Result<MeasureMeans, StoreError> {
        let records = self.scoped(scope);
        if records.is_empty() {
            return Ok(MeasureMeans::default());
        }
        let n = records.len() as f64;
        Ok(MeasureMeans {
            avg_duration_min: records.iter().map(|r| r.duration_min).sum::<f64>() / n,
            avg_distance_km: records.iter().map(|r| r.distance_km).sum::<f64>() / n,
            avg_delay_min: records.iter().map(|r| r.delay_min).sum::<f64>() / n,
        })
    }

    async fn restaurants_by_ids(&self, ids: &[String]) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self
            .restaurants
            .iter()
            .filter(|r| ids.contains(&r.restaurant_id))
            .cloned()
            .collect())
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        let mut out = self.restaurants.clone();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PizzaSize, TrafficLevel};
    use chrono::NaiveDate;

    fn record(restaurant: &str, size: PizzaSize, hour: u8, location: &str) -> DeliveryRecord {
        let ordered_at = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(hour as u32, 0, 0)
            .unwrap();
        DeliveryRecord {
            order_id: format!("ORD-{restaurant}-{hour}-{location}"),
            restaurant: restaurant.to_string(),
            size,
            pizza_type: "Classic".to_string(),
            payment: "Cash".to_string(),
            location: location.to_string(),
            ordered_at,
            month: 0,
            hour: 0,
            day_kind: DayKind::Weekday,
            traffic: TrafficLevel::Medium,
            duration_min: 30.0,
            distance_km: 4.0,
            delay_min: 0.0,
            delayed: false,
        }
        .with_derived_fields()
    }

    #[tokio::test]
    async fn test_scope_filters_counts() {
        let store = MemoryStore::new(
            vec![
                record("R1", PizzaSize::Large, 9, "Downtown"),
                record("R1", PizzaSize::Medium, 9, "Downtown"),
                record("R2", PizzaSize::Large, 14, "Harbor"),
            ],
            vec![],
        );

        assert_eq!(store.count_orders(&AccessScope::All).await.unwrap(), 3);
        assert_eq!(
            store
                .count_orders(&AccessScope::Restaurant("R1".to_string()))
                .await
                .unwrap(),
            2
        );
        assert_eq!(store.count_orders(&AccessScope::Empty).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_desc_grouping_breaks_ties_on_label() {
        let store = MemoryStore::new(
            vec![
                record("R2", PizzaSize::Large, 9, "Downtown"),
                record("R1", PizzaSize::Large, 10, "Downtown"),
                record("R1", PizzaSize::Large, 11, "Downtown"),
                record("R3", PizzaSize::Large, 12, "Downtown"),
            ],
            vec![],
        );

        let counts = store.count_by_restaurant(&AccessScope::All).await.unwrap();
        let labels: Vec<&str> = counts.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["R1", "R2", "R3"]);
        assert_eq!(counts[0].count, 2);
    }

    #[tokio::test]
    async fn test_location_grouping_keeps_top_ten() {
        let records: Vec<DeliveryRecord> = (0..12)
            .map(|i| record("R1", PizzaSize::Medium, 9, &format!("Area{i:02}")))
            .collect();
        let store = MemoryStore::new(records, vec![]);

        let locations = store.count_by_location(&AccessScope::All).await.unwrap();
        assert_eq!(locations.len(), 10);
    }

    #[tokio::test]
    async fn test_hour_grouping_is_ascending() {
        let store = MemoryStore::new(
            vec![
                record("R1", PizzaSize::Medium, 20, "Downtown"),
                record("R1", PizzaSize::Medium, 9, "Downtown"),
                record("R1", PizzaSize::Medium, 14, "Downtown"),
            ],
            vec![],
        );

        let hours = store.count_by_hour(&AccessScope::All).await.unwrap();
        let keys: Vec<u8> = hours.iter().map(|h| h.hour).collect();
        assert_eq!(keys, vec![9, 14, 20]);
    }

    #[tokio::test]
    async fn test_means_are_zero_for_empty_scope() {
        let store = MemoryStore::new(
            vec![record("R1", PizzaSize::Medium, 9, "Downtown")],
            vec![],
        );
        let means = store.measure_means(&AccessScope::Empty).await.unwrap();
        assert_eq!(means, MeasureMeans::default());
    }
}
