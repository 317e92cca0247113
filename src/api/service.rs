//! Shared business logic for the analytics API
//!
//! Resolves the caller's scope, runs the concurrent aggregation batch,
//! resolves restaurant names and projects the payload. Handlers stay thin.

use std::sync::Arc;

use thiserror::Error;

use crate::access;
use crate::analytics::engine::AggregationEngine;
use crate::analytics::projection::{self, DashboardSummary, DetailAnalytics};
use crate::analytics::{metrics, names};
use crate::models::Restaurant;
use crate::store::{RecordStore, StoreError};

use super::auth::Identity;

/// Failures that cross the service boundary. Degenerate inputs (empty
/// scope, dangling restaurant ids) never land here; they produce
/// well-formed payloads instead.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("aggregation failed: {0}")]
    Aggregation(#[from] StoreError),
}

pub struct AnalyticsService {
    store: Arc<dyn RecordStore>,
    engine: AggregationEngine,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let engine = AggregationEngine::new(store.clone());
        Self { store, engine }
    }

    /// Detail analytics under the caller's scope. Unrestricted roles may
    /// narrow to a requested restaurant; restricted roles ignore the
    /// request parameter.
    pub async fn detail_analytics(
        &self,
        identity: &Identity,
        requested_restaurant: Option<&str>,
    ) -> Result<DetailAnalytics, ServiceError> {
        let scope = access::resolve(
            identity.role,
            identity.restaurant_id.as_deref(),
            requested_restaurant,
        );
        let aggregates = self.engine.aggregate(&scope).await?;

        // Name resolution needs the grouped ids, so it runs after the join
        let ids: Vec<String> = aggregates
            .by_restaurant
            .iter()
            .map(|entry| entry.label.clone())
            .collect();
        let names = names::resolve_restaurant_names(self.store.as_ref(), &ids).await?;

        Ok(projection::detail(aggregates, &names))
    }

    /// Dashboard summary under the caller's scope
    pub async fn dashboard_summary(
        &self,
        identity: &Identity,
    ) -> Result<DashboardSummary, ServiceError> {
        let scope = access::resolve(identity.role, identity.restaurant_id.as_deref(), None);
        let aggregates = self.engine.aggregate_dashboard(&scope).await?;
        let derived = metrics::derive(&aggregates);

        Ok(projection::dashboard(aggregates, derived))
    }

    /// Restaurant reference list, sorted by name
    pub async fn restaurants(&self) -> Result<Vec<Restaurant>, ServiceError> {
        Ok(self.store.list_restaurants().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Role;
    use crate::models::{DayKind, DeliveryRecord, PizzaSize, TrafficLevel};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn record(restaurant: &str, size: PizzaSize, hour: u8, delay_min: f64) -> DeliveryRecord {
        let ordered_at = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(hour as u32, 0, 0)
            .unwrap();
        DeliveryRecord {
            order_id: format!("ORD-{restaurant}-{hour}-{delay_min}"),
            restaurant: restaurant.to_string(),
            size,
            pizza_type: "Classic".to_string(),
            payment: "Cash".to_string(),
            location: "Downtown".to_string(),
            ordered_at,
            month: 0,
            hour: 0,
            day_kind: DayKind::Weekday,
            traffic: TrafficLevel::Medium,
            duration_min: 30.0,
            distance_km: 4.0,
            delay_min,
            delayed: false,
        }
        .with_derived_fields()
    }

    fn identity(role: Role, restaurant_id: Option<&str>) -> Identity {
        Identity {
            user_id: "u-1".to_string(),
            role,
            restaurant_id: restaurant_id.map(str::to_string),
        }
    }

    fn service() -> AnalyticsService {
        let store = MemoryStore::new(
            vec![
                record("R1", PizzaSize::Large, 9, 0.0),
                record("R1", PizzaSize::Medium, 9, 12.0),
                record("R2", PizzaSize::Large, 14, 0.0),
            ],
            vec![
                Restaurant {
                    restaurant_id: "R1".to_string(),
                    name: "Harbor Kitchen".to_string(),
                    code: "HK".to_string(),
                },
                Restaurant {
                    restaurant_id: "R2".to_string(),
                    name: "Via Roma".to_string(),
                    code: "VR".to_string(),
                },
            ],
        );
        AnalyticsService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_gm_sees_whole_organization() {
        let payload = service()
            .detail_analytics(&identity(Role::Gm, None), None)
            .await
            .unwrap();

        assert_eq!(payload.total_orders, 3);
        assert_eq!(payload.delay_stats.on_time, 2);
        assert_eq!(payload.delay_stats.delayed, 1);
        assert_eq!(payload.delay_stats.rate, 66.7);
        assert_eq!(payload.orders_by_size[0].size, "Large");
        assert_eq!(payload.orders_by_size[0].count, 2);
        assert_eq!(payload.orders_by_size[1].count, 1);
        assert_eq!(payload.orders_by_restaurant[0].restaurant, "Harbor Kitchen");
    }

    #[tokio::test]
    async fn test_gm_override_narrows_to_one_restaurant() {
        let payload = service()
            .detail_analytics(&identity(Role::Gm, None), Some("R2"))
            .await
            .unwrap();

        assert_eq!(payload.total_orders, 1);
        assert_eq!(payload.orders_by_restaurant.len(), 1);
        assert_eq!(payload.orders_by_restaurant[0].restaurant, "Via Roma");
    }

    #[tokio::test]
    async fn test_unknown_override_yields_zeroed_payload() {
        let payload = service()
            .detail_analytics(&identity(Role::Gm, None), Some("R7"))
            .await
            .unwrap();

        assert_eq!(payload.total_orders, 0);
        assert!(payload.orders_by_restaurant.is_empty());
        assert_eq!(payload.delay_stats.rate, 0.0);
    }

    #[tokio::test]
    async fn test_manager_override_is_ignored() {
        let payload = service()
            .detail_analytics(&identity(Role::Manager, Some("R1")), Some("R2"))
            .await
            .unwrap();

        assert_eq!(payload.total_orders, 2);
        assert_eq!(payload.orders_by_restaurant[0].restaurant, "Harbor Kitchen");
    }

    #[tokio::test]
    async fn test_unassigned_staff_gets_zeroed_payload() {
        let payload = service()
            .detail_analytics(&identity(Role::Staff, None), Some("R1"))
            .await
            .unwrap();

        assert_eq!(payload.total_orders, 0);
        assert!(payload.orders_by_restaurant.is_empty());
        assert_eq!(payload.delay_stats.rate, 0.0);
    }

    #[tokio::test]
    async fn test_dangling_restaurant_id_reads_as_unknown() {
        let store = MemoryStore::new(
            vec![record("R9", PizzaSize::Small, 11, 0.0)],
            vec![],
        );
        let service = AnalyticsService::new(Arc::new(store));

        let payload = service
            .detail_analytics(&identity(Role::Gm, None), None)
            .await
            .unwrap();
        assert_eq!(payload.orders_by_restaurant[0].restaurant, "Unknown");
    }

    #[tokio::test]
    async fn test_dashboard_summary_end_to_end() {
        let payload = service()
            .dashboard_summary(&identity(Role::AdminPusat, None))
            .await
            .unwrap();

        assert_eq!(payload.total_orders, 3);
        assert_eq!(payload.on_time_rate, 66.7);
        assert_eq!(payload.delayed_orders, 1);
        assert_eq!(payload.peak_hour, Some(9));
        assert_eq!(payload.avg_delivery_time, 30);
        assert_eq!(payload.weekend_vs_weekday.weekday, 3);
        assert_eq!(payload.weekend_vs_weekday.weekend, 0);
        // 9:00 and 14:00 both fall outside the busy-hour window
        assert_eq!(payload.peak_off_peak.peak, 0);
        assert_eq!(payload.peak_off_peak.off_peak, 3);
    }

    #[tokio::test]
    async fn test_dashboard_is_scoped_for_managers() {
        let payload = service()
            .dashboard_summary(&identity(Role::AsistenManager, Some("R2")))
            .await
            .unwrap();

        assert_eq!(payload.total_orders, 1);
        assert_eq!(payload.peak_hour, Some(14));
    }

    #[tokio::test]
    async fn test_restaurants_listing_is_sorted() {
        let list = service().restaurants().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "Harbor Kitchen");
        assert_eq!(list[1].name, "Via Roma");
    }
}
