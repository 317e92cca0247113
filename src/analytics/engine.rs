//! Concurrent aggregation over the record store
//!
//! Each request fans out its grouped counts in one batch and joins them
//! before any metric derivation runs. The batch is all-or-nothing: the
//! first store failure cancels the remaining operations and fails the
//! request, so a payload never mixes results from different attempts.

use std::sync::Arc;

use crate::access::AccessScope;
use crate::store::{
    DayKindCounts, DelayCounts, HourCount, LabelCount, MeasureMeans, MonthCount, RecordStore,
    StoreError,
};

/// Raw grouped counts backing the detail-analytics payload
#[derive(Debug, Clone)]
pub struct Aggregates {
    pub total: i64,
    pub by_restaurant: Vec<LabelCount>,
    pub by_size: Vec<LabelCount>,
    pub by_type: Vec<LabelCount>,
    pub by_month: Vec<MonthCount>,
    pub by_location: Vec<LabelCount>,
    pub by_delay: DelayCounts,
    pub by_hour: Vec<HourCount>,
    pub by_payment: Vec<LabelCount>,
}

/// [`Aggregates`] plus the groupings and means only the dashboard consumes
#[derive(Debug, Clone)]
pub struct DashboardAggregates {
    pub core: Aggregates,
    pub by_day_kind: DayKindCounts,
    pub by_traffic: Vec<LabelCount>,
    pub means: MeasureMeans,
}

/// Issues the grouped-count batches against the record store
pub struct AggregationEngine {
    store: Arc<dyn RecordStore>,
}

impl AggregationEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The nine detail-analytics operations, concurrently
    pub async fn aggregate(&self, scope: &AccessScope) -> Result<Aggregates, StoreError> {
        let (
            total,
            by_restaurant,
            by_size,
            by_type,
            by_month,
            by_location,
            by_delay,
            by_hour,
            by_payment,
        ) = tokio::try_join!(
            self.store.count_orders(scope),
            self.store.count_by_restaurant(scope),
            self.store.count_by_size(scope),
            self.store.count_by_type(scope),
            self.store.count_by_month(scope),
            self.store.count_by_location(scope),
            self.store.count_by_delay(scope),
            self.store.count_by_hour(scope),
            self.store.count_by_payment(scope),
        )?;

        Ok(Aggregates {
            total,
            by_restaurant,
            by_size,
            by_type,
            by_month,
            by_location,
            by_delay,
            by_hour,
            by_payment,
        })
    }

    /// The dashboard batch: the nine plus day-kind, traffic and measure
    /// means, still one fan-out and one join
    pub async fn aggregate_dashboard(
        &self,
        scope: &AccessScope,
    ) -> Result<DashboardAggregates, StoreError> {
        let (core, by_day_kind, by_traffic, means) = tokio::try_join!(
            self.aggregate(scope),
            self.store.count_by_day_kind(scope),
            self.store.count_by_traffic(scope),
            self.store.measure_means(scope),
        )?;

        Ok(DashboardAggregates {
            core,
            by_day_kind,
            by_traffic,
            means,
        })
    }
}
