//! SurrealDB-backed record store
//!
//! Scope filtering splices a fixed WHERE clause into each query; restaurant
//! ids only ever travel through bind parameters.

use async_trait::async_trait;
use serde::Deserialize;

use crate::access::AccessScope;
use crate::db::DbConn;
use crate::models::{DayKind, Restaurant};

use super::{
    DayKindCounts, DelayCounts, HourCount, LabelCount, MeasureMeans, MonthCount, RecordStore,
    StoreError,
};

impl From<surrealdb::Error> for StoreError {
    fn from(e: surrealdb::Error) -> Self {
        StoreError::Query(e.to_string())
    }
}

fn scope_clause(scope: &AccessScope) -> &'static str {
    match scope {
        AccessScope::All => "",
        AccessScope::Restaurant(_) => "WHERE restaurant = $restaurant",
        // An unassigned caller matches no rows and gets an all-zero payload
        AccessScope::Empty => "WHERE false",
    }
}

#[derive(Debug, Deserialize)]
struct TotalRow {
    total: i64,
}

#[derive(Debug, Deserialize)]
struct DelayRow {
    delayed: bool,
    count: i64,
}

#[derive(Debug, Deserialize)]
struct DayKindRow {
    day_kind: DayKind,
    count: i64,
}

/// Store implementation over the embedded SurrealDB connection
pub struct SurrealStore {
    db: DbConn,
}

impl SurrealStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn scoped_rows<T>(&self, scope: &AccessScope, sql: String) -> Result<Vec<T>, StoreError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut query = self.db.query(sql);
        if let AccessScope::Restaurant(id) = scope {
            query = query.bind(("restaurant", id.clone()));
        }
        let mut response = query.await?;
        Ok(response.take(0)?)
    }
}

#[async_trait]
impl RecordStore for SurrealStore {
    async fn count_orders(&self, scope: &AccessScope) -> Result<i64, StoreError> {
        let rows: Vec<TotalRow> = self
            .scoped_rows(
                scope,
                format!(
                    "SELECT count() AS total FROM delivery {} GROUP ALL",
                    scope_clause(scope)
                ),
            )
            .await?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn count_by_restaurant(
        &self,
        scope: &AccessScope,
    ) -> Result<Vec<LabelCount>, StoreError> {
        self.scoped_rows(
            scope,
            format!(
                r#"
                SELECT restaurant AS label, count() AS count
                FROM delivery {}
                GROUP BY restaurant
                ORDER BY count DESC, label
                "#,
                scope_clause(scope)
            ),
        )
        .await
    }

    async fn count_by_size(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError> {
        self.scoped_rows(
            scope,
            format!(
                r#"
                SELECT size AS label, count() AS count
                FROM delivery {}
                GROUP BY size
                ORDER BY count DESC, label
                "#,
                scope_clause(scope)
            ),
        )
        .await
    }

    async fn count_by_type(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError> {
        self.scoped_rows(
            scope,
            format!(
                r#"
                SELECT pizza_type AS label, count() AS count
                FROM delivery {}
                GROUP BY pizza_type
                ORDER BY count DESC, label
                "#,
                scope_clause(scope)
            ),
        )
        .await
    }

    async fn count_by_month(&self, scope: &AccessScope) -> Result<Vec<MonthCount>, StoreError> {
        self.scoped_rows(
            scope,
            format!(
                r#"
                SELECT month, count() AS count
                FROM delivery {}
                GROUP BY month
                ORDER BY month
                "#,
                scope_clause(scope)
            ),
        )
        .await
    }

    async fn count_by_location(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError> {
        self.scoped_rows(
            scope,
            format!(
                r#"
                SELECT location AS label, count() AS count
                FROM delivery {}
                GROUP BY location
                ORDER BY count DESC, label
                LIMIT 10
                "#,
                scope_clause(scope)
            ),
        )
        .await
    }

    async fn count_by_delay(&self, scope: &AccessScope) -> Result<DelayCounts, StoreError> {
        let rows: Vec<DelayRow> = self
            .scoped_rows(
                scope,
                format!(
                    "SELECT delayed, count() AS count FROM delivery {} GROUP BY delayed",
                    scope_clause(scope)
                ),
            )
            .await?;

        let mut counts = DelayCounts::default();
        for row in rows {
            if row.delayed {
                counts.delayed = row.count;
            } else {
                counts.on_time = row.count;
            }
        }
        Ok(counts)
    }

    async fn count_by_hour(&self, scope: &AccessScope) -> Result<Vec<HourCount>, StoreError> {
        self.scoped_rows(
            scope,
            format!(
                r#"
                SELECT hour, count() AS count
                FROM delivery {}
                GROUP BY hour
                ORDER BY hour
                "#,
                scope_clause(scope)
            ),
        )
        .await
    }

    async fn count_by_payment(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError> {
        self.scoped_rows(
            scope,
            format!(
                r#"
                SELECT payment AS label, count() AS count
                FROM delivery {}
                GROUP BY payment
                ORDER BY count DESC, label
                "#,
                scope_clause(scope)
            ),
        )
        .await
    }

    async fn count_by_day_kind(&self, scope: &AccessScope) -> Result<DayKindCounts, StoreError> {
        let rows: Vec<DayKindRow> = self
            .scoped_rows(
                scope,
                format!(
                    "SELECT day_kind, count() AS count FROM delivery {} GROUP BY day_kind",
                    scope_clause(scope)
                ),
            )
            .await?;

        let mut counts = DayKindCounts::default();
        for row in rows {
            match row.day_kind {
                DayKind::Weekday => counts.weekday = row.count,
                DayKind::Weekend => counts.weekend = row.count,
            }
        }
        Ok(counts)
    }

    async fn count_by_traffic(&self, scope: &AccessScope) -> Result<Vec<LabelCount>, StoreError> {
        self.scoped_rows(
            scope,
            format!(
                r#"
                SELECT traffic AS label, count() AS count
                FROM delivery {}
                GROUP BY traffic
                ORDER BY count DESC, label
                "#,
                scope_clause(scope)
            ),
        )
        .await
    }

    async fn measure_means(&self, scope: &AccessScope) -> Result<MeasureMeans, StoreError> {
        let rows: Vec<MeasureMeans> = self
            .scoped_rows(
                scope,
                format!(
                    r#"
                    SELECT
                        math::mean(duration_min) AS avg_duration_min,
                        math::mean(distance_km) AS avg_distance_km,
                        math::mean(delay_min) AS avg_delay_min
                    FROM delivery {}
                    GROUP ALL
                    "#,
                    scope_clause(scope)
                ),
            )
            .await?;
        Ok(rows.first().copied().unwrap_or_default())
    }

    async fn restaurants_by_ids(&self, ids: &[String]) -> Result<Vec<Restaurant>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut response = self
            .db
            .query("SELECT restaurant_id, name, code FROM restaurant WHERE restaurant_id IN $ids")
            .bind(("ids", ids.to_vec()))
            .await?;
        Ok(response.take(0)?)
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        let mut response = self
            .db
            .query("SELECT restaurant_id, name, code FROM restaurant ORDER BY name")
            .await?;
        Ok(response.take(0)?)
    }
}
