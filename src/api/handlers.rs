//! REST API handlers for delivery analytics
//!
//! These handlers use the shared AnalyticsService. Store failures are
//! logged server-side and surface as one generic internal error; payload
//! bodies never carry backend details.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::analytics::projection::{DashboardSummary, DetailAnalytics};
use crate::models::Restaurant;

use super::auth::Identity;
use super::service::{AnalyticsService, ServiceError};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct RestaurantResponse {
    pub restaurant_id: String,
    pub name: String,
    pub code: String,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(r: Restaurant) -> Self {
        Self {
            restaurant_id: r.restaurant_id,
            name: r.name,
            code: r.code,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    pub restaurant_id: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

pub type AppState = Arc<AnalyticsService>;

fn internal_error(e: ServiceError) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!(error = %e, "analytics request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal server error".to_string(),
        }),
    )
}

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/analytics?restaurant_id=X
pub async fn get_analytics(
    State(service): State<AppState>,
    identity: Identity,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<DetailAnalytics>, (StatusCode, Json<ErrorResponse>)> {
    match service
        .detail_analytics(&identity, params.restaurant_id.as_deref())
        .await
    {
        Ok(payload) => Ok(Json(payload)),
        Err(e) => Err(internal_error(e)),
    }
}

/// GET /api/v1/dashboard/summary
pub async fn get_dashboard_summary(
    State(service): State<AppState>,
    identity: Identity,
) -> Result<Json<DashboardSummary>, (StatusCode, Json<ErrorResponse>)> {
    match service.dashboard_summary(&identity).await {
        Ok(payload) => Ok(Json(payload)),
        Err(e) => Err(internal_error(e)),
    }
}

/// GET /api/v1/restaurants
pub async fn list_restaurants(
    State(service): State<AppState>,
    _identity: Identity,
) -> Result<Json<Vec<RestaurantResponse>>, (StatusCode, Json<ErrorResponse>)> {
    match service.restaurants().await {
        Ok(list) => {
            let response: Vec<RestaurantResponse> =
                list.into_iter().map(RestaurantResponse::from).collect();
            Ok(Json(response))
        }
        Err(e) => Err(internal_error(e)),
    }
}
