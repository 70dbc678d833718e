use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use contracts::dashboards::d401_chef_performance::{
    ChefPerformanceRequest, ChefPerformanceResponse,
};

use super::map_service_error;
use crate::dashboards::d401_chef_performance::service;

/// Handler выработки поваров
pub async fn get_chef_performance(
    Query(req): Query<ChefPerformanceRequest>,
) -> Result<Json<ChefPerformanceResponse>, StatusCode> {
    let response = service::get_chef_performance(req).await.map_err(|e| {
        tracing::error!("Failed to build chef performance: {}", e);
        map_service_error(e)
    })?;
    Ok(Json(response))
}
