use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use contracts::dashboards::d402_profitability::{ProfitabilityRequest, ProfitabilityResponse};

use super::map_service_error;
use crate::dashboards::d402_profitability::service;

/// Handler прибыльности
pub async fn get_profitability(
    Query(req): Query<ProfitabilityRequest>,
) -> Result<Json<ProfitabilityResponse>, StatusCode> {
    let response = service::get_profitability(req).await.map_err(|e| {
        tracing::error!("Failed to build profitability report: {}", e);
        map_service_error(e)
    })?;
    Ok(Json(response))
}
