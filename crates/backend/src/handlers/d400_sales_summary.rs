use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use contracts::dashboards::d400_sales_summary::{SalesSummaryRequest, SalesSummaryResponse};

use super::map_service_error;
use crate::dashboards::d400_sales_summary::service;

/// Handler сводки продаж
pub async fn get_sales_summary(
    Query(req): Query<SalesSummaryRequest>,
) -> Result<Json<SalesSummaryResponse>, StatusCode> {
    let summary = service::get_sales_summary(req).await.map_err(|e| {
        tracing::error!("Failed to build sales summary: {}", e);
        map_service_error(e)
    })?;
    Ok(Json(summary))
}
