use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use contracts::domain::a006_sale_record::aggregate::{SaleRecord, SaleRecordDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::a006_sale_record::service;

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    /// UTC-границы, включительно
    #[serde(rename = "from")]
    pub from: DateTime<Utc>,
    #[serde(rename = "to")]
    pub to: DateTime<Utc>,
}

pub async fn list(Query(req): Query<ListRequest>) -> Result<Json<Vec<SaleRecord>>, StatusCode> {
    let records = service::list_in_range(&req.tenant_id, req.from, req.to)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list sale records: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(records))
}

pub async fn create(Json(dto): Json<SaleRecordDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = service::create(dto).await.map_err(|e| {
        tracing::error!("Failed to create sale record: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(json!({"status": "created", "id": id})))
}

pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let ok = service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete sale record: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !ok {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({"status": "deleted"})))
}
