use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a007_data_source_selection::aggregate::{
    DataSourceSelection, DataSourceSelectionDto,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::a007_data_source_selection::service;

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    /// Без параметра — все строки (админ-обзор)
    #[serde(rename = "tenantId", default)]
    pub tenant_id: Option<String>,
}

pub async fn list_all(
    Query(req): Query<ListRequest>,
) -> Result<Json<Vec<DataSourceSelection>>, StatusCode> {
    let result = match &req.tenant_id {
        Some(tenant_id) => service::list_for_tenant(tenant_id).await,
        None => service::list_all().await,
    };
    let rows = result.map_err(|e| {
        tracing::error!("Failed to list data source selections: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(rows))
}

/// Административное переключение источника (upsert по паре
/// арендатор+категория)
pub async fn set_source(
    Json(dto): Json<DataSourceSelectionDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = service::set_source(dto).await.map_err(|e| {
        tracing::error!("Failed to set data source: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(json!({"status": "saved", "id": id})))
}

pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let ok = service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete data source selection: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !ok {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({"status": "deleted"})))
}
