use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a004_pos_connection::aggregate::{PosConnection, PosConnectionDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::a004_pos_connection::service;

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
}

pub async fn list_all(
    Query(req): Query<ListRequest>,
) -> Result<Json<Vec<PosConnection>>, StatusCode> {
    let connections = service::list_by_tenant(&req.tenant_id).await.map_err(|e| {
        tracing::error!("Failed to list POS connections: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(connections))
}

pub async fn upsert(
    Json(dto): Json<PosConnectionDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    if dto.id.is_some() {
        service::update(dto).await.map_err(|e| {
            tracing::error!("Failed to update POS connection: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        Ok(Json(json!({"status": "updated"})))
    } else {
        let id = service::create(dto).await.map_err(|e| {
            tracing::error!("Failed to create POS connection: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        Ok(Json(json!({"status": "created", "id": id})))
    }
}

pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<PosConnection>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let connection = service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get POS connection: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(connection))
}

pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let ok = service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete POS connection: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !ok {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({"status": "deleted"})))
}

/// Проверка подключения к POS без сохранения
pub async fn test_connection(
    Json(dto): Json<PosConnectionDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = service::test_connection(&dto).await;
    Ok(Json(json!({
        "success": result.success,
        "message": result.message,
        "details": result.details,
    })))
}
