use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_chef::aggregate::{Chef, ChefDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a002_chef::service;

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
}

pub async fn list_all(Query(req): Query<ListRequest>) -> Result<Json<Vec<Chef>>, StatusCode> {
    let chefs = service::list_by_tenant(&req.tenant_id).await.map_err(|e| {
        tracing::error!("Failed to list chefs: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(chefs))
}

pub async fn upsert(Json(dto): Json<ChefDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    if dto.id.is_some() {
        service::update(dto).await.map_err(|e| {
            tracing::error!("Failed to update chef: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        Ok(Json(serde_json::json!({"status": "updated"})))
    } else {
        let id = service::create(dto).await.map_err(|e| {
            tracing::error!("Failed to create chef: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        Ok(Json(serde_json::json!({"status": "created", "id": id})))
    }
}

pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Chef>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let chef = service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get chef: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(chef))
}

pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let ok = service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete chef: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !ok {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
