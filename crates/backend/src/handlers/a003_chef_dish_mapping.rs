use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a003_chef_dish_mapping::aggregate::{ChefDishMapping, ChefDishMappingDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a003_chef_dish_mapping::service;

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "chefRef", default)]
    pub chef_ref: Option<String>,
}

pub async fn list_all(
    Query(req): Query<ListRequest>,
) -> Result<Json<Vec<ChefDishMapping>>, StatusCode> {
    let result = match &req.chef_ref {
        Some(chef_ref) => service::list_by_chef(&req.tenant_id, chef_ref).await,
        None => service::list_by_tenant(&req.tenant_id).await,
    };
    let mappings = result.map_err(|e| {
        tracing::error!("Failed to list chef-dish mappings: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(mappings))
}

/// Создание закрепления; блюдо ищется, но не создаётся
pub async fn create(
    Json(dto): Json<ChefDishMappingDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = service::create(dto).await.map_err(|e| {
        tracing::error!("Failed to create chef-dish mapping: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(serde_json::json!({"status": "created", "id": id})))
}

pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let ok = service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete chef-dish mapping: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !ok {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
