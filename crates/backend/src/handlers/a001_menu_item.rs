use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_menu_item::aggregate::{MenuItem, MenuItemDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a001_menu_item::service;

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
}

/// Handler для списка блюд арендатора
pub async fn list_all(Query(req): Query<ListRequest>) -> Result<Json<Vec<MenuItem>>, StatusCode> {
    let items = service::list_by_tenant(&req.tenant_id).await.map_err(|e| {
        tracing::error!("Failed to list menu items: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(items))
}

/// Handler для создания/обновления блюда
pub async fn upsert(Json(dto): Json<MenuItemDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    if dto.id.is_some() {
        service::update(dto).await.map_err(|e| {
            tracing::error!("Failed to update menu item: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        Ok(Json(serde_json::json!({"status": "updated"})))
    } else {
        let id = service::create(dto).await.map_err(|e| {
            tracing::error!("Failed to create menu item: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        Ok(Json(serde_json::json!({"status": "created", "id": id})))
    }
}

pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<MenuItem>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let item = service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get menu item: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(item))
}

/// Блюда не удаляются — только деактивация
pub async fn deactivate(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let ok = service::deactivate(uuid).await.map_err(|e| {
        tracing::error!("Failed to deactivate menu item: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !ok {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::json!({"status": "deactivated"})))
}
