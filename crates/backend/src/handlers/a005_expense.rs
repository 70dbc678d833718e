use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a005_expense::aggregate::{Expense, ExpenseDto};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::a005_expense::service;

#[derive(Debug, Deserialize)]
pub struct ListRequest {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
}

pub async fn list_all(Query(req): Query<ListRequest>) -> Result<Json<Vec<Expense>>, StatusCode> {
    let expenses = service::list_by_tenant(&req.tenant_id).await.map_err(|e| {
        tracing::error!("Failed to list expenses: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(expenses))
}

pub async fn upsert(Json(dto): Json<ExpenseDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    if dto.id.is_some() {
        service::update(dto).await.map_err(|e| {
            tracing::error!("Failed to update expense: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        Ok(Json(json!({"status": "updated"})))
    } else {
        let id = service::create(dto).await.map_err(|e| {
            tracing::error!("Failed to create expense: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        Ok(Json(json!({"status": "created", "id": id})))
    }
}

pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Expense>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let expense = service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get expense: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(expense))
}

pub async fn delete(Path(id): Path<String>) -> Result<Json<serde_json::Value>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let ok = service::delete(uuid).await.map_err(|e| {
        tracing::error!("Failed to delete expense: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if !ok {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({"status": "deleted"})))
}
