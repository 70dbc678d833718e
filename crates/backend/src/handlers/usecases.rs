use axum::extract::Path;
use axum::http::StatusCode;
use axum::Json;
use contracts::usecases::u501_sync_pos_inventory::{SyncProgress, SyncRequest, SyncResponse};
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::usecases::u501_sync_pos_inventory::executor::SyncExecutor;
use crate::usecases::u501_sync_pos_inventory::progress_tracker::ProgressTracker;

/// Единственный executor синхронизации на процесс
static SYNC_EXECUTOR: Lazy<SyncExecutor> =
    Lazy::new(|| SyncExecutor::new(Arc::new(ProgressTracker::new())));

/// Запуск синхронизации меню из POS
pub async fn u501_start_sync(
    Json(request): Json<SyncRequest>,
) -> Result<Json<SyncResponse>, StatusCode> {
    let response = SYNC_EXECUTOR.start_sync(request).await.map_err(|e| {
        tracing::error!("Failed to start POS inventory sync: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(response))
}

/// Прогресс синхронизации по session_id
pub async fn u501_get_progress(
    Path(session_id): Path<String>,
) -> Result<Json<SyncProgress>, StatusCode> {
    SYNC_EXECUTOR
        .get_progress(&session_id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
