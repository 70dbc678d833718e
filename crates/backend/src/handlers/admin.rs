use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::shared::pos::ITEMS_CACHE;

/// Админ-команда "очистить кэш": после известного изменения данных
/// во внешней POS, не дожидаясь TTL
pub async fn clear_cache() -> Result<Json<serde_json::Value>, StatusCode> {
    ITEMS_CACHE.invalidate_all().await;
    Ok(Json(json!({"status": "cleared"})))
}
