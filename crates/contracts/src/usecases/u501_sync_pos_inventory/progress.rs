use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncStatus {
    InProgress,
    Completed,
    CompletedWithErrors,
    Failed,
}

/// Прогресс синхронизации (in-memory, для real-time мониторинга)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncProgress {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub status: SyncStatus,
    /// Сколько позиций пришло из POS (известно после первой страницы)
    pub total: Option<i32>,
    pub processed: i32,
    /// Создано новых блюд
    pub created: i32,
    /// Обновлено существующих
    pub updated: i32,
    /// Пропущено без изменений
    pub skipped: i32,
    pub errors: i32,
    #[serde(rename = "errorList")]
    pub error_list: Vec<SyncError>,
    #[serde(rename = "currentItem")]
    pub current_item: Option<String>,
    #[serde(rename = "startedAt")]
    pub started_at: DateTime<Utc>,
    #[serde(rename = "completedAt")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncError {
    pub message: String,
    pub details: Option<String>,
    /// external_id позиции, на которой произошла ошибка
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,
}
