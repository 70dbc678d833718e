use contracts::usecases::u501_sync_pos_inventory::progress::{
    SyncError, SyncProgress, SyncStatus,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Трекер прогресса синхронизации (in-memory, для real-time мониторинга)
#[derive(Clone)]
pub struct ProgressTracker {
    sessions: Arc<RwLock<HashMap<String, SyncProgress>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Создать новую сессию синхронизации
    pub fn create_session(&self, session_id: String, total: Option<i32>) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(
            session_id.clone(),
            SyncProgress {
                session_id,
                status: SyncStatus::InProgress,
                total,
                processed: 0,
                created: 0,
                updated: 0,
                skipped: 0,
                errors: 0,
                error_list: Vec::new(),
                current_item: None,
                started_at: chrono::Utc::now(),
                completed_at: None,
            },
        );
    }

    /// Получить текущий прогресс сессии
    pub fn get_progress(&self, session_id: &str) -> Option<SyncProgress> {
        let sessions = self.sessions.read().unwrap();
        sessions.get(session_id).cloned()
    }

    /// Обновить прогресс
    pub fn update_progress(
        &self,
        session_id: &str,
        processed: i32,
        created: i32,
        updated: i32,
        skipped: i32,
    ) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.processed = processed;
            progress.created = created;
            progress.updated = updated;
            progress.skipped = skipped;
        }
    }

    /// Установить общее количество позиций
    pub fn set_total(&self, session_id: &str, total: i32) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.total = Some(total);
        }
    }

    /// Установить текущую обрабатываемую позицию
    pub fn set_current_item(&self, session_id: &str, label: Option<String>) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.current_item = label;
        }
    }

    /// Добавить ошибку
    pub fn add_error(
        &self,
        session_id: &str,
        message: String,
        details: Option<String>,
        external_id: Option<String>,
    ) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.errors += 1;
            progress.error_list.push(SyncError {
                message,
                details,
                external_id,
            });
        }
    }

    /// Завершить сессию
    pub fn complete_session(&self, session_id: &str, status: SyncStatus) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(progress) = sessions.get_mut(session_id) {
            progress.status = status;
            progress.completed_at = Some(chrono::Utc::now());
            progress.current_item = None;
        }
    }

    /// Удалить старые сессии (для очистки памяти)
    pub fn cleanup_old_sessions(&self, max_age_hours: i64) {
        let mut sessions = self.sessions.write().unwrap();
        let now = chrono::Utc::now();
        sessions.retain(|_, progress| {
            if let Some(completed_at) = progress.completed_at {
                (now - completed_at).num_hours() < max_age_hours
            } else {
                true // Не удаляем активные сессии
            }
        });
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
