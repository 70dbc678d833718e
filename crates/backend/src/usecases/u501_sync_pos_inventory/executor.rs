use super::progress_tracker::ProgressTracker;
use crate::domain::{a001_menu_item, a004_pos_connection};
use crate::shared::aggregation::UNCATEGORIZED;
use crate::shared::pos::client::PosApiClient;
use crate::shared::pos::models::PosItem;
use crate::shared::pos::{items_cache_key, ITEMS_CACHE};
use anyhow::Result;
use contracts::domain::a004_pos_connection::aggregate::PosConnection;
use contracts::usecases::u501_sync_pos_inventory::{
    progress::SyncStatus,
    request::SyncRequest,
    response::{SyncResponse, SyncStartStatus},
};
use std::sync::Arc;
use uuid::Uuid;

/// Executor синхронизации меню из POS.
///
/// Запускается только явной административной командой, без планировщика.
/// Идемпотентен по external_id: повторный запуск обновляет блюда на
/// месте, не создавая дубликатов. Ошибки по отдельным позициям
/// считаются и не прерывают остальные — частичный успех нормален.
pub struct SyncExecutor {
    progress_tracker: Arc<ProgressTracker>,
}

impl SyncExecutor {
    pub fn new(progress_tracker: Arc<ProgressTracker>) -> Self {
        Self { progress_tracker }
    }

    /// Запустить синхронизацию (создаёт async task и возвращает session_id)
    pub async fn start_sync(&self, request: SyncRequest) -> Result<SyncResponse> {
        tracing::info!("Starting POS inventory sync with request: {:?}", request);

        let connection = match &request.connection_id {
            Some(id) => {
                let connection_id = Uuid::parse_str(id)
                    .map_err(|_| anyhow::anyhow!("Invalid connection_id"))?;
                a004_pos_connection::service::get_by_id(connection_id)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Подключение POS не найдено"))?
            }
            None => a004_pos_connection::service::find_used(&request.tenant_id)
                .await?
                .ok_or_else(|| {
                    anyhow::anyhow!("У арендатора нет активного подключения POS")
                })?,
        };
        if connection.tenant_id != request.tenant_id {
            anyhow::bail!("Подключение принадлежит другому арендатору");
        }

        let session_id = Uuid::new_v4().to_string();
        self.progress_tracker.create_session(session_id.clone(), None);

        // Запустить синхронизацию в фоне
        let self_clone = Arc::new(self.clone());
        let session_id_clone = session_id.clone();
        let tenant_id = request.tenant_id.clone();

        tokio::spawn(async move {
            if let Err(e) = self_clone
                .run_sync(&session_id_clone, &tenant_id, &connection)
                .await
            {
                tracing::error!("POS inventory sync failed: {}", e);
                self_clone.progress_tracker.add_error(
                    &session_id_clone,
                    format!("Sync failed: {}", e),
                    None,
                    None,
                );
                self_clone
                    .progress_tracker
                    .complete_session(&session_id_clone, SyncStatus::Failed);
            }
        });

        Ok(SyncResponse {
            session_id,
            status: SyncStartStatus::Started,
            message: "Синхронизация меню запущена".to_string(),
        })
    }

    /// Получить текущий прогресс синхронизации
    pub fn get_progress(
        &self,
        session_id: &str,
    ) -> Option<contracts::usecases::u501_sync_pos_inventory::progress::SyncProgress> {
        self.progress_tracker.get_progress(session_id)
    }

    /// Выполнить синхронизацию
    async fn run_sync(
        &self,
        session_id: &str,
        tenant_id: &str,
        connection: &PosConnection,
    ) -> Result<()> {
        tracing::info!("Running POS inventory sync for session: {}", session_id);

        // Каталог забирается свежим, мимо кэша: синхронизация и есть
        // тот известный момент изменения данных
        let client = PosApiClient::new(connection.clone());
        let items = client.list_items().await?;

        let total = items.len() as i32;
        self.progress_tracker.set_total(session_id, total);
        tracing::info!("Fetched {} catalog items for sync", total);

        let mut processed = 0;
        let mut created = 0;
        let mut updated = 0;
        let mut skipped = 0;

        for item in &items {
            self.progress_tracker
                .set_current_item(session_id, Some(format!("{} - {}", item.id, item.name)));

            match self.sync_item(tenant_id, item).await {
                Ok(action) => {
                    processed += 1;
                    match action {
                        a001_menu_item::service::SyncAction::Created => created += 1,
                        a001_menu_item::service::SyncAction::Updated => updated += 1,
                        a001_menu_item::service::SyncAction::Unchanged => skipped += 1,
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to sync item {}: {}", item.id, e);
                    self.progress_tracker.add_error(
                        session_id,
                        format!("Failed to sync item {}", item.name),
                        Some(e.to_string()),
                        Some(item.id.clone()),
                    );
                    processed += 1;
                }
            }

            self.progress_tracker
                .update_progress(session_id, processed, created, updated, skipped);
        }

        self.progress_tracker.set_current_item(session_id, None);

        // Кэш каталога устарел по определению
        ITEMS_CACHE
            .invalidate(&items_cache_key(&connection.to_string_id()))
            .await;

        let final_status = if self
            .progress_tracker
            .get_progress(session_id)
            .map(|p| p.errors > 0)
            .unwrap_or(false)
        {
            SyncStatus::CompletedWithErrors
        } else {
            SyncStatus::Completed
        };
        self.progress_tracker
            .complete_session(session_id, final_status);

        tracing::info!(
            "POS inventory sync completed for session: {}. Processed: {}, Created: {}, Updated: {}, Unchanged: {}",
            session_id,
            processed,
            created,
            updated,
            skipped
        );

        Ok(())
    }

    /// Обработать одну позицию каталога
    async fn sync_item(
        &self,
        tenant_id: &str,
        item: &PosItem,
    ) -> Result<a001_menu_item::service::SyncAction> {
        let category = item
            .categories
            .elements
            .first()
            .and_then(|c| c.name.clone())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        let (_item, action) = a001_menu_item::service::resolve_or_create(
            tenant_id,
            &item.id,
            &item.name,
            &category,
            item.price,
        )
        .await?;
        Ok(action)
    }
}

impl Clone for SyncExecutor {
    fn clone(&self) -> Self {
        Self {
            progress_tracker: Arc::clone(&self.progress_tracker),
        }
    }
}
