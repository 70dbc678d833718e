use serde::{Deserialize, Serialize};

/// Запрос на запуск синхронизации меню
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRequest {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    /// Идентификатор подключения POS; если не указан — используется
    /// активное подключение арендатора
    #[serde(rename = "connectionId", default)]
    pub connection_id: Option<String>,
}
