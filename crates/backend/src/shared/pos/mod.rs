//! Интеграция с внешней POS (read-only).
//!
//! Merchant-scoped REST API с bearer-токеном: товары, категории, заказы.
//! Деньги — целые минорные единицы; пагинация limit/offset; фильтр по
//! createdTime — повторяющиеся query-параметры `filter=`.

pub mod client;
pub mod models;

use crate::shared::cache::TtlCache;
use models::PosItem;
use once_cell::sync::{Lazy, OnceCell};
use std::time::Duration;

/// Единственный кэш каталога блюд: самый дорогой и наименее
/// чувствительный к свежести вызов POS. Никто, кроме движка и
/// админ-команды очистки, кэш напрямую не трогает.
pub static ITEMS_CACHE: Lazy<TtlCache<Vec<PosItem>>> = Lazy::new(TtlCache::new);

/// TTL каталога; выставляется из конфига при старте
static ITEMS_CACHE_TTL_SECS: OnceCell<u64> = OnceCell::new();
/// Таймаут HTTP-запроса к POS; выставляется из конфига при старте
static REQUEST_TIMEOUT_SECS: OnceCell<u64> = OnceCell::new();

pub fn set_items_cache_ttl(secs: u64) {
    let _ = ITEMS_CACHE_TTL_SECS.set(secs);
}

pub fn items_cache_ttl() -> Duration {
    Duration::from_secs(*ITEMS_CACHE_TTL_SECS.get_or_init(|| 600))
}

pub fn set_request_timeout(secs: u64) {
    let _ = REQUEST_TIMEOUT_SECS.set(secs);
}

pub fn request_timeout() -> Duration {
    Duration::from_secs(*REQUEST_TIMEOUT_SECS.get_or_init(|| 30))
}

/// Ключ кэша каталога для подключения
pub fn items_cache_key(connection_id: &str) -> String {
    format!("pos_items:{}", connection_id)
}

/// Результат проверки подключения к POS
#[derive(Debug, Clone)]
pub struct TestConnectionResult {
    pub success: bool,
    pub message: String,
    pub details: Option<String>,
}
