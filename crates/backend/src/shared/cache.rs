use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Кэш с ограниченным временем жизни записей.
///
/// Закрывает самый дорогой и наименее чувствительный к свежести вызов —
/// каталог блюд POS, — чтобы повторные запросы дашборда не ходили в
/// внешний API каждый раз. Инвалидация — по TTL либо явной командой
/// администратора. Кэш процесс-локальный; межпроцессная когерентность
/// не требуется, ограниченная несвежесть приемлема для дашборда.
pub struct TtlCache<V: Clone> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

struct CacheEntry<V> {
    stored_at: Instant,
    ttl: Duration,
    value: V,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Вернуть значение из кэша либо получить его через `fetch`.
    ///
    /// Мьютекс держится на время загрузки: параллельные промахи по
    /// одному ключу дают один сетевой вызов. Потерянная гонка стоила бы
    /// лишь одного лишнего запроса, но сериализация здесь дешевле.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get(key) {
            if entry.stored_at.elapsed() < entry.ttl {
                tracing::debug!("cache hit: {}", key);
                return Ok(entry.value.clone());
            }
            tracing::debug!("cache expired: {}", key);
        }

        let value = fetch().await?;
        entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                ttl,
                value: value.clone(),
            },
        );
        Ok(value)
    }

    /// Сбросить одну запись
    pub async fn invalidate(&self, key: &str) {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            tracing::info!("cache invalidated: {}", key);
        }
    }

    /// Сбросить все записи (админ-команда "очистить кэш")
    pub async fn invalidate_all(&self) {
        let mut entries = self.entries.lock().await;
        let count = entries.len();
        entries.clear();
        tracing::info!("cache cleared, {} entries dropped", count);
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    async fn counted_fetch(counter: &AtomicU32) -> Result<u32, std::convert::Infallible> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(counter.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_hits_cache() {
        let cache: TtlCache<u32> = TtlCache::new();
        let calls = AtomicU32::new(0);

        let a = cache
            .get_or_fetch("k", Duration::from_secs(600), || counted_fetch(&calls))
            .await
            .unwrap();
        let b = cache
            .get_or_fetch("k", Duration::from_secs(600), || counted_fetch(&calls))
            .await
            .unwrap();

        assert_eq!(a, 1);
        assert_eq!(b, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let cache: TtlCache<u32> = TtlCache::new();
        let calls = AtomicU32::new(0);

        cache
            .get_or_fetch("k", Duration::from_millis(10), || counted_fetch(&calls))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        let b = cache
            .get_or_fetch("k", Duration::from_millis(10), || counted_fetch(&calls))
            .await
            .unwrap();

        assert_eq!(b, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache: TtlCache<u32> = TtlCache::new();
        let calls = AtomicU32::new(0);

        cache
            .get_or_fetch("k", Duration::from_secs(600), || counted_fetch(&calls))
            .await
            .unwrap();
        cache.invalidate("k").await;
        cache
            .get_or_fetch("k", Duration::from_secs(600), || counted_fetch(&calls))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache: TtlCache<u32> = TtlCache::new();
        let calls = AtomicU32::new(0);

        cache
            .get_or_fetch("a", Duration::from_secs(600), || counted_fetch(&calls))
            .await
            .unwrap();
        cache
            .get_or_fetch("b", Duration::from_secs(600), || counted_fetch(&calls))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_is_not_cached() {
        let cache: TtlCache<u32> = TtlCache::new();
        let calls = AtomicU32::new(0);

        let err: Result<u32, &str> = cache
            .get_or_fetch("k", Duration::from_secs(600), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("boom")
            })
            .await;
        assert!(err.is_err());

        let ok = cache
            .get_or_fetch("k", Duration::from_secs(600), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, &str>(7)
            })
            .await
            .unwrap();
        assert_eq!(ok, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
