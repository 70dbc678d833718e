use super::models::{
    PosCategory, PosElements, PosItem, PosOrder, PosOrderBundle,
};
use super::TestConnectionResult;
use crate::shared::errors::AnalyticsError;
use crate::shared::timeframe::TimeWindow;
use contracts::domain::a004_pos_connection::aggregate::PosConnection;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Минимальный интервал между запросами одного клиента
const MIN_REQUEST_INTERVAL_MS: u64 = 100;
/// Пауза перед единственным повтором после троттлинга
const THROTTLE_BACKOFF_MS: u64 = 1000;
/// Размер страницы каталога/категорий
const ITEMS_PAGE_SIZE: i64 = 1000;
/// Размер страницы заказов
const ORDERS_PAGE_SIZE: i64 = 100;

/// HTTP-клиент внешней POS.
///
/// Все вызовы одного экземпляра разделены минимум 100 мс (часы последнего
/// запроса — под мьютексом). Ответ 429 повторяется ровно один раз после
/// паузы в 1 с; любой другой сбой сразу уходит наверх как
/// `SourceUnavailable` — решение о деградации принимает вызывающий.
pub struct PosApiClient {
    client: reqwest::Client,
    connection: PosConnection,
    last_request: Mutex<Option<Instant>>,
}

impl PosApiClient {
    pub fn new(connection: PosConnection) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(super::request_timeout())
                .build()
                .expect("Failed to create HTTP client"),
            connection,
            last_request: Mutex::new(None),
        }
    }

    pub fn connection(&self) -> &PosConnection {
        &self.connection
    }

    /// Выдержать минимальный интервал между запросами
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let min = Duration::from_millis(MIN_REQUEST_INTERVAL_MS);
            let elapsed = prev.elapsed();
            if elapsed < min {
                tokio::time::sleep(min - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn endpoint_url(&self, resource: &str) -> String {
        format!(
            "{}/v3/merchants/{}/{}",
            self.connection.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.connection.merchant_id),
            resource
        )
    }

    /// GET с bearer-авторизацией, троттлингом и одним повтором на 429
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<T, AnalyticsError> {
        let url = self.endpoint_url(resource);
        let mut retried = false;

        loop {
            self.throttle().await;

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.connection.api_key)
                .query(query)
                .send()
                .await
                .map_err(|e| {
                    tracing::error!("POS request to {} failed: {}", url, e);
                    AnalyticsError::SourceUnavailable(format!("POS request failed: {}", e))
                })?;

            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS && !retried {
                tracing::warn!("POS throttled request to {}, retrying once in 1s", url);
                retried = true;
                tokio::time::sleep(Duration::from_millis(THROTTLE_BACKOFF_MS)).await;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let preview: String = body.chars().take(500).collect();
                tracing::error!("POS API request failed with status {}: {}", status, preview);
                return Err(AnalyticsError::SourceUnavailable(format!(
                    "POS API status {}: {}",
                    status, preview
                )));
            }

            let body = response.text().await.map_err(|e| {
                AnalyticsError::SourceUnavailable(format!("POS response read failed: {}", e))
            })?;

            return serde_json::from_str::<T>(&body).map_err(|e| {
                let preview: String = body.chars().take(500).collect();
                tracing::error!("Failed to parse POS response: {}. Body: {}", e, preview);
                AnalyticsError::SourceUnavailable(format!("POS response parse failed: {}", e))
            });
        }
    }

    /// Полный каталог блюд с вложенными категориями.
    /// Пагинация до короткой страницы, порядок сервера сохраняется.
    pub async fn list_items(&self) -> Result<Vec<PosItem>, AnalyticsError> {
        let mut items: Vec<PosItem> = Vec::new();
        let mut offset: i64 = 0;

        loop {
            let query = [
                ("expand", "categories".to_string()),
                ("limit", ITEMS_PAGE_SIZE.to_string()),
                ("offset", offset.to_string()),
            ];
            let page: PosElements<PosItem> = self.get_json("items", &query).await?;
            let fetched = page.elements.len();
            items.extend(page.elements);

            if fetched < ITEMS_PAGE_SIZE as usize {
                break;
            }
            offset += ITEMS_PAGE_SIZE;
        }

        tracing::info!("Fetched {} items from POS", items.len());
        Ok(items)
    }

    /// Полный список категорий
    pub async fn list_categories(&self) -> Result<Vec<PosCategory>, AnalyticsError> {
        let mut categories: Vec<PosCategory> = Vec::new();
        let mut offset: i64 = 0;

        loop {
            let query = [
                ("limit", ITEMS_PAGE_SIZE.to_string()),
                ("offset", offset.to_string()),
            ];
            let page: PosElements<PosCategory> = self.get_json("categories", &query).await?;
            let fetched = page.elements.len();
            categories.extend(page.elements);

            if fetched < ITEMS_PAGE_SIZE as usize {
                break;
            }
            offset += ITEMS_PAGE_SIZE;
        }

        Ok(categories)
    }

    /// Заказы за окно (границы включительно, epoch ms).
    ///
    /// Вместе с заказами возвращается карта категорий id -> имя: если
    /// POS не приложила имена инлайном, они дозапрашиваются отдельным
    /// вызовом — агрегация ключуется по именам.
    pub async fn list_orders(
        &self,
        window: TimeWindow,
    ) -> Result<PosOrderBundle, AnalyticsError> {
        let filters = time_filters(window);
        let mut orders: Vec<PosOrder> = Vec::new();
        let mut offset: i64 = 0;

        loop {
            let query = [
                ("expand", "lineItems,lineItems.item,lineItems.item.categories".to_string()),
                ("filter", filters.0.clone()),
                ("filter", filters.1.clone()),
                ("limit", ORDERS_PAGE_SIZE.to_string()),
                ("offset", offset.to_string()),
            ];
            let page: PosElements<PosOrder> = self.get_json("orders", &query).await?;
            let fetched = page.elements.len();
            orders.extend(page.elements);

            if fetched < ORDERS_PAGE_SIZE as usize {
                break;
            }
            offset += ORDERS_PAGE_SIZE;
        }

        let category_names = self.resolve_category_names(&orders).await?;

        tracing::info!(
            "Fetched {} orders from POS for window [{}, {}]",
            orders.len(),
            window.from_ms,
            window.to_ms
        );
        Ok(PosOrderBundle {
            orders,
            category_names,
        })
    }

    /// Собрать карту категорий id -> имя по заказам; дозапросить
    /// список категорий, если хотя бы одна ссылка пришла без имени
    async fn resolve_category_names(
        &self,
        orders: &[PosOrder],
    ) -> Result<HashMap<String, String>, AnalyticsError> {
        let mut names: HashMap<String, String> = HashMap::new();
        let mut needs_lookup = false;

        for order in orders {
            for line in &order.line_items.elements {
                if let Some(item) = &line.item {
                    for category in &item.categories.elements {
                        match &category.name {
                            Some(name) => {
                                names.insert(category.id.clone(), name.clone());
                            }
                            None => needs_lookup = true,
                        }
                    }
                }
            }
        }

        if needs_lookup {
            for category in self.list_categories().await? {
                if let Some(name) = category.name {
                    names.entry(category.id).or_insert(name);
                }
            }
        }

        Ok(names)
    }

    /// Проверка подключения: одна страница категорий
    pub async fn test_connection(&self) -> TestConnectionResult {
        let query = [("limit", "1".to_string()), ("offset", "0".to_string())];
        match self
            .get_json::<PosElements<PosCategory>>("categories", &query)
            .await
        {
            Ok(_) => TestConnectionResult {
                success: true,
                message: "Подключение к POS успешно".to_string(),
                details: None,
            },
            Err(e) => TestConnectionResult {
                success: false,
                message: "Не удалось подключиться к POS".to_string(),
                details: Some(e.to_string()),
            },
        }
    }
}

/// Пара повторяющихся `filter=` параметров диапазона createdTime.
/// POS принимает именно повторяющиеся параметры, не склейку через запятую.
fn time_filters(window: TimeWindow) -> (String, String) {
    (
        format!("createdTime>={}", window.from_ms),
        format!("createdTime<={}", window.to_ms),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_filters_are_two_separate_params() {
        let (from, to) = time_filters(TimeWindow {
            from_ms: 100,
            to_ms: 200,
        });
        assert_eq!(from, "createdTime>=100");
        assert_eq!(to, "createdTime<=200");
    }
}
