//! Стратегии источника продаж.
//!
//! Резолвер выбирает источник на каждый вызов; выбранная стратегия
//! передаётся по цепочке явно — глобальных флагов режима нет. Обе
//! стратегии выдают одинаково нормализованные строки, дальше их
//! обрабатывает одно и то же ядро агрегации.

use crate::domain::{a001_menu_item, a006_sale_record};
use crate::shared::aggregation::{line_revenue_cents, SaleLine, SaleOrigin, UNCATEGORIZED};
use crate::shared::errors::AnalyticsError;
use crate::shared::pos::client::PosApiClient;
use crate::shared::pos::models::{PosItem, PosOrderBundle};
use crate::shared::pos::{items_cache_key, items_cache_ttl, ITEMS_CACHE};
use crate::shared::recon::MenuItemIndex;
use crate::shared::timeframe::{day_bounds, local_date_of, local_date_of_millis};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use contracts::domain::a004_pos_connection::aggregate::PosConnection;
use std::collections::HashMap;

/// Источник нормализованных строк продаж за период
#[async_trait]
pub trait SalesSource: Send + Sync {
    /// Имя источника для сводки
    fn name(&self) -> &'static str;

    async fn load_sales(
        &self,
        tenant_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<SaleLine>, AnalyticsError>;
}

// ============================================================================
// Local source
// ============================================================================

/// Локальный источник: строки продаж из собственной базы
pub struct LocalSalesSource {
    tz_offset_minutes: i32,
}

impl LocalSalesSource {
    pub fn new(tz_offset_minutes: i32) -> Self {
        Self { tz_offset_minutes }
    }
}

#[async_trait]
impl SalesSource for LocalSalesSource {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn load_sales(
        &self,
        tenant_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<SaleLine>, AnalyticsError> {
        let window = day_bounds(date_from, date_to, self.tz_offset_minutes)?;
        let from = Utc
            .timestamp_millis_opt(window.from_ms)
            .single()
            .unwrap_or_else(Utc::now);
        let to = Utc
            .timestamp_millis_opt(window.to_ms)
            .single()
            .unwrap_or_else(Utc::now);

        let records = a006_sale_record::repository::list_in_range(tenant_id, from, to)
            .await
            .map_err(|e| AnalyticsError::SourceUnavailable(format!("local store: {}", e)))?;

        let items = a001_menu_item::repository::list_by_tenant(tenant_id)
            .await
            .map_err(|e| AnalyticsError::SourceUnavailable(format!("local store: {}", e)))?;
        let item_by_ref: HashMap<String, _> = items
            .into_iter()
            .map(|i| (i.to_string_id(), i))
            .collect();

        let lines = records
            .into_iter()
            .map(|record| {
                let item = item_by_ref.get(&record.menu_item_ref);
                let (item_name, external_item_id, category) = match item {
                    Some(i) => (
                        i.base.description.clone(),
                        i.external_id.clone(),
                        if i.category.trim().is_empty() {
                            UNCATEGORIZED.to_string()
                        } else {
                            i.category.clone()
                        },
                    ),
                    // Блюдо успели удалить — строка не пропадает
                    None => (
                        record.base.description.clone(),
                        None,
                        UNCATEGORIZED.to_string(),
                    ),
                };

                SaleLine {
                    origin: SaleOrigin::Local,
                    order_no: record.order_no.clone(),
                    date: local_date_of(record.sold_at, self.tz_offset_minutes),
                    menu_item_ref: Some(record.menu_item_ref.clone()),
                    external_item_id,
                    item_name,
                    category,
                    quantity: record.quantity,
                    revenue_cents: record.total_revenue_cents(),
                    order_level: false,
                }
            })
            .collect();

        Ok(lines)
    }
}

// ============================================================================
// External (POS) source
// ============================================================================

/// Внешний источник: заказы POS за окно, сопоставленные с локальным
/// меню. Каталог блюд идёт через кэш; заказы всегда свежие.
pub struct PosSalesSource {
    connection: PosConnection,
}

impl PosSalesSource {
    pub fn new(connection: PosConnection) -> Self {
        Self { connection }
    }

    pub fn tz_offset_minutes(&self) -> i32 {
        self.connection.tz_offset_minutes
    }
}

#[async_trait]
impl SalesSource for PosSalesSource {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn load_sales(
        &self,
        tenant_id: &str,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<SaleLine>, AnalyticsError> {
        let tz = self.connection.tz_offset_minutes;
        let window = day_bounds(date_from, date_to, tz)?;

        let client = PosApiClient::new(self.connection.clone());

        let bundle = client.list_orders(window).await?;

        let cache_key = items_cache_key(&self.connection.to_string_id());
        let catalog = ITEMS_CACHE
            .get_or_fetch(&cache_key, items_cache_ttl(), || client.list_items())
            .await?;
        let catalog_by_id: HashMap<&str, &PosItem> =
            catalog.iter().map(|i| (i.id.as_str(), i)).collect();

        // Сопоставление с локальным меню — только поиск: запрос дашборда
        // не мутирует каталог, блюда создаёт синхронизация u501
        let index = a001_menu_item::service::build_index(tenant_id)
            .await
            .map_err(|e| AnalyticsError::SourceUnavailable(format!("local store: {}", e)))?;

        Ok(lines_from_bundle(&bundle, &catalog_by_id, &index, tz))
    }
}

/// Нормализовать заказы POS в строки продаж
fn lines_from_bundle(
    bundle: &PosOrderBundle,
    catalog_by_id: &HashMap<&str, &PosItem>,
    index: &MenuItemIndex,
    tz_offset_minutes: i32,
) -> Vec<SaleLine> {
    let mut lines = Vec::new();
    let mut misses: i64 = 0;

    for order in &bundle.orders {
        let date = local_date_of_millis(order.created_time, tz_offset_minutes);

        if order.line_items.elements.is_empty() {
            // Вырожденный заказ без строк: одна корзина на уровне
            // заказа, чтобы он не исчез из дневного тренда. Атрибуция
            // по блюдам/категориям для него потеряна.
            lines.push(SaleLine {
                origin: SaleOrigin::External,
                order_no: order.id.clone(),
                date,
                menu_item_ref: None,
                external_item_id: None,
                item_name: String::new(),
                category: String::new(),
                quantity: 0,
                revenue_cents: order.total,
                order_level: true,
            });
            continue;
        }

        for line in &order.line_items.elements {
            let external_item_id = line.item.as_ref().map(|i| i.id.clone());
            let catalog_item = external_item_id
                .as_deref()
                .and_then(|id| catalog_by_id.get(id).copied());

            let item_name = line
                .name
                .clone()
                .or_else(|| line.item.as_ref().and_then(|i| i.name.clone()))
                .or_else(|| catalog_item.map(|i| i.name.clone()))
                .unwrap_or_default();

            let category = resolve_category(line.item.as_ref(), catalog_item, &bundle.category_names);

            let (local_item, _outcome) =
                index.resolve(external_item_id.as_deref(), Some(item_name.as_str()));
            if local_item.is_none() {
                misses += 1;
            }

            lines.push(SaleLine {
                origin: SaleOrigin::External,
                order_no: order.id.clone(),
                date,
                menu_item_ref: local_item.map(|i| i.to_string_id()),
                external_item_id,
                item_name,
                category,
                quantity: line.quantity,
                revenue_cents: line_revenue_cents(line.total, line.price, line.quantity),
                order_level: false,
            });
        }
    }

    if misses > 0 {
        tracing::warn!(
            "{} POS sale lines have no local menu item counterpart",
            misses
        );
    }

    lines
}

/// Категория строки: первая категория позиции; имя — инлайн, из карты
/// или из каталога; иначе "Uncategorized"
fn resolve_category(
    item_ref: Option<&crate::shared::pos::models::PosItemRef>,
    catalog_item: Option<&PosItem>,
    category_names: &HashMap<String, String>,
) -> String {
    if let Some(item) = item_ref {
        if let Some(first) = item.categories.elements.first() {
            if let Some(name) = &first.name {
                return name.clone();
            }
            if let Some(name) = category_names.get(&first.id) {
                return name.clone();
            }
        }
    }
    if let Some(item) = catalog_item {
        if let Some(first) = item.categories.elements.first() {
            if let Some(name) = &first.name {
                return name.clone();
            }
            if let Some(name) = category_names.get(&first.id) {
                return name.clone();
            }
        }
    }
    UNCATEGORIZED.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pos::models::{PosCategory, PosElements, PosItemRef, PosLineItem, PosOrder};
    use contracts::domain::a001_menu_item::aggregate::MenuItem;
    use maplit::hashmap;

    fn order(id: &str, total: i64, lines: Vec<PosLineItem>) -> PosOrder {
        PosOrder {
            id: id.to_string(),
            total,
            // 2025-03-10T12:00:00Z
            created_time: 1741608000000,
            state: Some("locked".to_string()),
            payment_state: Some("paid".to_string()),
            line_items: PosElements { elements: lines },
        }
    }

    fn line(ext_id: &str, name: &str, price: i64, total: i64, qty: i64) -> PosLineItem {
        PosLineItem {
            id: format!("L-{}", ext_id),
            name: Some(name.to_string()),
            price,
            total,
            quantity: qty,
            item: Some(PosItemRef {
                id: ext_id.to_string(),
                name: None,
                categories: PosElements {
                    elements: vec![PosCategory {
                        id: "CAT1".to_string(),
                        name: None,
                    }],
                },
            }),
        }
    }

    #[test]
    fn test_lines_from_bundle_resolves_categories_via_map() {
        let bundle = PosOrderBundle {
            orders: vec![order("O1", 500, vec![line("EXT-1", "Борщ", 0, 500, 1)])],
            category_names: hashmap! {"CAT1".to_string() => "Супы".to_string()},
        };
        let index = MenuItemIndex::build(&[]);
        let lines = lines_from_bundle(&bundle, &HashMap::new(), &index, 0);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].category, "Супы");
        assert_eq!(lines[0].revenue_cents, 500);
        assert_eq!(lines[0].date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn test_lines_from_bundle_degenerate_order() {
        let bundle = PosOrderBundle {
            orders: vec![order("O1", 1000, vec![])],
            category_names: HashMap::new(),
        };
        let index = MenuItemIndex::build(&[]);
        let lines = lines_from_bundle(&bundle, &HashMap::new(), &index, 0);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].order_level);
        assert_eq!(lines[0].revenue_cents, 1000);
    }

    #[test]
    fn test_lines_from_bundle_attaches_local_item() {
        let local = MenuItem::new_for_insert(
            "t1".to_string(),
            "Борщ".to_string(),
            "Супы".to_string(),
            45000,
            Some("EXT-1".to_string()),
        );
        let index = MenuItemIndex::build(&[local.clone()]);

        let bundle = PosOrderBundle {
            orders: vec![order("O1", 0, vec![line("EXT-1", "Борщ", 250, 0, 2)])],
            category_names: HashMap::new(),
        };
        let lines = lines_from_bundle(&bundle, &HashMap::new(), &index, 0);

        assert_eq!(lines[0].menu_item_ref, Some(local.to_string_id()));
        // total=0 -> price * quantity
        assert_eq!(lines[0].revenue_cents, 500);
        assert_eq!(lines[0].category, UNCATEGORIZED);
    }
}
