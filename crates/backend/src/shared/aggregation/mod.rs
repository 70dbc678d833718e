//! Ядро агрегации: превращает нормализованные строки продаж любого
//! источника в сводки. Чистые функции без I/O.

pub mod allocation;

use chrono::NaiveDate;
use contracts::domain::a003_chef_dish_mapping::aggregate::ChefDishMapping;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Категория по умолчанию для строк без категории
pub const UNCATEGORIZED: &str = "Uncategorized";
/// Размер рейтинга блюд
pub const TOP_ITEMS_LIMIT: usize = 10;

/// Откуда пришла строка продажи. Для атрибуции поваров внешние строки
/// сопоставляются с закреплениями только по external_id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleOrigin {
    Local,
    External,
}

/// Нормализованная строка продажи — общий вход агрегации для обоих
/// источников.
#[derive(Debug, Clone)]
pub struct SaleLine {
    pub origin: SaleOrigin,
    /// Идентификатор заказа; транзакции считаются по уникальным заказам
    pub order_no: String,
    /// Локальная бизнес-дата продажи
    pub date: NaiveDate,
    pub menu_item_ref: Option<String>,
    pub external_item_id: Option<String>,
    pub item_name: String,
    pub category: String,
    pub quantity: i64,
    pub revenue_cents: i64,
    /// true — вырожденный заказ без строк, свёрнутый в одну корзину
    /// на уровне заказа; участвует в выручке и тренде, но не в
    /// категориях и рейтинге
    pub order_level: bool,
}

/// Правило извлечения выручки строки: ненулевой итог строки, иначе
/// цена * количество.
pub fn line_revenue_cents(total_cents: i64, unit_price_cents: i64, quantity: i64) -> i64 {
    if total_cents != 0 {
        total_cents
    } else {
        unit_price_cents * quantity
    }
}

// ============================================================================
// Sales summary
// ============================================================================

/// Сводка в минорных единицах; в DTO конвертирует сервис дашборда
#[derive(Debug, Clone, Default)]
pub struct SummaryParts {
    pub total_revenue_cents: i64,
    pub transactions: i64,
    /// (категория, выручка, штук) — по убыванию выручки
    pub categories: Vec<(String, i64, i64)>,
    /// (название, external_id, выручка, штук) — топ по выручке,
    /// ничьи в порядке обхода
    pub top_items: Vec<(String, Option<String>, i64, i64)>,
    /// по возрастанию даты
    pub daily_trend: Vec<(NaiveDate, i64)>,
}

/// Построить сводку продаж.
///
/// Фильтр по категории ограничивает и выручку, и транзакции заказами,
/// затронувшими хотя бы одну строку фильтруемой категории; транзакции —
/// всегда уникальные заказы, не строки. Корзины уровня заказа не имеют
/// категории и под фильтр не попадают.
pub fn build_sales_summary(lines: &[SaleLine], category_filter: Option<&str>) -> SummaryParts {
    let selected: Vec<&SaleLine> = match category_filter {
        Some(filter) => lines
            .iter()
            .filter(|l| !l.order_level && l.category == filter)
            .collect(),
        None => lines.iter().collect(),
    };

    let mut total_revenue_cents: i64 = 0;
    let mut order_nos: HashSet<&str> = HashSet::new();
    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    // Порядок первого появления сохраняется, чтобы ничьи в рейтинге
    // разрешались порядком обхода
    let mut category_order: Vec<String> = Vec::new();
    let mut category_acc: HashMap<String, (i64, i64)> = HashMap::new();
    let mut item_order: Vec<String> = Vec::new();
    let mut item_acc: HashMap<String, (String, Option<String>, i64, i64)> = HashMap::new();

    for line in &selected {
        total_revenue_cents += line.revenue_cents;
        order_nos.insert(line.order_no.as_str());
        *daily.entry(line.date).or_insert(0) += line.revenue_cents;

        if line.order_level {
            continue;
        }

        let entry = category_acc.entry(line.category.clone()).or_insert_with(|| {
            category_order.push(line.category.clone());
            (0, 0)
        });
        entry.0 += line.revenue_cents;
        entry.1 += line.quantity;

        let item_key = item_key_of(line);
        let entry = item_acc.entry(item_key.clone()).or_insert_with(|| {
            item_order.push(item_key);
            (
                line.item_name.clone(),
                line.external_item_id.clone(),
                0,
                0,
            )
        });
        entry.2 += line.revenue_cents;
        entry.3 += line.quantity;
    }

    let mut categories: Vec<(String, i64, i64)> = category_order
        .into_iter()
        .map(|c| {
            let (rev, units) = category_acc[&c];
            (c, rev, units)
        })
        .collect();
    // Стабильная сортировка: ничьи остаются в порядке появления
    categories.sort_by(|a, b| b.1.cmp(&a.1));

    let mut top_items: Vec<(String, Option<String>, i64, i64)> = item_order
        .into_iter()
        .map(|k| item_acc[&k].clone())
        .collect();
    top_items.sort_by(|a, b| b.2.cmp(&a.2));
    top_items.truncate(TOP_ITEMS_LIMIT);

    SummaryParts {
        total_revenue_cents,
        transactions: order_nos.len() as i64,
        categories,
        top_items,
        daily_trend: daily.into_iter().collect(),
    }
}

/// Ключ агрегации блюда: локальная ссылка, иначе external_id, иначе имя
fn item_key_of(line: &SaleLine) -> String {
    if let Some(r) = &line.menu_item_ref {
        return format!("ref:{}", r);
    }
    if let Some(e) = &line.external_item_id {
        return format!("ext:{}", e);
    }
    format!("name:{}", line.item_name.to_lowercase())
}

// ============================================================================
// Chef performance
// ============================================================================

/// Индекс закреплений для атрибуции строк поварам
pub struct AssignmentIndex {
    /// external_id блюда -> chef_ref
    by_external: HashMap<String, String>,
    /// локальная ссылка блюда -> chef_ref
    by_item_ref: HashMap<String, String>,
}

impl AssignmentIndex {
    pub fn build(assignments: &[ChefDishMapping]) -> Self {
        let mut by_external = HashMap::new();
        let mut by_item_ref = HashMap::new();
        for mapping in assignments {
            if mapping.base.metadata.is_deleted {
                continue;
            }
            if let Some(ext) = &mapping.external_item_id {
                by_external
                    .entry(ext.clone())
                    .or_insert_with(|| mapping.chef_ref.clone());
            }
            by_item_ref
                .entry(mapping.menu_item_ref.clone())
                .or_insert_with(|| mapping.chef_ref.clone());
        }
        Self {
            by_external,
            by_item_ref,
        }
    }

    /// Найти повара для строки.
    ///
    /// Внешние строки — только по external_id: совпадение названий не
    /// доказывает, что это то же блюдо. Локальные строки — по ссылке
    /// на блюдо, затем по external_id.
    pub fn chef_for(&self, line: &SaleLine) -> Option<&str> {
        match line.origin {
            SaleOrigin::External => line
                .external_item_id
                .as_deref()
                .and_then(|e| self.by_external.get(e))
                .map(|s| s.as_str()),
            SaleOrigin::Local => line
                .menu_item_ref
                .as_deref()
                .and_then(|r| self.by_item_ref.get(r))
                .map(|s| s.as_str())
                .or_else(|| {
                    line.external_item_id
                        .as_deref()
                        .and_then(|e| self.by_external.get(e))
                        .map(|s| s.as_str())
                }),
        }
    }
}

/// Выработка поваров в минорных единицах
#[derive(Debug, Clone, Default)]
pub struct ChefPerformanceParts {
    /// chef_ref -> (выручка, штук, по блюдам: имя -> (external_id, выручка, штук))
    pub per_chef: HashMap<String, ChefAccumulator>,
    /// Строки без закрепления: посчитаны и отданы предупреждением
    pub unmapped_lines: i64,
    pub unmapped_revenue_cents: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ChefAccumulator {
    pub revenue_cents: i64,
    pub units: i64,
    /// В порядке первого появления
    pub items: Vec<ChefItemAccumulator>,
}

#[derive(Debug, Clone)]
pub struct ChefItemAccumulator {
    /// Ключ агрегации (см. item_key_of)
    key: String,
    pub item_name: String,
    pub external_item_id: Option<String>,
    pub revenue_cents: i64,
    pub units: i64,
}

/// Разнести строки продаж по поварам через закрепления.
///
/// Корзины уровня заказа атрибуции не имеют (нет блюда) и считаются
/// в unmapped.
pub fn build_chef_performance(
    lines: &[SaleLine],
    index: &AssignmentIndex,
) -> ChefPerformanceParts {
    let mut parts = ChefPerformanceParts::default();

    for line in lines {
        if line.order_level {
            parts.unmapped_lines += 1;
            parts.unmapped_revenue_cents += line.revenue_cents;
            continue;
        }

        match index.chef_for(line) {
            Some(chef_ref) => {
                let acc = parts.per_chef.entry(chef_ref.to_string()).or_default();
                acc.revenue_cents += line.revenue_cents;
                acc.units += line.quantity;

                let key = item_key_of(line);
                match acc.items.iter_mut().find(|i| i.key == key) {
                    Some(item) => {
                        item.revenue_cents += line.revenue_cents;
                        item.units += line.quantity;
                    }
                    None => acc.items.push(ChefItemAccumulator {
                        key,
                        item_name: line.item_name.clone(),
                        external_item_id: line.external_item_id.clone(),
                        revenue_cents: line.revenue_cents,
                        units: line.quantity,
                    }),
                }
            }
            None => {
                parts.unmapped_lines += 1;
                parts.unmapped_revenue_cents += line.revenue_cents;
            }
        }
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(order: &str, name: &str, category: &str, qty: i64, revenue: i64) -> SaleLine {
        SaleLine {
            origin: SaleOrigin::External,
            order_no: order.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            menu_item_ref: None,
            external_item_id: Some(format!("EXT-{}", name)),
            item_name: name.to_string(),
            category: category.to_string(),
            quantity: qty,
            revenue_cents: revenue,
            order_level: false,
        }
    }

    fn order_bucket(order: &str, revenue: i64) -> SaleLine {
        SaleLine {
            origin: SaleOrigin::External,
            order_no: order.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            menu_item_ref: None,
            external_item_id: None,
            item_name: String::new(),
            category: String::new(),
            quantity: 0,
            revenue_cents: revenue,
            order_level: true,
        }
    }

    #[test]
    fn test_line_revenue_prefers_nonzero_total() {
        assert_eq!(line_revenue_cents(500, 250, 2), 500);
        assert_eq!(line_revenue_cents(0, 250, 2), 500);
        assert_eq!(line_revenue_cents(0, 0, 3), 0);
    }

    #[test]
    fn test_example_scenario_three_orders_same_day() {
        // Заказ 1: строка total=500, qty=1
        // Заказ 2: строка total=0, price=250, qty=2 -> 500
        // Заказ 3: без строк, итог заказа 1000
        let lines = vec![
            line("O1", "Борщ", "Супы", 1, line_revenue_cents(500, 0, 1)),
            line("O2", "Плов", "Горячее", 2, line_revenue_cents(0, 250, 2)),
            order_bucket("O3", 1000),
        ];

        let summary = build_sales_summary(&lines, None);

        // 5.00 + 5.00 + 10.00 = 20.00
        assert_eq!(summary.total_revenue_cents, 2000);
        assert_eq!(summary.transactions, 3);
        // Третий заказ есть в тренде...
        assert_eq!(summary.daily_trend.len(), 1);
        assert_eq!(summary.daily_trend[0].1, 2000);
        // ...но не в категориях и не в рейтинге
        let category_names: Vec<&str> =
            summary.categories.iter().map(|c| c.0.as_str()).collect();
        assert_eq!(category_names.len(), 2);
        assert!(!category_names.contains(&""));
        assert_eq!(summary.top_items.len(), 2);
    }

    #[test]
    fn test_transactions_count_distinct_orders() {
        let lines = vec![
            line("O1", "Борщ", "Супы", 1, 500),
            line("O1", "Плов", "Горячее", 1, 700),
            line("O1", "Чай", "Напитки", 2, 200),
            line("O2", "Борщ", "Супы", 1, 500),
        ];
        let summary = build_sales_summary(&lines, None);
        assert_eq!(summary.transactions, 2);
        assert!(summary.transactions <= lines.len() as i64);
    }

    #[test]
    fn test_category_filter_restricts_revenue_and_transactions() {
        let lines = vec![
            line("O1", "Борщ", "Супы", 1, 500),
            line("O1", "Чай", "Напитки", 1, 100),
            line("O2", "Чай", "Напитки", 2, 200),
            order_bucket("O3", 1000),
        ];
        let summary = build_sales_summary(&lines, Some("Напитки"));

        // Только строки "Напитки": 100 + 200
        assert_eq!(summary.total_revenue_cents, 300);
        // O1 и O2 затронули категорию; O3 без строк не попадает
        assert_eq!(summary.transactions, 2);
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].0, "Напитки");
        assert_eq!(summary.categories[0].1, 300);
        assert_eq!(summary.categories[0].2, 3);
    }

    #[test]
    fn test_top_items_limited_and_sorted() {
        let mut lines = Vec::new();
        for i in 0..15i64 {
            lines.push(line(
                &format!("O{}", i),
                &format!("Блюдо{}", i),
                "Горячее",
                1,
                100 * (i + 1),
            ));
        }
        let summary = build_sales_summary(&lines, None);
        assert_eq!(summary.top_items.len(), TOP_ITEMS_LIMIT);
        // Самое дорогое первым
        assert_eq!(summary.top_items[0].2, 1500);
        // Отсортировано по убыванию
        for pair in summary.top_items.windows(2) {
            assert!(pair[0].2 >= pair[1].2);
        }
    }

    #[test]
    fn test_top_items_ties_keep_iteration_order() {
        let lines = vec![
            line("O1", "Первый", "Горячее", 1, 500),
            line("O2", "Второй", "Горячее", 1, 500),
        ];
        let summary = build_sales_summary(&lines, None);
        assert_eq!(summary.top_items[0].0, "Первый");
        assert_eq!(summary.top_items[1].0, "Второй");
    }

    #[test]
    fn test_uncategorized_lines_grouped() {
        let lines = vec![
            line("O1", "Борщ", UNCATEGORIZED, 1, 500),
            line("O2", "Хлеб", UNCATEGORIZED, 1, 50),
        ];
        let summary = build_sales_summary(&lines, None);
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.categories[0].0, UNCATEGORIZED);
        assert_eq!(summary.categories[0].1, 550);
    }

    // ------------------------------------------------------------------
    // Атрибуция поваров
    // ------------------------------------------------------------------

    fn mapping(tenant: &str, chef: &str, item_ref: &str, ext: Option<&str>) -> ChefDishMapping {
        ChefDishMapping::new_for_insert(
            tenant.to_string(),
            chef.to_string(),
            item_ref.to_string(),
            ext.map(|s| s.to_string()),
            "Блюдо".to_string(),
        )
    }

    #[test]
    fn test_external_line_attributed_only_via_external_id() {
        let assignments = vec![mapping("t1", "chef-1", "item-1", Some("EXT-Борщ"))];
        let index = AssignmentIndex::build(&assignments);

        let mapped = line("O1", "Борщ", "Супы", 1, 500);
        let mut unmapped = line("O2", "Борщ", "Супы", 1, 700);
        // То же название, другой external_id — атрибуции быть не должно
        unmapped.external_item_id = Some("EXT-ДРУГОЙ".to_string());

        let parts = build_chef_performance(&[mapped, unmapped], &index);

        assert_eq!(parts.per_chef.len(), 1);
        let chef = &parts.per_chef["chef-1"];
        assert_eq!(chef.revenue_cents, 500);
        assert_eq!(parts.unmapped_lines, 1);
        assert_eq!(parts.unmapped_revenue_cents, 700);
    }

    #[test]
    fn test_local_line_attributed_via_item_ref() {
        let assignments = vec![mapping("t1", "chef-1", "item-1", None)];
        let index = AssignmentIndex::build(&assignments);

        let mut local = line("O1", "Плов", "Горячее", 2, 900);
        local.origin = SaleOrigin::Local;
        local.menu_item_ref = Some("item-1".to_string());
        local.external_item_id = None;

        let parts = build_chef_performance(&[local], &index);
        assert_eq!(parts.per_chef["chef-1"].units, 2);
        assert_eq!(parts.unmapped_lines, 0);
    }

    #[test]
    fn test_order_level_bucket_counts_as_unmapped() {
        let index = AssignmentIndex::build(&[]);
        let parts = build_chef_performance(&[order_bucket("O1", 1000)], &index);
        assert!(parts.per_chef.is_empty());
        assert_eq!(parts.unmapped_lines, 1);
        assert_eq!(parts.unmapped_revenue_cents, 1000);
    }

    #[test]
    fn test_chef_items_nested_breakdown() {
        let assignments = vec![
            mapping("t1", "chef-1", "item-1", Some("EXT-Борщ")),
            mapping("t1", "chef-1", "item-2", Some("EXT-Плов")),
        ];
        let index = AssignmentIndex::build(&assignments);

        let lines = vec![
            line("O1", "Борщ", "Супы", 1, 500),
            line("O2", "Борщ", "Супы", 1, 500),
            line("O2", "Плов", "Горячее", 1, 700),
        ];
        let parts = build_chef_performance(&lines, &index);
        let chef = &parts.per_chef["chef-1"];
        assert_eq!(chef.revenue_cents, 1700);
        assert_eq!(chef.units, 3);
        assert_eq!(chef.items.len(), 2);
        assert_eq!(chef.items[0].item_name, "Борщ");
        assert_eq!(chef.items[0].revenue_cents, 1000);
    }
}
