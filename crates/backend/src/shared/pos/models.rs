use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Wire-структуры POS API. Все списки приходят в обёртке {"elements": [...]}.
// Денежные поля — целые минорные единицы (центы/копейки).
// ============================================================================

/// Обёртка списочного ответа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosElements<T> {
    #[serde(default = "Vec::new")]
    pub elements: Vec<T>,
}

impl<T> Default for PosElements<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

/// Позиция каталога (блюдо) во внешней POS
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosItem {
    pub id: String,
    pub name: String,
    /// Цена в минорных единицах
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub categories: PosElements<PosCategory>,
}

/// Категория. В ссылках внутри заказов имя может отсутствовать —
/// тогда клиент докладывает карту id -> имя отдельным запросом.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosCategory {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Заказ (чек) с вложенными строками
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosOrder {
    pub id: String,
    /// Итог заказа в минорных единицах
    #[serde(default)]
    pub total: i64,
    /// Момент создания, epoch milliseconds
    #[serde(rename = "createdTime", default)]
    pub created_time: i64,
    #[serde(default)]
    pub state: Option<String>,
    /// Состояние оплаты ("paid" / "open" / ...)
    #[serde(rename = "paymentState", default)]
    pub payment_state: Option<String>,
    #[serde(rename = "lineItems", default)]
    pub line_items: PosElements<PosLineItem>,
}

/// Строка заказа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosLineItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Цена единицы в минорных единицах
    #[serde(default)]
    pub price: i64,
    /// Итог строки; 0 или отсутствие — считать как price * quantity
    #[serde(default)]
    pub total: i64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    /// Ссылка на позицию каталога
    #[serde(default)]
    pub item: Option<PosItemRef>,
}

fn default_quantity() -> i64 {
    1
}

/// Ссылка на позицию каталога внутри строки заказа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosItemRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories: PosElements<PosCategory>,
}

/// Заказы за окно плюс карта категорий id -> имя.
///
/// Агрегация ключуется по именам категорий; если имена не пришли
/// инлайном, клиент докладывает карту до возврата результата.
#[derive(Debug, Clone)]
pub struct PosOrderBundle {
    pub orders: Vec<PosOrder>,
    pub category_names: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_page() {
        let body = r#"{
            "elements": [
                {
                    "id": "ITM1",
                    "name": "Борщ",
                    "price": 45000,
                    "categories": {"elements": [{"id": "CAT1", "name": "Супы"}]}
                },
                {"id": "ITM2", "name": "Хлеб"}
            ]
        }"#;
        let page: PosElements<PosItem> = serde_json::from_str(body).unwrap();
        assert_eq!(page.elements.len(), 2);
        assert_eq!(page.elements[0].price, 45000);
        assert_eq!(
            page.elements[0].categories.elements[0].name.as_deref(),
            Some("Супы")
        );
        // Отсутствующие поля — дефолты
        assert_eq!(page.elements[1].price, 0);
        assert!(page.elements[1].categories.elements.is_empty());
    }

    #[test]
    fn test_parse_order_with_line_items() {
        let body = r#"{
            "id": "ORD1",
            "total": 1000,
            "createdTime": 1741564800000,
            "state": "locked",
            "lineItems": {
                "elements": [
                    {
                        "id": "L1",
                        "name": "Плов",
                        "price": 250,
                        "total": 500,
                        "quantity": 2,
                        "item": {"id": "ITM9", "categories": {"elements": [{"id": "CAT2"}]}}
                    }
                ]
            }
        }"#;
        let order: PosOrder = serde_json::from_str(body).unwrap();
        assert_eq!(order.line_items.elements.len(), 1);
        let line = &order.line_items.elements[0];
        assert_eq!(line.total, 500);
        assert_eq!(line.quantity, 2);
        // Категория пришла ссылкой без имени
        let item = line.item.as_ref().unwrap();
        assert_eq!(item.categories.elements[0].id, "CAT2");
        assert!(item.categories.elements[0].name.is_none());
    }

    #[test]
    fn test_parse_degenerate_order_without_lines() {
        let body = r#"{"id": "ORD2", "total": 1500, "createdTime": 1741564800000}"#;
        let order: PosOrder = serde_json::from_str(body).unwrap();
        assert!(order.line_items.elements.is_empty());
        assert_eq!(order.total, 1500);
    }

    #[test]
    fn test_line_item_quantity_defaults_to_one() {
        let body = r#"{"id": "L1", "price": 300}"#;
        let line: PosLineItem = serde_json::from_str(body).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.total, 0);
    }
}
