use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Запрос сводки продаж за период (границы включительно, в бизнес-поясе
/// арендатора)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesSummaryRequest {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
    /// Необязательный фильтр по категории меню
    #[serde(rename = "category", default)]
    pub category: Option<String>,
}

/// Сводка продаж. Денежные значения — в основных единицах валюты
/// (минорные единицы источника уже поделены на 100).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesSummaryResponse {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
    /// Источник, выбранный резолвером для этого вызова
    pub source: String,
    /// true — внешний источник был недоступен и сводка деградирована до нулей
    #[serde(rename = "sourceDegraded", default)]
    pub source_degraded: bool,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    /// Число уникальных заказов (не строк)
    pub transactions: i64,
    pub categories: Vec<CategorySales>,
    #[serde(rename = "topItems")]
    pub top_items: Vec<TopItem>,
    #[serde(rename = "dailyTrend")]
    pub daily_trend: Vec<DailyRevenue>,
}

impl SalesSummaryResponse {
    /// Пустая сводка: внешний источник недоступен либо данных нет
    pub fn empty(req: &SalesSummaryRequest, source: String, degraded: bool) -> Self {
        Self {
            tenant_id: req.tenant_id.clone(),
            date_from: req.date_from,
            date_to: req.date_to,
            source,
            source_degraded: degraded,
            total_revenue: 0.0,
            transactions: 0,
            categories: Vec::new(),
            top_items: Vec::new(),
            daily_trend: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub revenue: f64,
    pub units: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    #[serde(rename = "externalItemId")]
    pub external_item_id: Option<String>,
    pub revenue: f64,
    pub units: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}
