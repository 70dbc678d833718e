use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitabilityRequest {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
}

/// Прибыльность: продажи минус локальные расходы по категориям.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitabilityResponse {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
    pub source: String,
    #[serde(rename = "sourceDegraded", default)]
    pub source_degraded: bool,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
    #[serde(rename = "totalExpenses")]
    pub total_expenses: f64,
    pub profit: f64,
    pub categories: Vec<CategoryProfit>,
    /// Имя стратегии распределения общего бакета кухни
    #[serde(rename = "allocationStrategy")]
    pub allocation_strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryProfit {
    pub category: String,
    pub revenue: f64,
    /// Расходы, заведённые напрямую на категорию
    #[serde(rename = "directExpenses")]
    pub direct_expenses: f64,
    /// Доля общего бакета кухни, распределённая на категорию
    #[serde(rename = "allocatedExpenses")]
    pub allocated_expenses: f64,
    pub profit: f64,
}
