use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChefPerformanceRequest {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
}

/// Выработка поваров за период.
///
/// `unmapped_lines` — строки продаж, которые не удалось привязать ни к
/// одному закреплению; они посчитаны и показаны как предупреждение,
/// а не выброшены.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChefPerformanceResponse {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "dateFrom")]
    pub date_from: NaiveDate,
    #[serde(rename = "dateTo")]
    pub date_to: NaiveDate,
    pub source: String,
    #[serde(rename = "sourceDegraded", default)]
    pub source_degraded: bool,
    pub chefs: Vec<ChefPerformance>,
    #[serde(rename = "unmappedLines")]
    pub unmapped_lines: i64,
    #[serde(rename = "unmappedRevenue")]
    pub unmapped_revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChefPerformance {
    #[serde(rename = "chefRef")]
    pub chef_ref: String,
    #[serde(rename = "chefName")]
    pub chef_name: String,
    pub revenue: f64,
    pub units: i64,
    pub items: Vec<ChefItemPerformance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChefItemPerformance {
    #[serde(rename = "itemName")]
    pub item_name: String,
    #[serde(rename = "externalItemId")]
    pub external_item_id: Option<String>,
    pub revenue: f64,
    pub units: i64,
}
