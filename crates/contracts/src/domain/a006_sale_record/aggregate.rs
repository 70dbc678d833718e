use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleRecordId(pub Uuid);

impl SaleRecordId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for SaleRecordId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SaleRecordId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Строка продажи в локальной базе.
///
/// Хранится только для локального источника: внешние продажи
/// материализуются из POS API на каждый запрос и в базу не попадают.
///
/// Ожидается total_with_tax >= total >= item_revenue - discount, но это
/// свойство данных POS, а не инвариант хранения — validate() его не
/// проверяет.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(flatten)]
    pub base: BaseAggregate<SaleRecordId>,

    #[serde(rename = "tenantId")]
    pub tenant_id: String,

    #[serde(rename = "menuItemRef")]
    pub menu_item_ref: String,

    /// Идентификатор чека/заказа; несколько строк на один заказ
    #[serde(rename = "orderNo")]
    pub order_no: String,

    #[serde(rename = "quantity")]
    pub quantity: i64,

    #[serde(rename = "itemRevenueCents")]
    pub item_revenue_cents: i64,

    #[serde(rename = "modifierRevenueCents", default)]
    pub modifier_revenue_cents: i64,

    #[serde(rename = "discountCents", default)]
    pub discount_cents: i64,

    #[serde(rename = "taxCents", default)]
    pub tax_cents: i64,

    #[serde(rename = "totalWithTaxCents")]
    pub total_with_tax_cents: i64,

    #[serde(rename = "paymentState", default)]
    pub payment_state: String,

    #[serde(rename = "soldAt")]
    pub sold_at: DateTime<Utc>,
}

impl SaleRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        tenant_id: String,
        menu_item_ref: String,
        order_no: String,
        quantity: i64,
        item_revenue_cents: i64,
        total_with_tax_cents: i64,
        sold_at: DateTime<Utc>,
    ) -> Self {
        let code = format!("SALE-{}", &Uuid::new_v4().to_string()[..8]);
        let description = format!("Продажа {}", order_no);
        Self {
            base: BaseAggregate::new(SaleRecordId::new_v4(), code, description),
            tenant_id,
            menu_item_ref,
            order_no,
            quantity,
            item_revenue_cents,
            modifier_revenue_cents: 0,
            discount_cents: 0,
            tax_cents: 0,
            total_with_tax_cents,
            payment_state: "paid".to_string(),
            sold_at,
        }
    }

    /// Выручка строки: item + модификаторы - скидки
    pub fn total_revenue_cents(&self) -> i64 {
        self.item_revenue_cents + self.modifier_revenue_cents - self.discount_cents
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.tenant_id.trim().is_empty() {
            return Err("Не указан арендатор".into());
        }
        if self.menu_item_ref.trim().is_empty() {
            return Err("Не указано блюдо".into());
        }
        if self.order_no.trim().is_empty() {
            return Err("Не указан номер заказа".into());
        }
        if self.quantity <= 0 {
            return Err("Количество должно быть положительным".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for SaleRecord {
    type Id = SaleRecordId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "sale_record"
    }

    fn element_name() -> &'static str {
        "Продажа"
    }

    fn list_name() -> &'static str {
        "Продажи"
    }

    fn origin() -> Origin {
        Origin::Local
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecordDto {
    pub id: Option<String>,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "menuItemRef")]
    pub menu_item_ref: String,
    #[serde(rename = "orderNo")]
    pub order_no: String,
    pub quantity: i64,
    #[serde(rename = "itemRevenueCents")]
    pub item_revenue_cents: i64,
    #[serde(rename = "modifierRevenueCents", default)]
    pub modifier_revenue_cents: i64,
    #[serde(rename = "discountCents", default)]
    pub discount_cents: i64,
    #[serde(rename = "taxCents", default)]
    pub tax_cents: i64,
    #[serde(rename = "totalWithTaxCents")]
    pub total_with_tax_cents: i64,
    #[serde(rename = "paymentState")]
    pub payment_state: Option<String>,
    #[serde(rename = "soldAt")]
    pub sold_at: DateTime<Utc>,
}
