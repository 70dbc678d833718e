use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Общий расходный бакет кухни: не имеет прямого соответствия категории
/// меню и распределяется по категориям пропорционально выручке.
pub const KITCHEN_EXPENSE_BUCKET: &str = "kitchen";

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpenseId(pub Uuid);

impl ExpenseId {
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

impl AggregateId for ExpenseId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ExpenseId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Расход. Всегда хранится локально — во внешней POS расходов нет.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(flatten)]
    pub base: BaseAggregate<ExpenseId>,

    #[serde(rename = "tenantId")]
    pub tenant_id: String,

    /// Расходный бакет: категория меню либо общий бакет "kitchen"
    #[serde(rename = "category")]
    pub category: String,

    #[serde(rename = "amountCents")]
    pub amount_cents: i64,

    #[serde(rename = "date")]
    pub date: NaiveDate,
}

impl Expense {
    pub fn new_for_insert(
        tenant_id: String,
        description: String,
        category: String,
        amount_cents: i64,
        date: NaiveDate,
    ) -> Self {
        let code = format!("EXP-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            base: BaseAggregate::new(ExpenseId::new_v4(), code, description),
            tenant_id,
            category,
            amount_cents,
            date,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &ExpenseDto) {
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.category = dto.category.clone();
        self.amount_cents = dto.amount_cents;
        self.date = dto.date;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.tenant_id.trim().is_empty() {
            return Err("Не указан арендатор".into());
        }
        if self.category.trim().is_empty() {
            return Err("Не указан расходный бакет".into());
        }
        if self.amount_cents < 0 {
            return Err("Сумма расхода не может быть отрицательной".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Expense {
    type Id = ExpenseId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "expense"
    }

    fn element_name() -> &'static str {
        "Расход"
    }

    fn list_name() -> &'static str {
        "Расходы"
    }

    fn origin() -> Origin {
        Origin::Local
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDto {
    pub id: Option<String>,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "amountCents")]
    pub amount_cents: i64,
    pub date: NaiveDate,
    pub comment: Option<String>,
}
