use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use crate::enums::{DataCategory, SourceName};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataSourceSelectionId(pub Uuid);

impl DataSourceSelectionId {
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

impl AggregateId for DataSourceSelectionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(DataSourceSelectionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Выбор авторитетного источника для (арендатор, категория данных).
///
/// `tenant_id = None` — глобальная строка по умолчанию; строка конкретного
/// арендатора её перекрывает. Меняется только административно, читается
/// при каждом расчёте.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceSelection {
    #[serde(flatten)]
    pub base: BaseAggregate<DataSourceSelectionId>,

    /// None — глобальное значение по умолчанию
    #[serde(rename = "tenantId")]
    pub tenant_id: Option<String>,

    #[serde(rename = "category")]
    pub category: DataCategory,

    #[serde(rename = "source")]
    pub source: SourceName,
}

impl DataSourceSelection {
    pub fn new_for_insert(
        tenant_id: Option<String>,
        category: DataCategory,
        source: SourceName,
    ) -> Self {
        let code = format!("SRC-{}", &Uuid::new_v4().to_string()[..8]);
        let description = match &tenant_id {
            Some(t) => format!("{}: {}", t, category.display_name()),
            None => format!("По умолчанию: {}", category.display_name()),
        };
        Self {
            base: BaseAggregate::new(DataSourceSelectionId::new_v4(), code, description),
            tenant_id,
            category,
            source,
        }
    }

    pub fn is_global(&self) -> bool {
        self.tenant_id.is_none()
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for DataSourceSelection {
    type Id = DataSourceSelectionId;

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
        "a007"
    }

    fn collection_name() -> &'static str {
        "data_source_selection"
    }

    fn element_name() -> &'static str {
        "Источник данных"
    }

    fn list_name() -> &'static str {
        "Источники данных"
    }

    fn origin() -> Origin {
        Origin::Local
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceSelectionDto {
    pub id: Option<String>,
    /// None/пустая строка — глобальная строка
    #[serde(rename = "tenantId")]
    pub tenant_id: Option<String>,
    pub category: String,
    pub source: String,
}
