use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Бизнес-код зарезервированного повара "не назначено".
/// Ровно одна такая запись на арендатора; в отчёты о выработке не попадает.
pub const UNASSIGNED_CHEF_CODE: &str = "CHEF-UNASSIGNED";

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChefId(pub Uuid);

impl ChefId {
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

impl AggregateId for ChefId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ChefId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Повар. `description` базового агрегата — это имя.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chef {
    #[serde(flatten)]
    pub base: BaseAggregate<ChefId>,

    #[serde(rename = "tenantId")]
    pub tenant_id: String,

    /// Идентификатор сотрудника во внешней POS (если заведён там)
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,

    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Chef {
    pub fn new_for_insert(tenant_id: String, name: String, external_id: Option<String>) -> Self {
        let code = format!("CHEF-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            base: BaseAggregate::new(ChefId::new_v4(), code, name),
            tenant_id,
            external_id,
            is_active: true,
        }
    }

    /// Зарезервированная запись "не назначено" для арендатора
    pub fn new_unassigned(tenant_id: String) -> Self {
        Self {
            base: BaseAggregate::new(
                ChefId::new_v4(),
                UNASSIGNED_CHEF_CODE.to_string(),
                "Не назначено".to_string(),
            ),
            tenant_id,
            external_id: None,
            is_active: true,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        self.base.code == UNASSIGNED_CHEF_CODE
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &ChefDto) {
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
        if dto.external_id.is_some() {
            self.external_id = dto.external_id.clone();
        }
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Имя повара не может быть пустым".into());
        }
        if self.tenant_id.trim().is_empty() {
            return Err("Не указан арендатор".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Chef {
    type Id = ChefId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "chef"
    }

    fn element_name() -> &'static str {
        "Повар"
    }

    fn list_name() -> &'static str {
        "Повара"
    }

    fn origin() -> Origin {
        Origin::Local
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChefDto {
    pub id: Option<String>,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub name: String,
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    pub comment: Option<String>,
}
