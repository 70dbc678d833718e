use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChefDishMappingId(pub Uuid);

impl ChefDishMappingId {
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

impl AggregateId for ChefDishMappingId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ChefDishMappingId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Закрепление блюда за поваром (many-to-many, уникально по паре
/// повар+блюдо в пределах арендатора).
///
/// Денормализованные `external_item_id` и `item_name` сохраняются на момент
/// закрепления: атрибуция выработки по внешним продажам идёт через
/// `external_item_id`, и связь переживает пересоздание локального блюда.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChefDishMapping {
    #[serde(flatten)]
    pub base: BaseAggregate<ChefDishMappingId>,

    #[serde(rename = "tenantId")]
    pub tenant_id: String,

    #[serde(rename = "chefRef")]
    pub chef_ref: String,

    #[serde(rename = "menuItemRef")]
    pub menu_item_ref: String,

    /// Копия external_id блюда на момент закрепления
    #[serde(rename = "externalItemId")]
    pub external_item_id: Option<String>,

    /// Копия названия блюда на момент закрепления
    #[serde(rename = "itemName", default)]
    pub item_name: String,
}

impl ChefDishMapping {
    pub fn new_for_insert(
        tenant_id: String,
        chef_ref: String,
        menu_item_ref: String,
        external_item_id: Option<String>,
        item_name: String,
    ) -> Self {
        let code = format!("MAP-{}", &Uuid::new_v4().to_string()[..8]);
        let description = item_name.clone();
        Self {
            base: BaseAggregate::new(ChefDishMappingId::new_v4(), code, description),
            tenant_id,
            chef_ref,
            menu_item_ref,
            external_item_id,
            item_name,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.tenant_id.trim().is_empty() {
            return Err("Не указан арендатор".into());
        }
        if self.chef_ref.trim().is_empty() {
            return Err("Не указан повар".into());
        }
        if self.menu_item_ref.trim().is_empty() {
            return Err("Не указано блюдо".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for ChefDishMapping {
    type Id = ChefDishMappingId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "chef_dish_mapping"
    }

    fn element_name() -> &'static str {
        "Закрепление блюда"
    }

    fn list_name() -> &'static str {
        "Закрепления блюд"
    }

    fn origin() -> Origin {
        Origin::Local
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChefDishMappingDto {
    pub id: Option<String>,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "chefRef")]
    pub chef_ref: String,
    /// Внешний идентификатор блюда; блюдо ищется по нему, затем по названию.
    /// Создание блюда при импорте закреплений запрещено.
    #[serde(rename = "externalItemId")]
    pub external_item_id: Option<String>,
    #[serde(rename = "itemName")]
    pub item_name: Option<String>,
    #[serde(rename = "menuItemRef")]
    pub menu_item_ref: Option<String>,
}
