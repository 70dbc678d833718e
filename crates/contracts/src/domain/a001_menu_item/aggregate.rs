use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuItemId(pub Uuid);

impl MenuItemId {
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

impl AggregateId for MenuItemId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(MenuItemId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Блюдо меню. `description` базового агрегата — это название блюда.
///
/// `external_id` — стабильный идентификатор блюда во внешней POS-системе,
/// уникальный в пределах арендатора. Сопоставление по нему всегда имеет
/// приоритет над сопоставлением по названию.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(flatten)]
    pub base: BaseAggregate<MenuItemId>,

    #[serde(rename = "tenantId")]
    pub tenant_id: String,

    #[serde(rename = "externalId")]
    pub external_id: Option<String>,

    #[serde(rename = "category", default)]
    pub category: String,

    /// Цена в минорных единицах валюты (копейки/центы)
    #[serde(rename = "priceCents", default)]
    pub price_cents: i64,

    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    pub fn new_for_insert(
        tenant_id: String,
        name: String,
        category: String,
        price_cents: i64,
        external_id: Option<String>,
    ) -> Self {
        let code = format!("DISH-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            base: BaseAggregate::new(MenuItemId::new_v4(), code, name),
            tenant_id,
            external_id,
            category,
            price_cents,
            is_active: true,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &MenuItemDto) {
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
        self.category = dto.category.clone().unwrap_or_default();
        if let Some(price) = dto.price_cents {
            self.price_cents = price;
        }
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
        // external_id переустанавливается только синхронизацией с POS
        if dto.external_id.is_some() {
            self.external_id = dto.external_id.clone();
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название блюда не может быть пустым".into());
        }
        if self.tenant_id.trim().is_empty() {
            return Err("Не указан арендатор".into());
        }
        if self.price_cents < 0 {
            return Err("Цена не может быть отрицательной".into());
        }
        if let Some(ext) = &self.external_id {
            if ext.trim().is_empty() {
                return Err("Пустой external_id недопустим — используйте None".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for MenuItem {
    type Id = MenuItemId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "menu_item"
    }

    fn element_name() -> &'static str {
        "Блюдо"
    }

    fn list_name() -> &'static str {
        "Блюда"
    }

    fn origin() -> Origin {
        Origin::Pos
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuItemDto {
    pub id: Option<String>,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub name: String,
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "priceCents")]
    pub price_cents: Option<i64>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    pub comment: Option<String>,
}
