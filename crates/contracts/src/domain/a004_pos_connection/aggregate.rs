use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata, Origin};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PosConnectionId(pub Uuid);

impl PosConnectionId {
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

impl AggregateId for PosConnectionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PosConnectionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Подключение к внешней POS-системе (merchant-scoped REST API,
/// bearer-токен). Используется одно активное подключение на арендатора.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosConnection {
    #[serde(flatten)]
    pub base: BaseAggregate<PosConnectionId>,

    #[serde(rename = "tenantId")]
    pub tenant_id: String,

    #[serde(rename = "baseUrl")]
    pub base_url: String,

    #[serde(rename = "merchantId")]
    pub merchant_id: String,

    #[serde(rename = "apiKey")]
    pub api_key: String,

    /// Смещение бизнес-часового пояса ресторана от UTC в минутах.
    /// Границы суток считаются в этом поясе — иначе дневные срезы
    /// уезжают на соседний день.
    #[serde(rename = "tzOffsetMinutes", default)]
    pub tz_offset_minutes: i32,

    #[serde(rename = "isUsed", default)]
    pub is_used: bool,
}

impl PosConnection {
    pub fn new_for_insert(
        tenant_id: String,
        description: String,
        base_url: String,
        merchant_id: String,
        api_key: String,
        tz_offset_minutes: i32,
    ) -> Self {
        let code = format!("POS-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            base: BaseAggregate::new(PosConnectionId::new_v4(), code, description),
            tenant_id,
            base_url,
            merchant_id,
            api_key,
            tz_offset_minutes,
            is_used: false,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &PosConnectionDto) {
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.base_url = dto.base_url.clone();
        self.merchant_id = dto.merchant_id.clone();
        if !dto.api_key.trim().is_empty() {
            self.api_key = dto.api_key.clone();
        }
        self.tz_offset_minutes = dto.tz_offset_minutes.unwrap_or(0);
        if let Some(is_used) = dto.is_used {
            self.is_used = is_used;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.tenant_id.trim().is_empty() {
            return Err("Не указан арендатор".into());
        }
        if self.base_url.trim().is_empty() {
            return Err("Не указан адрес POS API".into());
        }
        if self.merchant_id.trim().is_empty() {
            return Err("Не указан merchant_id".into());
        }
        // Смещение в пределах UTC-12..UTC+14
        if self.tz_offset_minutes < -720 || self.tz_offset_minutes > 840 {
            return Err("Недопустимое смещение часового пояса".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for PosConnection {
    type Id = PosConnectionId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "pos_connection"
    }

    fn element_name() -> &'static str {
        "Подключение POS"
    }

    fn list_name() -> &'static str {
        "Подключения POS"
    }

    fn origin() -> Origin {
        Origin::Local
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PosConnectionDto {
    pub id: Option<String>,
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub description: String,
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "merchantId")]
    pub merchant_id: String,
    #[serde(rename = "apiKey", default)]
    pub api_key: String,
    #[serde(rename = "tzOffsetMinutes")]
    pub tz_offset_minutes: Option<i32>,
    #[serde(rename = "isUsed")]
    pub is_used: Option<bool>,
    pub comment: Option<String>,
}
