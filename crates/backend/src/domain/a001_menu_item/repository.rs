use chrono::Utc;
use contracts::domain::a001_menu_item::aggregate::{MenuItem, MenuItemId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_menu_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub tenant_id: String,
    pub external_id: Option<String>,
    pub category: String,
    pub price_cents: i64,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MenuItem {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        MenuItem {
            base: BaseAggregate::with_metadata(
                MenuItemId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            tenant_id: m.tenant_id,
            external_id: m.external_id,
            category: m.category,
            price_cents: m.price_cents,
            is_active: m.is_active,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &MenuItem) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        tenant_id: Set(aggregate.tenant_id.clone()),
        external_id: Set(aggregate.external_id.clone()),
        category: Set(aggregate.category.clone()),
        price_cents: Set(aggregate.price_cents),
        is_active: Set(aggregate.is_active),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_by_tenant(tenant_id: &str) -> anyhow::Result<Vec<MenuItem>> {
    let mut items: Vec<MenuItem> = Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        a.base
            .description
            .to_lowercase()
            .cmp(&b.base.description.to_lowercase())
    });
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<MenuItem>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Точный поиск по external_id в пределах арендатора
pub async fn find_by_external_id(
    tenant_id: &str,
    external_id: &str,
) -> anyhow::Result<Option<MenuItem>> {
    let result = Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::ExternalId.eq(external_id))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Поиск по названию без учёта регистра в пределах арендатора.
/// Сравнение с trim — на стороне приложения, как и в остальных выборках.
pub async fn find_by_name_ignore_case(
    tenant_id: &str,
    name: &str,
) -> anyhow::Result<Vec<MenuItem>> {
    let name_lower = name.trim().to_lowercase();

    let all_items: Vec<Model> = Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?;

    let items: Vec<MenuItem> = all_items
        .into_iter()
        .filter(|m| m.description.trim().to_lowercase() == name_lower)
        .map(Into::into)
        .collect();

    Ok(items)
}

pub async fn insert(aggregate: &MenuItem) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &MenuItem) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

/// Блюда не удаляются, пока на них ссылаются продажи — только
/// деактивация
pub async fn deactivate(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsActive, Expr::value(false))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}
