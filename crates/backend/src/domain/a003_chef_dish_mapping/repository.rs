use chrono::Utc;
use contracts::domain::a003_chef_dish_mapping::aggregate::{ChefDishMapping, ChefDishMappingId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_chef_dish_mapping")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub tenant_id: String,
    pub chef_ref: String,
    pub menu_item_ref: String,
    pub external_item_id: Option<String>,
    pub item_name: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ChefDishMapping {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        ChefDishMapping {
            base: BaseAggregate::with_metadata(
                ChefDishMappingId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            tenant_id: m.tenant_id,
            chef_ref: m.chef_ref,
            menu_item_ref: m.menu_item_ref,
            external_item_id: m.external_item_id,
            item_name: m.item_name,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &ChefDishMapping) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        tenant_id: Set(aggregate.tenant_id.clone()),
        chef_ref: Set(aggregate.chef_ref.clone()),
        menu_item_ref: Set(aggregate.menu_item_ref.clone()),
        external_item_id: Set(aggregate.external_item_id.clone()),
        item_name: Set(aggregate.item_name.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_by_tenant(tenant_id: &str) -> anyhow::Result<Vec<ChefDishMapping>> {
    let mappings: Vec<ChefDishMapping> = Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(mappings)
}

pub async fn list_by_chef(tenant_id: &str, chef_ref: &str) -> anyhow::Result<Vec<ChefDishMapping>> {
    let mappings: Vec<ChefDishMapping> = Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::ChefRef.eq(chef_ref))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(mappings)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ChefDishMapping>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

/// Пара (повар, блюдо) уникальна в пределах арендатора
pub async fn find_pair(
    tenant_id: &str,
    chef_ref: &str,
    menu_item_ref: &str,
) -> anyhow::Result<Option<ChefDishMapping>> {
    let result = Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::ChefRef.eq(chef_ref))
        .filter(Column::MenuItemRef.eq(menu_item_ref))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &ChefDishMapping) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &ChefDishMapping) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Деактивация любой из сторон каскадно прячет закрепления
pub async fn soft_delete_by_chef(tenant_id: &str, chef_ref: &str) -> anyhow::Result<u64> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::ChefRef.eq(chef_ref))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}
