use chrono::Utc;
use contracts::domain::a007_data_source_selection::aggregate::{
    DataSourceSelection, DataSourceSelectionId,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::enums::{DataCategory, SourceName};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a007_data_source_selection")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    /// NULL — глобальная строка по умолчанию
    pub tenant_id: Option<String>,
    pub category: String,
    pub source: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Строки с нераспознанной категорией/источником пропускаются
    /// при загрузке
    fn try_into_aggregate(self) -> Option<DataSourceSelection> {
        let category = DataCategory::from_code(&self.category)?;
        let source = SourceName::from_code(&self.source)?;

        let metadata = EntityMetadata {
            created_at: self.created_at.unwrap_or_else(Utc::now),
            updated_at: self.updated_at.unwrap_or_else(Utc::now),
            is_deleted: self.is_deleted,
            version: self.version,
        };
        let uuid = Uuid::parse_str(&self.id).unwrap_or_else(|_| Uuid::new_v4());

        Some(DataSourceSelection {
            base: BaseAggregate::with_metadata(
                DataSourceSelectionId(uuid),
                self.code,
                self.description,
                self.comment.clone(),
                metadata,
            ),
            tenant_id: self.tenant_id,
            category,
            source,
        })
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &DataSourceSelection) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        tenant_id: Set(aggregate.tenant_id.clone()),
        category: Set(aggregate.category.code().to_string()),
        source: Set(aggregate.source.code().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all() -> anyhow::Result<Vec<DataSourceSelection>> {
    let rows: Vec<DataSourceSelection> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .filter_map(Model::try_into_aggregate)
        .collect();
    Ok(rows)
}

/// Строки, видимые арендатору: его собственные плюс глобальные
pub async fn list_for_tenant(tenant_id: &str) -> anyhow::Result<Vec<DataSourceSelection>> {
    let rows: Vec<DataSourceSelection> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(
            Condition::any()
                .add(Column::TenantId.eq(tenant_id))
                .add(Column::TenantId.is_null()),
        )
        .all(conn())
        .await?
        .into_iter()
        .filter_map(Model::try_into_aggregate)
        .collect();
    Ok(rows)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<DataSourceSelection>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.and_then(Model::try_into_aggregate))
}

/// Существующая строка для пары (арендатор-или-глобально, категория)
pub async fn find_row(
    tenant_id: Option<&str>,
    category: DataCategory,
) -> anyhow::Result<Option<DataSourceSelection>> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::Category.eq(category.code()));
    query = match tenant_id {
        Some(t) => query.filter(Column::TenantId.eq(t)),
        None => query.filter(Column::TenantId.is_null()),
    };
    let result = query.one(conn()).await?;
    Ok(result.and_then(Model::try_into_aggregate))
}

pub async fn insert(aggregate: &DataSourceSelection) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &DataSourceSelection) -> anyhow::Result<()> {
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
