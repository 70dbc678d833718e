use chrono::{DateTime, Utc};
use contracts::domain::a006_sale_record::aggregate::{SaleRecord, SaleRecordId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a006_sale_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub tenant_id: String,
    pub menu_item_ref: String,
    pub order_no: String,
    pub quantity: i64,
    pub item_revenue_cents: i64,
    pub modifier_revenue_cents: i64,
    pub discount_cents: i64,
    pub tax_cents: i64,
    pub total_with_tax_cents: i64,
    pub payment_state: String,
    pub sold_at: chrono::DateTime<chrono::Utc>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SaleRecord {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        SaleRecord {
            base: BaseAggregate::with_metadata(
                SaleRecordId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            tenant_id: m.tenant_id,
            menu_item_ref: m.menu_item_ref,
            order_no: m.order_no,
            quantity: m.quantity,
            item_revenue_cents: m.item_revenue_cents,
            modifier_revenue_cents: m.modifier_revenue_cents,
            discount_cents: m.discount_cents,
            tax_cents: m.tax_cents,
            total_with_tax_cents: m.total_with_tax_cents,
            payment_state: m.payment_state,
            sold_at: m.sold_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &SaleRecord) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        tenant_id: Set(aggregate.tenant_id.clone()),
        menu_item_ref: Set(aggregate.menu_item_ref.clone()),
        order_no: Set(aggregate.order_no.clone()),
        quantity: Set(aggregate.quantity),
        item_revenue_cents: Set(aggregate.item_revenue_cents),
        modifier_revenue_cents: Set(aggregate.modifier_revenue_cents),
        discount_cents: Set(aggregate.discount_cents),
        tax_cents: Set(aggregate.tax_cents),
        total_with_tax_cents: Set(aggregate.total_with_tax_cents),
        payment_state: Set(aggregate.payment_state.clone()),
        sold_at: Set(aggregate.sold_at),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Продажи арендатора в UTC-окне (границы включительно)
pub async fn list_in_range(
    tenant_id: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> anyhow::Result<Vec<SaleRecord>> {
    let records: Vec<SaleRecord> = Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::SoldAt.gte(from))
        .filter(Column::SoldAt.lte(to))
        .order_by_asc(Column::SoldAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(records)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<SaleRecord>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &SaleRecord) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
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
