use chrono::{NaiveDate, Utc};
use contracts::domain::a005_expense::aggregate::{Expense, ExpenseId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, Set, Statement};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_expense")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub tenant_id: String,
    pub category: String,
    pub amount_cents: i64,
    pub date: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Expense {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let date = NaiveDate::parse_from_str(&m.date, "%Y-%m-%d")
            .unwrap_or_else(|_| Utc::now().date_naive());

        Expense {
            base: BaseAggregate::with_metadata(
                ExpenseId(uuid),
                m.code,
                m.description,
                m.comment.clone(),
                metadata,
            ),
            tenant_id: m.tenant_id,
            category: m.category,
            amount_cents: m.amount_cents,
            date,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Expense) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        tenant_id: Set(aggregate.tenant_id.clone()),
        category: Set(aggregate.category.clone()),
        amount_cents: Set(aggregate.amount_cents),
        date: Set(aggregate.date.format("%Y-%m-%d").to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_by_tenant(tenant_id: &str) -> anyhow::Result<Vec<Expense>> {
    let expenses: Vec<Expense> = Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(expenses)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Expense>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Expense) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Expense) -> anyhow::Result<()> {
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

/// Raw aggregation result from SQL query
#[derive(Debug, Clone, FromQueryResult)]
pub struct ExpenseByCategory {
    pub category: String,
    pub total_cents: i64,
}

/// Сумма расходов по бакетам за период (границы включительно)
pub async fn sum_by_category(
    tenant_id: &str,
    date_from: NaiveDate,
    date_to: NaiveDate,
) -> anyhow::Result<Vec<ExpenseByCategory>> {
    let db = conn();

    let sql = r#"
        SELECT
            category,
            COALESCE(SUM(amount_cents), 0) AS total_cents
        FROM a005_expense
        WHERE tenant_id = ?
            AND is_deleted = 0
            AND date >= ? AND date <= ?
        GROUP BY category
        ORDER BY total_cents DESC
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [
            tenant_id.into(),
            date_from.format("%Y-%m-%d").to_string().into(),
            date_to.format("%Y-%m-%d").to_string().into(),
        ],
    );

    let results = ExpenseByCategory::find_by_statement(stmt).all(db).await?;
    Ok(results)
}
