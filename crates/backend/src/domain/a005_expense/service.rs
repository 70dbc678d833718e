use super::repository;
use contracts::domain::a005_expense::aggregate::{Expense, ExpenseDto};
use uuid::Uuid;

pub async fn create(dto: ExpenseDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Expense::new_for_insert(
        dto.tenant_id.clone(),
        dto.description.clone(),
        dto.category.clone(),
        dto.amount_cents,
        dto.date,
    );
    aggregate.base.comment = dto.comment.clone();

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: ExpenseDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Expense>> {
    repository::get_by_id(id).await
}

pub async fn list_by_tenant(tenant_id: &str) -> anyhow::Result<Vec<Expense>> {
    repository::list_by_tenant(tenant_id).await
}
