use super::repository;
use contracts::domain::a002_chef::aggregate::{Chef, ChefDto};
use uuid::Uuid;

pub async fn create(dto: ChefDto) -> anyhow::Result<Uuid> {
    // Резервная запись "не назначено" заводится вместе с первым поваром
    ensure_unassigned(&dto.tenant_id).await?;

    let mut aggregate = Chef::new_for_insert(
        dto.tenant_id.clone(),
        dto.name.clone(),
        dto.external_id.clone(),
    );
    aggregate.base.comment = dto.comment.clone();

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: ChefDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    if aggregate.is_unassigned() {
        anyhow::bail!("Зарезервированная запись не редактируется");
    }

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let aggregate = repository::get_by_id(id).await?;
    if let Some(chef) = aggregate {
        if chef.is_unassigned() {
            anyhow::bail!("Зарезервированная запись не удаляется");
        }
    }
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Chef>> {
    repository::get_by_id(id).await
}

pub async fn list_by_tenant(tenant_id: &str) -> anyhow::Result<Vec<Chef>> {
    repository::list_by_tenant(tenant_id).await
}

/// Гарантировать наличие записи "не назначено" для арендатора
pub async fn ensure_unassigned(tenant_id: &str) -> anyhow::Result<Chef> {
    if let Some(existing) = repository::find_unassigned(tenant_id).await? {
        return Ok(existing);
    }
    let mut chef = Chef::new_unassigned(tenant_id.to_string());
    chef.before_write();
    repository::insert(&chef).await?;
    tracing::info!("Created unassigned chef record for tenant {}", tenant_id);
    Ok(chef)
}
