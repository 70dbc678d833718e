use super::repository;
use crate::shared::recon::MenuItemIndex;
use contracts::domain::a001_menu_item::aggregate::{MenuItem, MenuItemDto};
use uuid::Uuid;

pub async fn create(dto: MenuItemDto) -> anyhow::Result<Uuid> {
    let mut aggregate = MenuItem::new_for_insert(
        dto.tenant_id.clone(),
        dto.name.clone(),
        dto.category.clone().unwrap_or_default(),
        dto.price_cents.unwrap_or(0),
        dto.external_id.clone(),
    );
    aggregate.base.comment = dto.comment.clone();

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: MenuItemDto) -> anyhow::Result<()> {
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

pub async fn deactivate(id: Uuid) -> anyhow::Result<bool> {
    repository::deactivate(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<MenuItem>> {
    repository::get_by_id(id).await
}

pub async fn list_by_tenant(tenant_id: &str) -> anyhow::Result<Vec<MenuItem>> {
    repository::list_by_tenant(tenant_id).await
}

/// Построить индекс меню арендатора для сопоставления
pub async fn build_index(tenant_id: &str) -> anyhow::Result<MenuItemIndex> {
    let items = repository::list_by_tenant(tenant_id).await?;
    tracing::debug!(
        "Built menu item index for tenant {}: {} items",
        tenant_id,
        items.len()
    );
    Ok(MenuItemIndex::build(&items))
}

/// Сопоставить внешнюю запись с блюдом без создания.
///
/// Для импорта закреплений: создание фантомных блюд здесь запрещено —
/// оно молча прятало бы опечатки во входных данных.
pub async fn resolve_only(
    tenant_id: &str,
    external_id: Option<&str>,
    name: Option<&str>,
) -> anyhow::Result<Option<MenuItem>> {
    if let Some(ext) = external_id {
        if let Some(item) = repository::find_by_external_id(tenant_id, ext).await? {
            return Ok(Some(item));
        }
    }
    if let Some(name) = name {
        let matches = repository::find_by_name_ignore_case(tenant_id, name).await?;
        if let Some(item) = matches.into_iter().next() {
            return Ok(Some(item));
        }
    }
    Ok(None)
}

/// Сопоставить позицию POS с блюдом, создав его при первом появлении.
///
/// Для синхронизации меню: повторная синхронизация обновляет запись
/// по external_id на месте, не плодя дубликатов.
pub async fn resolve_or_create(
    tenant_id: &str,
    external_id: &str,
    name: &str,
    category: &str,
    price_cents: i64,
) -> anyhow::Result<(MenuItem, SyncAction)> {
    // (1) точное совпадение external_id
    if let Some(mut item) = repository::find_by_external_id(tenant_id, external_id).await? {
        let changed = item.base.description != name
            || item.category != category
            || item.price_cents != price_cents;
        if !changed {
            return Ok((item, SyncAction::Unchanged));
        }
        item.base.description = name.to_string();
        item.category = category.to_string();
        item.price_cents = price_cents;
        item.before_write();
        repository::update(&item).await?;
        return Ok((item, SyncAction::Updated));
    }

    // (2) блюдо заведено вручную без external_id — закрепить идентификатор
    let by_name = repository::find_by_name_ignore_case(tenant_id, name).await?;
    if let Some(mut item) = by_name.into_iter().find(|i| i.external_id.is_none()) {
        item.external_id = Some(external_id.to_string());
        item.category = category.to_string();
        item.price_cents = price_cents;
        item.before_write();
        repository::update(&item).await?;
        return Ok((item, SyncAction::Updated));
    }

    // (3) первое появление
    let mut item = MenuItem::new_for_insert(
        tenant_id.to_string(),
        name.to_string(),
        category.to_string(),
        price_cents,
        Some(external_id.to_string()),
    );
    item.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    item.before_write();
    repository::insert(&item).await?;
    Ok((item, SyncAction::Created))
}

/// Что сделала синхронизация с позицией
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Created,
    Updated,
    Unchanged,
}
