use super::repository;
use crate::domain::{a001_menu_item, a002_chef};
use contracts::domain::a003_chef_dish_mapping::aggregate::{ChefDishMapping, ChefDishMappingDto};
use uuid::Uuid;

/// Создать закрепление блюда за поваром.
///
/// Блюдо ищется по external_id, затем по названию — строго без
/// создания: фантомное блюдо, заведённое импортом закреплений, молча
/// маскировало бы опечатку. Промах — ошибка этой строки, остальные
/// строки импорта продолжают обрабатываться.
pub async fn create(dto: ChefDishMappingDto) -> anyhow::Result<Uuid> {
    let chef_id = Uuid::parse_str(&dto.chef_ref)
        .map_err(|_| anyhow::anyhow!("Invalid chef_ref"))?;
    let chef = a002_chef::repository::get_by_id(chef_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Повар не найден"))?;
    if chef.tenant_id != dto.tenant_id {
        anyhow::bail!("Повар принадлежит другому арендатору");
    }

    // lookup-only: сопоставление не создаёт блюд
    let item = match &dto.menu_item_ref {
        Some(r) => {
            let item_id =
                Uuid::parse_str(r).map_err(|_| anyhow::anyhow!("Invalid menu_item_ref"))?;
            a001_menu_item::repository::get_by_id(item_id).await?
        }
        None => {
            a001_menu_item::service::resolve_only(
                &dto.tenant_id,
                dto.external_item_id.as_deref(),
                dto.item_name.as_deref(),
            )
            .await?
        }
    };
    let item = item.ok_or_else(|| {
        anyhow::anyhow!(
            "Блюдо не найдено (external_id {:?}, название {:?})",
            dto.external_item_id,
            dto.item_name
        )
    })?;
    if item.tenant_id != dto.tenant_id {
        anyhow::bail!("Блюдо принадлежит другому арендатору");
    }

    // Уникальность пары (повар, блюдо)
    if repository::find_pair(&dto.tenant_id, &dto.chef_ref, &item.to_string_id())
        .await?
        .is_some()
    {
        anyhow::bail!("Закрепление уже существует");
    }

    let mut mapping = ChefDishMapping::new_for_insert(
        dto.tenant_id.clone(),
        dto.chef_ref.clone(),
        item.to_string_id(),
        item.external_id.clone(),
        item.base.description.clone(),
    );

    mapping
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    mapping.before_write();

    repository::insert(&mapping).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ChefDishMapping>> {
    repository::get_by_id(id).await
}

pub async fn list_by_tenant(tenant_id: &str) -> anyhow::Result<Vec<ChefDishMapping>> {
    repository::list_by_tenant(tenant_id).await
}

pub async fn list_by_chef(
    tenant_id: &str,
    chef_ref: &str,
) -> anyhow::Result<Vec<ChefDishMapping>> {
    repository::list_by_chef(tenant_id, chef_ref).await
}
