use super::repository;
use crate::shared::pos::client::PosApiClient;
use crate::shared::pos::TestConnectionResult;
use contracts::domain::a004_pos_connection::aggregate::{PosConnection, PosConnectionDto};
use uuid::Uuid;

pub async fn create(dto: PosConnectionDto) -> anyhow::Result<Uuid> {
    let mut aggregate = PosConnection::new_for_insert(
        dto.tenant_id.clone(),
        dto.description.clone(),
        dto.base_url.clone(),
        dto.merchant_id.clone(),
        dto.api_key.clone(),
        dto.tz_offset_minutes.unwrap_or(0),
    );
    aggregate.base.comment = dto.comment.clone();
    aggregate.is_used = dto.is_used.unwrap_or(false);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: PosConnectionDto) -> anyhow::Result<()> {
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<PosConnection>> {
    repository::get_by_id(id).await
}

pub async fn list_by_tenant(tenant_id: &str) -> anyhow::Result<Vec<PosConnection>> {
    repository::list_by_tenant(tenant_id).await
}

/// Активное подключение арендатора; его использует движок агрегации
pub async fn find_used(tenant_id: &str) -> anyhow::Result<Option<PosConnection>> {
    repository::find_used(tenant_id).await
}

/// Проверить подключение одним лёгким запросом к POS
pub async fn test_connection(dto: &PosConnectionDto) -> TestConnectionResult {
    let connection = PosConnection::new_for_insert(
        dto.tenant_id.clone(),
        dto.description.clone(),
        dto.base_url.clone(),
        dto.merchant_id.clone(),
        dto.api_key.clone(),
        dto.tz_offset_minutes.unwrap_or(0),
    );
    if let Err(e) = connection.validate() {
        return TestConnectionResult {
            success: false,
            message: "Некорректные параметры подключения".to_string(),
            details: Some(e),
        };
    }
    PosApiClient::new(connection).test_connection().await
}
