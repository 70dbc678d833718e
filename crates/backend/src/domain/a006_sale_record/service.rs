use super::repository;
use chrono::{DateTime, Utc};
use contracts::domain::a006_sale_record::aggregate::{SaleRecord, SaleRecordDto};
use uuid::Uuid;

pub async fn create(dto: SaleRecordDto) -> anyhow::Result<Uuid> {
    let mut aggregate = SaleRecord::new_for_insert(
        dto.tenant_id.clone(),
        dto.menu_item_ref.clone(),
        dto.order_no.clone(),
        dto.quantity,
        dto.item_revenue_cents,
        dto.total_with_tax_cents,
        dto.sold_at,
    );
    aggregate.modifier_revenue_cents = dto.modifier_revenue_cents;
    aggregate.discount_cents = dto.discount_cents;
    aggregate.tax_cents = dto.tax_cents;
    if let Some(state) = &dto.payment_state {
        aggregate.payment_state = state.clone();
    }

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<SaleRecord>> {
    repository::get_by_id(id).await
}

pub async fn list_in_range(
    tenant_id: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> anyhow::Result<Vec<SaleRecord>> {
    repository::list_in_range(tenant_id, from, to).await
}
