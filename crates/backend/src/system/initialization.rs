use crate::domain::a007_data_source_selection::{repository, service};
use contracts::domain::a007_data_source_selection::aggregate::DataSourceSelection;
use contracts::enums::{DataCategory, SourceName};

/// Посеять глобальные строки выбора источника.
///
/// Резолвер и без них вернёт зашитый дефолт, но явные строки видны
/// администратору и переключаются без догадок о текущем состоянии.
pub async fn ensure_default_source_rows() -> anyhow::Result<()> {
    for category in [DataCategory::Sales, DataCategory::Inventory] {
        if repository::find_row(None, category).await?.is_none() {
            let mut row =
                DataSourceSelection::new_for_insert(None, category, SourceName::External);
            row.before_write();
            repository::insert(&row).await?;
            tracing::info!(
                "Seeded global data source row: {} -> {}",
                category,
                SourceName::External
            );
        }
    }
    Ok(())
}

/// Проверка согласованности настроек при старте (диагностика)
pub async fn log_source_configuration() -> anyhow::Result<()> {
    let rows = service::list_all().await?;
    for row in &rows {
        tracing::info!(
            "Data source selection: tenant={:?} {} -> {}",
            row.tenant_id,
            row.category,
            row.source
        );
    }
    Ok(())
}
