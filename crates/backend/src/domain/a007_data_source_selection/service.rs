use super::repository;
use contracts::domain::a007_data_source_selection::aggregate::{
    DataSourceSelection, DataSourceSelectionDto,
};
use contracts::enums::{DataCategory, SourceName};
use uuid::Uuid;

/// Зашитый дефолт для продаж и меню — внешняя POS
const HARD_DEFAULT: SourceName = SourceName::External;

/// Выбрать авторитетный источник для (арендатор, категория).
///
/// Порядок: строка арендатора -> глобальная строка -> зашитый дефолт.
/// Ошибки здесь нет намеренно: отсутствие настройки — молчаливый
/// дефолт, конфигурировать систему заранее не обязательно.
pub async fn resolve(tenant_id: &str, category: DataCategory) -> anyhow::Result<SourceName> {
    // Расходы и закрепления живут только локально; настройка
    // игнорируется, даже если кто-то завёл строку
    if category.is_always_local() {
        return Ok(SourceName::Local);
    }

    let rows = repository::list_for_tenant(tenant_id).await?;
    Ok(resolve_from_rows(&rows, tenant_id, category))
}

/// Чистое разрешение по уже загруженным строкам
pub fn resolve_from_rows(
    rows: &[DataSourceSelection],
    tenant_id: &str,
    category: DataCategory,
) -> SourceName {
    if category.is_always_local() {
        return SourceName::Local;
    }

    // (1) строка арендатора
    if let Some(row) = rows
        .iter()
        .find(|r| r.tenant_id.as_deref() == Some(tenant_id) && r.category == category)
    {
        return row.source;
    }

    // (2) глобальная строка
    if let Some(row) = rows
        .iter()
        .find(|r| r.tenant_id.is_none() && r.category == category)
    {
        return row.source;
    }

    // (3) зашитый дефолт
    HARD_DEFAULT
}

/// Административное переключение источника: upsert строки
/// (арендатор-или-глобально, категория)
pub async fn set_source(dto: DataSourceSelectionDto) -> anyhow::Result<Uuid> {
    let category = DataCategory::from_code(&dto.category)
        .ok_or_else(|| anyhow::anyhow!("Неизвестная категория данных: {}", dto.category))?;
    let source = SourceName::from_code(&dto.source)
        .ok_or_else(|| anyhow::anyhow!("Неизвестный источник: {}", dto.source))?;

    // Пустая строка означает глобальную запись
    let tenant_id = dto.tenant_id.filter(|t| !t.trim().is_empty());

    if category.is_always_local() && source != SourceName::Local {
        tracing::warn!(
            "Source override for {} is ignored at resolve time: category is always local",
            category
        );
    }

    match repository::find_row(tenant_id.as_deref(), category).await? {
        Some(mut existing) => {
            existing.source = source;
            existing.before_write();
            repository::update(&existing).await?;
            Ok(existing.base.id.value())
        }
        None => {
            let mut row = DataSourceSelection::new_for_insert(tenant_id, category, source);
            row.before_write();
            repository::insert(&row).await
        }
    }
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<DataSourceSelection>> {
    repository::list_all().await
}

pub async fn list_for_tenant(tenant_id: &str) -> anyhow::Result<Vec<DataSourceSelection>> {
    repository::list_for_tenant(tenant_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(tenant: Option<&str>, category: DataCategory, source: SourceName) -> DataSourceSelection {
        DataSourceSelection::new_for_insert(tenant.map(|s| s.to_string()), category, source)
    }

    #[test]
    fn test_hard_default_is_external() {
        assert_eq!(
            resolve_from_rows(&[], "t1", DataCategory::Sales),
            SourceName::External
        );
        assert_eq!(
            resolve_from_rows(&[], "t1", DataCategory::Inventory),
            SourceName::External
        );
    }

    #[test]
    fn test_global_row_overrides_hard_default() {
        let rows = vec![row(None, DataCategory::Sales, SourceName::Local)];
        assert_eq!(
            resolve_from_rows(&rows, "t1", DataCategory::Sales),
            SourceName::Local
        );
    }

    #[test]
    fn test_tenant_row_overrides_global() {
        let rows = vec![
            row(None, DataCategory::Sales, SourceName::Local),
            row(Some("t1"), DataCategory::Sales, SourceName::External),
        ];
        assert_eq!(
            resolve_from_rows(&rows, "t1", DataCategory::Sales),
            SourceName::External
        );
        // Другой арендатор видит только глобальную строку
        assert_eq!(
            resolve_from_rows(&rows, "t2", DataCategory::Sales),
            SourceName::Local
        );
    }

    #[test]
    fn test_expenses_and_staff_mapping_always_local() {
        // Даже с явной строкой "external" эти категории остаются
        // локальными
        let rows = vec![
            row(Some("t1"), DataCategory::Expenses, SourceName::External),
            row(None, DataCategory::StaffMapping, SourceName::External),
        ];
        assert_eq!(
            resolve_from_rows(&rows, "t1", DataCategory::Expenses),
            SourceName::Local
        );
        assert_eq!(
            resolve_from_rows(&rows, "t1", DataCategory::StaffMapping),
            SourceName::Local
        );
    }

    #[test]
    fn test_category_rows_do_not_cross() {
        let rows = vec![row(Some("t1"), DataCategory::Inventory, SourceName::Local)];
        // Настройка inventory не влияет на sales
        assert_eq!(
            resolve_from_rows(&rows, "t1", DataCategory::Sales),
            SourceName::External
        );
    }
}
