use contracts::domain::a001_menu_item::aggregate::MenuItem;
use std::collections::HashMap;

/// Индекс локального меню для сопоставления внешних записей.
///
/// Имена ненадёжны: одно и то же блюдо в разных сезонах/у разных
/// арендаторов живёт под разными external_id. Поэтому порядок поиска
/// строгий: (1) точное совпадение external_id, (2) точное совпадение
/// названия без учёта регистра, (3) промах.
pub struct MenuItemIndex {
    by_external_id: HashMap<String, MenuItem>,
    by_name_lower: HashMap<String, MenuItem>,
}

/// Результат сопоставления одной внешней записи
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconOutcome {
    /// Найдено по external_id
    MatchedByExternalId,
    /// Найдено по названию (external_id ещё не закреплён локально)
    MatchedByName,
    /// Локального двойника нет
    Miss,
}

impl MenuItemIndex {
    /// Построить индекс по списку блюд арендатора.
    ///
    /// При дублировании названия выигрывает первое блюдо — это стабильно
    /// относительно порядка выборки и не маскирует дубликаты (их видно
    /// по промахам external_id).
    pub fn build(items: &[MenuItem]) -> Self {
        let mut by_external_id = HashMap::new();
        let mut by_name_lower = HashMap::new();

        for item in items {
            if item.base.metadata.is_deleted {
                continue;
            }
            if let Some(ext) = &item.external_id {
                by_external_id
                    .entry(ext.clone())
                    .or_insert_with(|| item.clone());
            }
            by_name_lower
                .entry(item.base.description.trim().to_lowercase())
                .or_insert_with(|| item.clone());
        }

        Self {
            by_external_id,
            by_name_lower,
        }
    }

    /// Сопоставить внешнюю запись с локальным блюдом (только поиск,
    /// без создания)
    pub fn resolve(
        &self,
        external_id: Option<&str>,
        name: Option<&str>,
    ) -> (Option<&MenuItem>, ReconOutcome) {
        if let Some(ext) = external_id {
            if let Some(item) = self.by_external_id.get(ext) {
                return (Some(item), ReconOutcome::MatchedByExternalId);
            }
        }
        if let Some(name) = name {
            let key = name.trim().to_lowercase();
            if !key.is_empty() {
                if let Some(item) = self.by_name_lower.get(&key) {
                    return (Some(item), ReconOutcome::MatchedByName);
                }
            }
        }
        (None, ReconOutcome::Miss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(tenant: &str, name: &str, ext: Option<&str>) -> MenuItem {
        MenuItem::new_for_insert(
            tenant.to_string(),
            name.to_string(),
            "Супы".to_string(),
            45000,
            ext.map(|s| s.to_string()),
        )
    }

    #[test]
    fn test_external_id_match_wins_over_name() {
        // Два блюда с одинаковым названием и разными external_id
        let a = dish("t1", "Борщ", Some("EXT-A"));
        let b = dish("t1", "Борщ", Some("EXT-B"));
        let index = MenuItemIndex::build(&[a.clone(), b.clone()]);

        let (found, outcome) = index.resolve(Some("EXT-B"), Some("Борщ"));
        assert_eq!(outcome, ReconOutcome::MatchedByExternalId);
        // Строка с EXT-B никогда не должна попасть на блюдо EXT-A
        assert_eq!(found.unwrap().base.id, b.base.id);

        let (found, _) = index.resolve(Some("EXT-A"), Some("Борщ"));
        assert_eq!(found.unwrap().base.id, a.base.id);
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let a = dish("t1", "Плов", None);
        let index = MenuItemIndex::build(&[a.clone()]);

        let (found, outcome) = index.resolve(Some("UNKNOWN"), Some("  плов "));
        assert_eq!(outcome, ReconOutcome::MatchedByName);
        assert_eq!(found.unwrap().base.id, a.base.id);
    }

    #[test]
    fn test_miss_when_nothing_matches() {
        let index = MenuItemIndex::build(&[dish("t1", "Плов", Some("EXT-1"))]);
        let (found, outcome) = index.resolve(Some("EXT-2"), Some("Шашлык"));
        assert!(found.is_none());
        assert_eq!(outcome, ReconOutcome::Miss);
    }

    #[test]
    fn test_deleted_items_are_not_indexed() {
        let mut a = dish("t1", "Борщ", Some("EXT-A"));
        a.base.metadata.is_deleted = true;
        let index = MenuItemIndex::build(&[a]);
        let (found, outcome) = index.resolve(Some("EXT-A"), Some("Борщ"));
        assert!(found.is_none());
        assert_eq!(outcome, ReconOutcome::Miss);
    }
}
