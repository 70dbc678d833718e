use serde::{Deserialize, Serialize};

/// Категория данных, для которой выбирается источник
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataCategory {
    Sales,
    Inventory,
    Expenses,
    StaffMapping,
}

impl DataCategory {
    pub fn code(&self) -> &'static str {
        match self {
            DataCategory::Sales => "sales",
            DataCategory::Inventory => "inventory",
            DataCategory::Expenses => "expenses",
            DataCategory::StaffMapping => "staff-mapping",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DataCategory::Sales => "Продажи",
            DataCategory::Inventory => "Меню и остатки",
            DataCategory::Expenses => "Расходы",
            DataCategory::StaffMapping => "Закрепление блюд",
        }
    }

    /// Расходы и закрепление блюд существуют только в локальной базе:
    /// для них настройка источника игнорируется.
    pub fn is_always_local(&self) -> bool {
        matches!(self, DataCategory::Expenses | DataCategory::StaffMapping)
    }

    pub fn all() -> Vec<DataCategory> {
        vec![
            DataCategory::Sales,
            DataCategory::Inventory,
            DataCategory::Expenses,
            DataCategory::StaffMapping,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "sales" => Some(DataCategory::Sales),
            "inventory" => Some(DataCategory::Inventory),
            "expenses" => Some(DataCategory::Expenses),
            "staff-mapping" => Some(DataCategory::StaffMapping),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
