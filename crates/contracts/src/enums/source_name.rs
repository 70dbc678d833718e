use serde::{Deserialize, Serialize};

/// Авторитетный источник данных для категории
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceName {
    /// Внешняя POS-система
    External,
    /// Локальная база
    Local,
}

impl SourceName {
    pub fn code(&self) -> &'static str {
        match self {
            SourceName::External => "external",
            SourceName::Local => "local",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SourceName::External => "Внешняя POS",
            SourceName::Local => "Локальная база",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "external" => Some(SourceName::External),
            "local" => Some(SourceName::Local),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
