use chrono::NaiveDate;
use thiserror::Error;

/// Ошибки движка аналитики.
///
/// ReconciliationMiss намеренно не является вариантом: несопоставленные
/// строки считаются и попадают в предупреждение сводки, расчёт они не
/// прерывают.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Внешний источник недоступен: сеть, таймаут, не-2xx,
    /// неустранённый троттлинг
    #[error("data source unavailable: {0}")]
    SourceUnavailable(String),

    /// Конец периода раньше начала
    #[error("invalid time range: {date_to} is before {date_from}")]
    InvalidTimeRange {
        date_from: NaiveDate,
        date_to: NaiveDate,
    },

    /// Конфликтующая конфигурация источников. Сегодня не возникает:
    /// резолвер молча берёт первую подходящую строку.
    #[allow(dead_code)]
    #[error("ambiguous source configuration: {0}")]
    AmbiguousConfiguration(String),
}
