use crate::shared::errors::AnalyticsError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

/// Нормализованное временное окно запроса: локальные сутки арендатора,
/// переведённые в epoch-миллисекунды для wire-формата POS.
///
/// Начало — локальная полночь date_from, конец — 23:59:59.999 date_to.
/// Без этой нормализации дневные срезы уезжают на соседний день для
/// арендаторов не в UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from_ms: i64,
    pub to_ms: i64,
}

/// Построить окно запроса по границам дат (включительно) в бизнес-поясе,
/// заданном смещением от UTC в минутах.
pub fn day_bounds(
    date_from: NaiveDate,
    date_to: NaiveDate,
    tz_offset_minutes: i32,
) -> Result<TimeWindow, AnalyticsError> {
    if date_to < date_from {
        return Err(AnalyticsError::InvalidTimeRange { date_from, date_to });
    }

    let offset = FixedOffset::east_opt(tz_offset_minutes * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());

    let start_local = date_from.and_time(NaiveTime::MIN);
    let end_local = date_to
        .and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());

    // FixedOffset не имеет переходов, single() здесь всегда Some
    let start = offset
        .from_local_datetime(&start_local)
        .single()
        .unwrap_or_else(|| offset.from_utc_datetime(&start_local));
    let end = offset
        .from_local_datetime(&end_local)
        .single()
        .unwrap_or_else(|| offset.from_utc_datetime(&end_local));

    Ok(TimeWindow {
        from_ms: start.timestamp_millis(),
        to_ms: end.timestamp_millis(),
    })
}

/// Локальная бизнес-дата момента времени (epoch ms) для дневной разбивки
pub fn local_date_of_millis(epoch_ms: i64, tz_offset_minutes: i32) -> NaiveDate {
    let offset = FixedOffset::east_opt(tz_offset_minutes * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
    let utc = Utc
        .timestamp_millis_opt(epoch_ms)
        .single()
        .unwrap_or_else(Utc::now);
    utc.with_timezone(&offset).date_naive()
}

/// Локальная бизнес-дата UTC-момента
pub fn local_date_of(ts: DateTime<Utc>, tz_offset_minutes: i32) -> NaiveDate {
    let offset = FixedOffset::east_opt(tz_offset_minutes * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
    ts.with_timezone(&offset).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds_utc() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let w = day_bounds(d, d, 0).unwrap();
        // 2025-03-10T00:00:00Z
        assert_eq!(w.from_ms, 1741564800000);
        // 2025-03-10T23:59:59.999Z
        assert_eq!(w.to_ms, 1741564800000 + 86_400_000 - 1);
    }

    #[test]
    fn test_day_bounds_positive_offset_shifts_start_back() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        // UTC+3: локальная полночь наступает на 3 часа раньше по UTC
        let w = day_bounds(d, d, 180).unwrap();
        assert_eq!(w.from_ms, 1741564800000 - 3 * 3_600_000);
    }

    #[test]
    fn test_day_bounds_negative_offset() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        // UTC-5 (например, Нью-Йорк зимой)
        let w = day_bounds(d, d, -300).unwrap();
        assert_eq!(w.from_ms, 1741564800000 + 5 * 3_600_000);
    }

    #[test]
    fn test_day_bounds_rejects_inverted_range() {
        let from = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert!(day_bounds(from, to, 0).is_err());
    }

    #[test]
    fn test_local_date_straddles_midnight() {
        // 2025-03-10T22:30:00Z
        let ms = 1741645800000;
        // В UTC это 10-е, в UTC+3 уже 11-е
        assert_eq!(
            local_date_of_millis(ms, 0),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
        assert_eq!(
            local_date_of_millis(ms, 180),
            NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()
        );
        // А в UTC-5 ещё 10-е
        assert_eq!(
            local_date_of_millis(ms, -300),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
    }
}
