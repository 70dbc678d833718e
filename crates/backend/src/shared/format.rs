/// Переводит сумму из минорных единиц (копейки/центы) в основные.
///
/// POS API отдаёт деньги целыми минорными единицами; все сводки
/// наружу отдаются в основных единицах.
///
/// # Примеры
/// ```
/// use backend::shared::format::cents_to_major;
/// assert_eq!(cents_to_major(1250), 12.5);
/// assert_eq!(cents_to_major(0), 0.0);
/// assert_eq!(cents_to_major(-300), -3.0);
/// ```
pub fn cents_to_major(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Форматирует сумму в минорных единицах как строку с двумя знаками
pub fn format_money(cents: i64) -> String {
    format!("{:.2}", cents_to_major(cents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_to_major() {
        assert_eq!(cents_to_major(0), 0.0);
        assert_eq!(cents_to_major(1), 0.01);
        assert_eq!(cents_to_major(100), 1.0);
        assert_eq!(cents_to_major(2000), 20.0);
        assert_eq!(cents_to_major(-150), -1.5);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "0.00");
        assert_eq!(format_money(500), "5.00");
        assert_eq!(format_money(1234), "12.34");
        assert_eq!(format_money(99), "0.99");
    }
}
