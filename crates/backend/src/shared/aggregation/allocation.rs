//! Стратегии распределения общих расходов по категориям меню.
//!
//! Пропорциональное распределение — эвристика, а не бухгалтерское
//! разнесение; стратегия именована и заменяема без правок ядра
//! агрегации.

/// Стратегия распределения общего расходного бакета
pub trait ExpenseAllocation: Send + Sync {
    /// Имя стратегии для отчёта
    fn name(&self) -> &'static str;

    /// Разнести `shared_cents` по категориям.
    ///
    /// `category_revenue` — (категория, выручка в минорных единицах).
    /// Возвращает (категория, доля расхода) в том же порядке; сумма
    /// долей равна shared_cents, если есть ненулевая выручка.
    fn allocate(
        &self,
        shared_cents: i64,
        category_revenue: &[(String, i64)],
    ) -> Vec<(String, i64)>;
}

/// Распределение пропорционально доле категории в выручке
pub struct ProportionalAllocation;

impl ExpenseAllocation for ProportionalAllocation {
    fn name(&self) -> &'static str {
        "proportional-by-revenue"
    }

    fn allocate(
        &self,
        shared_cents: i64,
        category_revenue: &[(String, i64)],
    ) -> Vec<(String, i64)> {
        let total_revenue: i64 = category_revenue.iter().map(|(_, r)| (*r).max(0)).sum();

        if total_revenue <= 0 || shared_cents == 0 {
            // Базы для распределения нет — доли нулевые
            return category_revenue
                .iter()
                .map(|(c, _)| (c.clone(), 0))
                .collect();
        }

        let mut shares: Vec<(String, i64)> = category_revenue
            .iter()
            .map(|(c, r)| {
                let revenue = (*r).max(0);
                (c.clone(), shared_cents * revenue / total_revenue)
            })
            .collect();

        // Остаток округления — категории с наибольшей выручкой
        let allocated: i64 = shares.iter().map(|(_, s)| s).sum();
        let mut remainder = shared_cents - allocated;
        if remainder > 0 {
            let mut order: Vec<usize> = (0..category_revenue.len()).collect();
            order.sort_by(|&a, &b| category_revenue[b].1.cmp(&category_revenue[a].1));
            for idx in order {
                if remainder == 0 {
                    break;
                }
                shares[idx].1 += 1;
                remainder -= 1;
            }
        }

        shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
        pairs.iter().map(|(c, r)| (c.to_string(), *r)).collect()
    }

    #[test]
    fn test_proportional_split() {
        let strategy = ProportionalAllocation;
        let shares = strategy.allocate(1000, &revenue(&[("Супы", 3000), ("Горячее", 1000)]));
        assert_eq!(shares[0], ("Супы".to_string(), 750));
        assert_eq!(shares[1], ("Горячее".to_string(), 250));
    }

    #[test]
    fn test_rounding_remainder_preserved() {
        let strategy = ProportionalAllocation;
        let shares = strategy.allocate(
            100,
            &revenue(&[("А", 100), ("Б", 100), ("В", 100)]),
        );
        let total: i64 = shares.iter().map(|(_, s)| s).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_zero_revenue_base_allocates_nothing() {
        let strategy = ProportionalAllocation;
        let shares = strategy.allocate(1000, &revenue(&[("Супы", 0), ("Горячее", 0)]));
        assert!(shares.iter().all(|(_, s)| *s == 0));
    }

    #[test]
    fn test_empty_categories() {
        let strategy = ProportionalAllocation;
        assert!(strategy.allocate(1000, &[]).is_empty());
    }

    #[test]
    fn test_strategy_name() {
        assert_eq!(ProportionalAllocation.name(), "proportional-by-revenue");
    }
}
