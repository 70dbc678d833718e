use crate::dashboards::d400_sales_summary::service::load_sale_lines;
use crate::domain::a005_expense;
use crate::shared::aggregation::allocation::{ExpenseAllocation, ProportionalAllocation};
use crate::shared::aggregation::build_sales_summary;
use crate::shared::format::cents_to_major;
use anyhow::Result;
use contracts::dashboards::d402_profitability::{
    CategoryProfit, ProfitabilityRequest, ProfitabilityResponse,
};
use contracts::domain::a005_expense::aggregate::KITCHEN_EXPENSE_BUCKET;
use std::collections::HashMap;

/// Get profitability: sales minus local expenses by category.
///
/// Расходы всегда локальные (во внешней POS их нет); источник
/// выбирается только для продаж. Общий бакет кухни разносится по
/// категориям выбранной стратегией.
pub async fn get_profitability(request: ProfitabilityRequest) -> Result<ProfitabilityResponse> {
    let strategy = ProportionalAllocation;

    let (lines, source, degraded) =
        load_sale_lines(&request.tenant_id, request.date_from, request.date_to).await?;

    let parts = build_sales_summary(&lines, None);

    let expenses = a005_expense::repository::sum_by_category(
        &request.tenant_id,
        request.date_from,
        request.date_to,
    )
    .await?;

    let total_revenue_cents = parts.total_revenue_cents;
    let total_expenses_cents: i64 = expenses.iter().map(|e| e.total_cents).sum();

    // Выручка по категориям — база и для прямого соотнесения расходов,
    // и для распределения общего бакета
    let category_revenue: Vec<(String, i64)> = parts
        .categories
        .iter()
        .map(|(category, revenue, _)| (category.clone(), *revenue))
        .collect();

    let mut direct_by_category: HashMap<&str, i64> = HashMap::new();
    let mut kitchen_cents: i64 = 0;
    let mut unmatched: Vec<(&str, i64)> = Vec::new();
    for expense in &expenses {
        if expense.category == KITCHEN_EXPENSE_BUCKET {
            kitchen_cents += expense.total_cents;
        } else if category_revenue.iter().any(|(c, _)| c == &expense.category) {
            *direct_by_category.entry(expense.category.as_str()).or_insert(0) +=
                expense.total_cents;
        } else {
            unmatched.push((expense.category.as_str(), expense.total_cents));
        }
    }

    let allocated: HashMap<String, i64> = strategy
        .allocate(kitchen_cents, &category_revenue)
        .into_iter()
        .collect();

    let mut categories: Vec<CategoryProfit> = category_revenue
        .iter()
        .map(|(category, revenue_cents)| {
            let direct = direct_by_category
                .get(category.as_str())
                .copied()
                .unwrap_or(0);
            let share = allocated.get(category).copied().unwrap_or(0);
            CategoryProfit {
                category: category.clone(),
                revenue: cents_to_major(*revenue_cents),
                direct_expenses: cents_to_major(direct),
                allocated_expenses: cents_to_major(share),
                profit: cents_to_major(revenue_cents - direct - share),
            }
        })
        .collect();

    // Без базы распределения (нет выручки) бакет кухни показывается
    // собственной строкой, иначе он выпал бы из разбивки
    let allocated_total: i64 = allocated.values().sum();
    if kitchen_cents > 0 && allocated_total == 0 {
        categories.push(CategoryProfit {
            category: KITCHEN_EXPENSE_BUCKET.to_string(),
            revenue: 0.0,
            direct_expenses: cents_to_major(kitchen_cents),
            allocated_expenses: 0.0,
            profit: cents_to_major(-kitchen_cents),
        });
    }

    // Расходные бакеты без продаж за период видны отдельными строками,
    // чтобы итог расходов сходился
    for (category, cents) in unmatched {
        categories.push(CategoryProfit {
            category: category.to_string(),
            revenue: 0.0,
            direct_expenses: cents_to_major(cents),
            allocated_expenses: 0.0,
            profit: cents_to_major(-cents),
        });
    }

    Ok(ProfitabilityResponse {
        tenant_id: request.tenant_id,
        date_from: request.date_from,
        date_to: request.date_to,
        source,
        source_degraded: degraded,
        total_revenue: cents_to_major(total_revenue_cents),
        total_expenses: cents_to_major(total_expenses_cents),
        profit: cents_to_major(total_revenue_cents - total_expenses_cents),
        categories,
        allocation_strategy: strategy.name().to_string(),
    })
}
