use crate::dashboards::d400_sales_summary::service::load_sale_lines;
use crate::domain::{a002_chef, a003_chef_dish_mapping};
use crate::shared::aggregation::{build_chef_performance, AssignmentIndex};
use crate::shared::format::cents_to_major;
use anyhow::Result;
use contracts::dashboards::d401_chef_performance::{
    ChefItemPerformance, ChefPerformance, ChefPerformanceRequest, ChefPerformanceResponse,
};

/// Get chef performance rollups
pub async fn get_chef_performance(
    request: ChefPerformanceRequest,
) -> Result<ChefPerformanceResponse> {
    let (lines, source, degraded) =
        load_sale_lines(&request.tenant_id, request.date_from, request.date_to).await?;

    // Закрепления и список поваров всегда локальные
    let assignments = a003_chef_dish_mapping::service::list_by_tenant(&request.tenant_id).await?;
    let all_chefs = a002_chef::service::list_by_tenant(&request.tenant_id).await?;

    if degraded {
        // Повара перечисляются с нулями даже при деградации источника
        let chefs = all_chefs
            .into_iter()
            .filter(|c| c.is_active && !c.is_unassigned())
            .map(|c| ChefPerformance {
                chef_ref: c.to_string_id(),
                chef_name: c.base.description.clone(),
                revenue: 0.0,
                units: 0,
                items: Vec::new(),
            })
            .collect();
        return Ok(ChefPerformanceResponse {
            tenant_id: request.tenant_id,
            date_from: request.date_from,
            date_to: request.date_to,
            source,
            source_degraded: true,
            chefs,
            unmapped_lines: 0,
            unmapped_revenue: 0.0,
        });
    }

    let index = AssignmentIndex::build(&assignments);
    let parts = build_chef_performance(&lines, &index);

    // Активные повара без продаж остаются в сводке с нулями;
    // зарезервированный "не назначено" в отчёт не входит. Неактивный
    // повар с продажами за период остаётся виден — его выручка не
    // должна молча исчезать.
    let mut rows: Vec<ChefPerformance> = Vec::new();
    for chef in &all_chefs {
        if chef.is_unassigned() {
            continue;
        }
        let chef_ref = chef.to_string_id();
        if !chef.is_active && !parts.per_chef.contains_key(&chef_ref) {
            continue;
        }
        match parts.per_chef.get(&chef_ref) {
            Some(acc) => rows.push(ChefPerformance {
                chef_ref,
                chef_name: chef.base.description.clone(),
                revenue: cents_to_major(acc.revenue_cents),
                units: acc.units,
                items: acc
                    .items
                    .iter()
                    .map(|i| ChefItemPerformance {
                        item_name: i.item_name.clone(),
                        external_item_id: i.external_item_id.clone(),
                        revenue: cents_to_major(i.revenue_cents),
                        units: i.units,
                    })
                    .collect(),
            }),
            None => rows.push(ChefPerformance {
                chef_ref,
                chef_name: chef.base.description.clone(),
                revenue: 0.0,
                units: 0,
                items: Vec::new(),
            }),
        }
    }
    rows.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if parts.unmapped_lines > 0 {
        tracing::warn!(
            "Chef performance for tenant {}: {} unmapped sale lines",
            request.tenant_id,
            parts.unmapped_lines
        );
    }

    Ok(ChefPerformanceResponse {
        tenant_id: request.tenant_id,
        date_from: request.date_from,
        date_to: request.date_to,
        source,
        source_degraded: false,
        chefs: rows,
        unmapped_lines: parts.unmapped_lines,
        unmapped_revenue: cents_to_major(parts.unmapped_revenue_cents),
    })
}
