use crate::domain::{a004_pos_connection, a007_data_source_selection};
use crate::shared::aggregation::{build_sales_summary, SaleLine, SummaryParts};
use crate::shared::errors::AnalyticsError;
use crate::shared::format::cents_to_major;
use crate::shared::sources::{LocalSalesSource, PosSalesSource, SalesSource};
use anyhow::Result;
use contracts::dashboards::d400_sales_summary::{
    CategorySales, DailyRevenue, SalesSummaryRequest, SalesSummaryResponse, TopItem,
};
use contracts::enums::{DataCategory, SourceName};

/// Строки продаж за период из источника, выбранного резолвером.
///
/// Возвращает (строки, имя источника, degraded). Недоступность
/// внешнего источника — это деградация до пустого результата, а не
/// ошибка вызова: дашборд не должен падать из-за лежащей POS. Ошибка
/// остаётся только за некорректным периодом.
pub async fn load_sale_lines(
    tenant_id: &str,
    date_from: chrono::NaiveDate,
    date_to: chrono::NaiveDate,
) -> Result<(Vec<SaleLine>, String, bool)> {
    if date_to < date_from {
        return Err(AnalyticsError::InvalidTimeRange { date_from, date_to }.into());
    }

    let selected = a007_data_source_selection::service::resolve(tenant_id, DataCategory::Sales)
        .await?;

    // Бизнес-пояс берётся из подключения POS и для локального
    // источника тоже: дневные срезы должны совпадать между источниками
    let connection = a004_pos_connection::service::find_used(tenant_id).await?;
    let tz_offset = connection
        .as_ref()
        .map(|c| c.tz_offset_minutes)
        .unwrap_or(0);

    let source: Box<dyn SalesSource> = match selected {
        SourceName::Local => Box::new(LocalSalesSource::new(tz_offset)),
        SourceName::External => match connection {
            Some(c) => Box::new(PosSalesSource::new(c)),
            None => {
                // Внешний источник выбран, но подключение не настроено
                tracing::error!(
                    "External sales source selected for tenant {} but no POS connection is configured",
                    tenant_id
                );
                return Ok((Vec::new(), selected.code().to_string(), true));
            }
        },
    };

    match source.load_sales(tenant_id, date_from, date_to).await {
        Ok(lines) => Ok((lines, source.name().to_string(), false)),
        Err(AnalyticsError::SourceUnavailable(reason)) => {
            // Явная деградация вместо тихого отката на локальные
            // данные: источники не взаимозаменяемы построчно
            tracing::error!(
                "Sales source {} unavailable for tenant {}: {}; returning zeroed summary",
                source.name(),
                tenant_id,
                reason
            );
            Ok((Vec::new(), source.name().to_string(), true))
        }
        Err(e) => Err(e.into()),
    }
}

/// Get sales summary for the dashboard
pub async fn get_sales_summary(request: SalesSummaryRequest) -> Result<SalesSummaryResponse> {
    let (lines, source, degraded) =
        load_sale_lines(&request.tenant_id, request.date_from, request.date_to).await?;

    if degraded {
        return Ok(SalesSummaryResponse::empty(&request, source, true));
    }

    let parts = build_sales_summary(&lines, request.category.as_deref());
    Ok(parts_to_response(&request, source, parts))
}

fn parts_to_response(
    request: &SalesSummaryRequest,
    source: String,
    parts: SummaryParts,
) -> SalesSummaryResponse {
    SalesSummaryResponse {
        tenant_id: request.tenant_id.clone(),
        date_from: request.date_from,
        date_to: request.date_to,
        source,
        source_degraded: false,
        total_revenue: cents_to_major(parts.total_revenue_cents),
        transactions: parts.transactions,
        categories: parts
            .categories
            .into_iter()
            .map(|(category, revenue, units)| CategorySales {
                category,
                revenue: cents_to_major(revenue),
                units,
            })
            .collect(),
        top_items: parts
            .top_items
            .into_iter()
            .map(|(name, external_item_id, revenue, units)| TopItem {
                name,
                external_item_id,
                revenue: cents_to_major(revenue),
                units,
            })
            .collect(),
        daily_trend: parts
            .daily_trend
            .into_iter()
            .map(|(date, revenue)| DailyRevenue {
                date,
                revenue: cents_to_major(revenue),
            })
            .collect(),
    }
}
