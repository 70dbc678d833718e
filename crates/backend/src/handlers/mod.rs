pub mod a001_menu_item;
pub mod a002_chef;
pub mod a003_chef_dish_mapping;
pub mod a004_pos_connection;
pub mod a005_expense;
pub mod a006_sale_record;
pub mod a007_data_source_selection;
pub mod admin;
pub mod d400_sales_summary;
pub mod d401_chef_performance;
pub mod d402_profitability;
pub mod usecases;

use crate::shared::errors::AnalyticsError;
use axum::http::StatusCode;

/// Некорректный период — ошибка запроса, остальное — 500
pub(crate) fn map_service_error(e: anyhow::Error) -> StatusCode {
    match e.downcast_ref::<AnalyticsError>() {
        Some(AnalyticsError::InvalidTimeRange { .. }) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
