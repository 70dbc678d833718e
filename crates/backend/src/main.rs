pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod shared;
pub mod system;
pub mod usecases;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Отключаем логи SQL запросов, но оставляем логи приложения
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    // Конфиг: путь к базе и параметры POS
    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    shared::pos::set_items_cache_ttl(config.pos.items_cache_ttl_secs);
    shared::pos::set_request_timeout(config.pos.request_timeout_secs);

    shared::data::db::initialize_database(db_path.to_str())
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // Посев глобальных строк выбора источника
    system::initialization::ensure_default_source_rows().await?;
    system::initialization::log_source_configuration().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // MENU ITEMS
        // ========================================
        .route(
            "/api/menu-item",
            get(handlers::a001_menu_item::list_all).post(handlers::a001_menu_item::upsert),
        )
        .route(
            "/api/menu-item/:id",
            get(handlers::a001_menu_item::get_by_id),
        )
        .route(
            "/api/menu-item/:id/deactivate",
            post(handlers::a001_menu_item::deactivate),
        )
        // ========================================
        // CHEFS
        // ========================================
        .route(
            "/api/chef",
            get(handlers::a002_chef::list_all).post(handlers::a002_chef::upsert),
        )
        .route(
            "/api/chef/:id",
            get(handlers::a002_chef::get_by_id).delete(handlers::a002_chef::delete),
        )
        // ========================================
        // CHEF-DISH MAPPINGS
        // ========================================
        .route(
            "/api/chef-dish-mapping",
            get(handlers::a003_chef_dish_mapping::list_all)
                .post(handlers::a003_chef_dish_mapping::create),
        )
        .route(
            "/api/chef-dish-mapping/:id",
            axum::routing::delete(handlers::a003_chef_dish_mapping::delete),
        )
        // ========================================
        // POS CONNECTIONS
        // ========================================
        .route(
            "/api/pos-connection",
            get(handlers::a004_pos_connection::list_all)
                .post(handlers::a004_pos_connection::upsert),
        )
        .route(
            "/api/pos-connection/:id",
            get(handlers::a004_pos_connection::get_by_id)
                .delete(handlers::a004_pos_connection::delete),
        )
        .route(
            "/api/pos-connection/test",
            post(handlers::a004_pos_connection::test_connection),
        )
        // ========================================
        // EXPENSES
        // ========================================
        .route(
            "/api/expense",
            get(handlers::a005_expense::list_all).post(handlers::a005_expense::upsert),
        )
        .route(
            "/api/expense/:id",
            get(handlers::a005_expense::get_by_id).delete(handlers::a005_expense::delete),
        )
        // ========================================
        // LOCAL SALE RECORDS
        // ========================================
        .route(
            "/api/sale-record",
            get(handlers::a006_sale_record::list).post(handlers::a006_sale_record::create),
        )
        .route(
            "/api/sale-record/:id",
            axum::routing::delete(handlers::a006_sale_record::delete),
        )
        // ========================================
        // DATA SOURCE SELECTION (admin)
        // ========================================
        .route(
            "/api/data-source",
            get(handlers::a007_data_source_selection::list_all)
                .post(handlers::a007_data_source_selection::set_source),
        )
        .route(
            "/api/data-source/:id",
            axum::routing::delete(handlers::a007_data_source_selection::delete),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/d400/sales-summary",
            get(handlers::d400_sales_summary::get_sales_summary),
        )
        .route(
            "/api/d401/chef-performance",
            get(handlers::d401_chef_performance::get_chef_performance),
        )
        .route(
            "/api/d402/profitability",
            get(handlers::d402_profitability::get_profitability),
        )
        // UseCase u501: Sync POS inventory
        .route(
            "/api/u501/sync/start",
            post(handlers::usecases::u501_start_sync),
        )
        .route(
            "/api/u501/sync/:session_id/progress",
            get(handlers::usecases::u501_get_progress),
        )
        // Admin: clear POS items cache
        .route("/api/admin/cache/clear", post(handlers::admin::clear_cache))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], 3000).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port 3000 is already in use. Please ensure no other process is using this port."
                );
            } else {
                tracing::error!("Failed to bind to port 3000. Error: {}", e);
            }
            // Propagate the error to stop the application
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
