// src/main.rs

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() is right here: if configuration fails the app must not start.
    let app_state = AppState::new()
        .await
        .expect("Failed to initialize application state.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Failed to run database migrations.");

    tracing::info!("✅ Database migrations applied.");

    let batch_routes = Router::new()
        .route(
            "/",
            post(handlers::batches::create_batch).get(handlers::batches::list_batches),
        )
        .route("/{id}", get(handlers::batches::get_batch))
        .route(
            "/{id}/statistics",
            get(handlers::batches::get_batch_statistics),
        )
        .route("/{id}/activate", post(handlers::batches::activate_batch))
        .route(
            "/{id}/start-harvesting",
            post(handlers::batches::start_harvesting),
        )
        .route("/{id}/close", post(handlers::batches::close_batch))
        .route(
            "/{id}/daily-logs",
            post(handlers::daily_logs::create_daily_log).get(handlers::daily_logs::list_daily_logs),
        );

    let daily_log_routes =
        Router::new().route("/{id}", put(handlers::daily_logs::update_daily_log));

    let slaughter_routes = Router::new()
        .route("/", post(handlers::slaughter::record_slaughter))
        .route(
            "/discrepancy-reasons",
            post(handlers::slaughter::create_discrepancy_reason)
                .get(handlers::slaughter::list_discrepancy_reasons),
        );

    let sales_routes = Router::new()
        .route("/live", post(handlers::sales::record_live_sale))
        .route("/portioning", post(handlers::sales::record_portioning));

    let expense_routes = Router::new().route(
        "/",
        post(handlers::expenses::create_expense).get(handlers::expenses::list_expenses),
    );

    let product_routes = Router::new().route(
        "/",
        post(handlers::products::create_product).get(handlers::products::list_products),
    );

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/batches", batch_routes)
        .nest("/api/daily-logs", daily_log_routes)
        .nest("/api/slaughters", slaughter_routes)
        .nest("/api/sales", sales_routes)
        .nest("/api/expenses", expense_routes)
        .nest("/api/products", product_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("🚀 Server listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Axum server error");
}
