// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Batches ---
        handlers::batches::create_batch,
        handlers::batches::list_batches,
        handlers::batches::get_batch,
        handlers::batches::get_batch_statistics,
        handlers::batches::activate_batch,
        handlers::batches::start_harvesting,
        handlers::batches::close_batch,

        // --- Daily logs ---
        handlers::daily_logs::create_daily_log,
        handlers::daily_logs::list_daily_logs,
        handlers::daily_logs::update_daily_log,

        // --- Slaughter ---
        handlers::slaughter::record_slaughter,
        handlers::slaughter::create_discrepancy_reason,
        handlers::slaughter::list_discrepancy_reasons,

        // --- Sales ---
        handlers::sales::record_live_sale,
        handlers::sales::record_portioning,

        // --- Expenses ---
        handlers::expenses::create_expense,
        handlers::expenses::list_expenses,

        // --- Products ---
        handlers::products::create_product,
        handlers::products::list_products,
    ),
    components(
        schemas(
            models::batch::Batch,
            models::batch::BatchStatus,
            models::daily_log::DailyLog,
            models::expense::Expense,
            models::expense::ExpenseCategory,
            models::expense::AllocatableKind,
            models::product::Product,
            models::product::ProductKind,
            models::product::StockMovement,
            models::product::StockMovementReason,
            models::sales::LiveSaleRecord,
            models::sales::PortioningRecord,
            models::slaughter::SlaughterRecord,
            models::slaughter::SlaughterBatchSource,
            models::slaughter::SlaughterYield,
            models::slaughter::SlaughterRecordDetail,
            models::slaughter::DiscrepancyReason,
            models::stats::BatchStatistics,
        )
    ),
    tags(
        (name = "Batches", description = "Batch lifecycle and KPIs"),
        (name = "Daily logs", description = "Daily operational records"),
        (name = "Slaughter", description = "Slaughter sessions and discrepancies"),
        (name = "Sales", description = "Live sales and portioning"),
        (name = "Expenses", description = "Cost allocation"),
        (name = "Products", description = "Product catalogue and stock"),
    )
)]
pub struct ApiDoc;
