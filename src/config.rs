// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::common::clock::{Clock, SystemClock};
use crate::db::{
    BatchRepository, DailyLogRepository, ExpenseRepository, ProductRepository, SalesRepository,
    SlaughterRepository, TeamRepository,
};
use crate::services::{
    BatchService, DailyLogService, ExpenseService, PgNotifier, SalesService, SlaughterService,
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    pub batch_service: BatchService,
    pub daily_log_service: DailyLogService,
    pub slaughter_service: SlaughterService,
    pub sales_service: SalesService,
    pub expense_service: ExpenseService,

    // Repositories the thin CRUD handlers hit directly.
    pub product_repo: ProductRepository,
    pub slaughter_repo: SlaughterRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Database connection established.");

        // --- Wire up the dependency graph ---
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let batch_repo = BatchRepository::new();
        let daily_log_repo = DailyLogRepository::new();
        let expense_repo = ExpenseRepository::new();
        let product_repo = ProductRepository::new();
        let sales_repo = SalesRepository::new();
        let slaughter_repo = SlaughterRepository::new();
        let team_repo = TeamRepository::new();

        let notifier = Arc::new(PgNotifier::new(db_pool.clone(), team_repo));

        let batch_service = BatchService::new(
            batch_repo,
            daily_log_repo,
            expense_repo,
            Arc::clone(&clock),
        );
        let daily_log_service =
            DailyLogService::new(daily_log_repo, batch_repo, Arc::clone(&clock));
        let slaughter_service =
            SlaughterService::new(slaughter_repo, batch_repo, product_repo, notifier);
        let sales_service = SalesService::new(sales_repo, batch_repo, product_repo);
        let expense_service = ExpenseService::new(expense_repo, batch_repo);

        Ok(Self {
            db_pool,
            batch_service,
            daily_log_service,
            slaughter_service,
            sales_service,
            expense_service,
            product_repo,
            slaughter_repo,
        })
    }
}
