// src/services/batch_service.rs

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError},
    db::{BatchRepository, DailyLogRepository, ExpenseRepository},
    models::{
        batch::{Batch, BatchStatus},
        stats::BatchStatistics,
    },
    services::metrics,
};

// Prefix for generated batch numbers: BATCH-{year}-{seq:03}.
const BATCH_NUMBER_PREFIX: &str = "BATCH";

/// Owns the batch state machine (Planned -> Active -> Harvesting -> Closed)
/// and the guarded lifecycle mutations. Quantity bookkeeping lives in the
/// recording services; this one only touches quantity when activation
/// backfills it and when closure snapshots the final statistics.
#[derive(Clone)]
pub struct BatchService {
    batch_repo: BatchRepository,
    daily_log_repo: DailyLogRepository,
    expense_repo: ExpenseRepository,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Clone)]
pub struct CreateBatchInput {
    pub name: String,
    pub batch_number: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub expected_end_date: Option<NaiveDate>,
    pub initial_quantity: i32,
    pub target_weight_kg: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct CloseBatchInput {
    pub average_weight_kg: Decimal,
    pub manure_bags_collected: Option<i32>,
    pub closure_reason: Option<String>,
    pub closure_notes: Option<String>,
}

impl BatchService {
    pub fn new(
        batch_repo: BatchRepository,
        daily_log_repo: DailyLogRepository,
        expense_repo: ExpenseRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            batch_repo,
            daily_log_repo,
            expense_repo,
            clock,
        }
    }

    // ---
    // Creation
    // ---

    /// Creates a batch in Planned status with `current_quantity =
    /// initial_quantity`, generating the batch number when none is supplied.
    /// Callers cannot create a batch in any other state.
    pub async fn create_batch<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        input: CreateBatchInput,
    ) -> Result<Batch, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let batch_number = match input.batch_number {
            Some(number) => number,
            None => self.generate_batch_number(&mut *tx, team_id).await?,
        };

        let batch = self
            .batch_repo
            .create(
                &mut *tx,
                team_id,
                &batch_number,
                &input.name,
                input.supplier_id,
                input.start_date,
                input.expected_end_date,
                input.initial_quantity,
                input.target_weight_kg,
            )
            .await?;

        tx.commit().await?;
        Ok(batch)
    }

    /// Team- and year-scoped running number, `BATCH-{year}-{seq:03}`.
    /// The sequence comes from an atomic per-(team, year) counter row, so
    /// concurrent creations cannot mint the same number.
    pub async fn generate_batch_number<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
    ) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let year = self.clock.today().year();
        let seq = self
            .batch_repo
            .next_batch_sequence(executor, team_id, year)
            .await?;
        Ok(format!("{BATCH_NUMBER_PREFIX}-{year}-{seq:03}"))
    }

    // ---
    // Lifecycle transitions
    // ---

    pub async fn activate<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Batch, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let batch = self
            .batch_repo
            .get_for_update(&mut *tx, team_id, batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Batch not found.".to_string()))?;

        batch.ensure_can_activate()?;
        let batch = self.batch_repo.activate(&mut *tx, team_id, batch_id).await?;

        tx.commit().await?;
        Ok(batch)
    }

    pub async fn start_harvesting<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Batch, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let batch = self
            .batch_repo
            .get_for_update(&mut *tx, team_id, batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Batch not found.".to_string()))?;

        batch.ensure_can_start_harvesting()?;
        let batch = self
            .batch_repo
            .set_status(&mut *tx, team_id, batch_id, BatchStatus::Harvesting)
            .await?;

        tx.commit().await?;
        Ok(batch)
    }

    /// Harvesting -> Closed. Birds still unaccounted for require a closure
    /// reason; the final statistics report is computed from the closed
    /// state and frozen onto the batch row.
    pub async fn close<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
        input: CloseBatchInput,
    ) -> Result<Batch, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let mut batch = self
            .batch_repo
            .get_for_update(&mut *tx, team_id, batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Batch not found.".to_string()))?;

        batch.ensure_can_close(input.closure_reason.as_deref())?;

        let today = self.clock.today();

        // Snapshot the statistics as they will stand after closure.
        batch.average_weight_kg = Some(input.average_weight_kg);
        batch.actual_end_date = Some(today);
        let stats = self
            .statistics_for(&mut *tx, &batch, today)
            .await?;

        let batch = self
            .batch_repo
            .close(
                &mut *tx,
                team_id,
                batch_id,
                today,
                input.average_weight_kg,
                input.manure_bags_collected,
                input.closure_reason.as_deref(),
                input.closure_notes.as_deref(),
                serde_json::to_value(&stats)?,
            )
            .await?;

        tx.commit().await?;
        Ok(batch)
    }

    // ---
    // Reads
    // ---

    pub async fn get<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Batch, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.batch_repo
            .get(executor, team_id, batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Batch not found.".to_string()))
    }

    pub async fn list<'e, E>(&self, executor: E, team_id: Uuid) -> Result<Vec<Batch>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.batch_repo.list(executor, team_id).await
    }

    /// Read-only KPI report for the dashboard; safe to call at any time.
    pub async fn get_statistics<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
    ) -> Result<BatchStatistics, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let batch = self
            .batch_repo
            .get(&mut *conn, team_id, batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Batch not found.".to_string()))?;

        self.statistics_for(&mut *conn, &batch, self.clock.today())
            .await
    }

    async fn statistics_for(
        &self,
        executor: &mut PgConnection,
        batch: &Batch,
        today: NaiveDate,
    ) -> Result<BatchStatistics, AppError> {
        let mut conn = executor.acquire().await?;
        let logs = self
            .daily_log_repo
            .list_for_batch(&mut *conn, batch.team_id, batch.id)
            .await?;
        let expenses = self
            .expense_repo
            .list_for_batch(&mut *conn, batch.team_id, batch.id)
            .await?;
        Ok(metrics::batch_statistics(batch, &logs, &expenses, today))
    }
}
