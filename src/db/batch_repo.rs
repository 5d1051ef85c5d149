// src/db/batch_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::batch::{Batch, BatchStatus},
};

// Queries are runtime-checked (`query_as` + binds); `Batch` maps 1:1 onto
// the `batches` columns via `FromRow`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchRepository;

impl BatchRepository {
    pub fn new() -> Self {
        Self
    }

    // ---
    // Reads
    // ---

    pub async fn get<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Option<Batch>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batch = sqlx::query_as::<_, Batch>(
            "SELECT * FROM batches WHERE team_id = $1 AND id = $2",
        )
        .bind(team_id)
        .bind(batch_id)
        .fetch_optional(executor)
        .await?;
        Ok(batch)
    }

    /// Row-locked load for the recording actions: every read-then-decrement
    /// happens against a batch locked for the duration of the transaction.
    pub async fn get_for_update<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Option<Batch>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batch = sqlx::query_as::<_, Batch>(
            "SELECT * FROM batches WHERE team_id = $1 AND id = $2 FOR UPDATE",
        )
        .bind(team_id)
        .bind(batch_id)
        .fetch_optional(executor)
        .await?;
        Ok(batch)
    }

    pub async fn list<'e, E>(&self, executor: E, team_id: Uuid) -> Result<Vec<Batch>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batches = sqlx::query_as::<_, Batch>(
            "SELECT * FROM batches WHERE team_id = $1 ORDER BY created_at DESC",
        )
        .bind(team_id)
        .fetch_all(executor)
        .await?;
        Ok(batches)
    }

    // ---
    // Writes (transactional; callers pass the open transaction)
    // ---

    /// Creation always forces Planned status and `current_quantity =
    /// initial_quantity`; callers cannot create a batch in any other state.
    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_number: &str,
        name: &str,
        supplier_id: Option<Uuid>,
        start_date: Option<NaiveDate>,
        expected_end_date: Option<NaiveDate>,
        initial_quantity: i32,
        target_weight_kg: Option<Decimal>,
    ) -> Result<Batch, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batch = sqlx::query_as::<_, Batch>(
            r#"
            INSERT INTO batches
                (team_id, batch_number, name, supplier_id, status,
                 start_date, expected_end_date, initial_quantity,
                 current_quantity, target_weight_kg)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8, $9)
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(batch_number)
        .bind(name)
        .bind(supplier_id)
        .bind(BatchStatus::Planned)
        .bind(start_date)
        .bind(expected_end_date)
        .bind(initial_quantity)
        .bind(target_weight_kg)
        .fetch_one(executor)
        .await?;
        Ok(batch)
    }

    /// Planned -> Active effect: backfill current_quantity from
    /// initial_quantity if it was never set.
    pub async fn activate<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Batch, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batch = sqlx::query_as::<_, Batch>(
            r#"
            UPDATE batches
            SET status = $3,
                current_quantity = COALESCE(current_quantity, initial_quantity),
                updated_at = now()
            WHERE team_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(batch_id)
        .bind(BatchStatus::Active)
        .fetch_one(executor)
        .await?;
        Ok(batch)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
        status: BatchStatus,
    ) -> Result<Batch, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batch = sqlx::query_as::<_, Batch>(
            "UPDATE batches SET status = $3, updated_at = now()
             WHERE team_id = $1 AND id = $2 RETURNING *",
        )
        .bind(team_id)
        .bind(batch_id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(batch)
    }

    pub async fn set_current_quantity<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
        quantity: i32,
    ) -> Result<Batch, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batch = sqlx::query_as::<_, Batch>(
            "UPDATE batches SET current_quantity = $3, updated_at = now()
             WHERE team_id = $1 AND id = $2 RETURNING *",
        )
        .bind(team_id)
        .bind(batch_id)
        .bind(quantity)
        .fetch_one(executor)
        .await?;
        Ok(batch)
    }

    /// Harvesting -> Closed effect: closure fields plus the frozen
    /// statistics snapshot in one update.
    #[allow(clippy::too_many_arguments)]
    pub async fn close<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
        actual_end_date: NaiveDate,
        average_weight_kg: Decimal,
        manure_bags_collected: Option<i32>,
        closure_reason: Option<&str>,
        closure_notes: Option<&str>,
        final_statistics: serde_json::Value,
    ) -> Result<Batch, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let batch = sqlx::query_as::<_, Batch>(
            r#"
            UPDATE batches
            SET status = $3,
                actual_end_date = $4,
                average_weight_kg = $5,
                manure_bags_collected = $6,
                closure_reason = $7,
                closure_notes = $8,
                final_statistics = $9,
                updated_at = now()
            WHERE team_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(batch_id)
        .bind(BatchStatus::Closed)
        .bind(actual_end_date)
        .bind(average_weight_kg)
        .bind(manure_bags_collected)
        .bind(closure_reason)
        .bind(closure_notes)
        .bind(final_statistics)
        .fetch_one(executor)
        .await?;
        Ok(batch)
    }

    /// Atomic per-(team, year) sequence for batch-number generation.
    /// The upsert makes concurrent creations serialize on the counter row
    /// instead of racing a count of existing batches.
    pub async fn next_batch_sequence<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        year: i32,
    ) -> Result<i32, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let seq = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO batch_number_counters (team_id, year, last_seq)
            VALUES ($1, $2, 1)
            ON CONFLICT (team_id, year)
            DO UPDATE SET last_seq = batch_number_counters.last_seq + 1
            RETURNING last_seq
            "#,
        )
        .bind(team_id)
        .bind(year)
        .fetch_one(executor)
        .await?;
        Ok(seq)
    }
}
