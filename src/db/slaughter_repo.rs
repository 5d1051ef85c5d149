// src/db/slaughter_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::slaughter::{
        DiscrepancyReason, SlaughterBatchSource, SlaughterRecord, SlaughterYield,
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SlaughterRepository;

impl SlaughterRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_record<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        slaughter_date: NaiveDate,
        recorded_by: Uuid,
        notes: Option<&str>,
    ) -> Result<SlaughterRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, SlaughterRecord>(
            r#"
            INSERT INTO slaughter_records (team_id, slaughter_date, recorded_by, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(slaughter_date)
        .bind(recorded_by)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(record)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_source<'e, E>(
        &self,
        executor: E,
        slaughter_record_id: Uuid,
        batch_id: Uuid,
        expected_quantity: i32,
        actual_quantity: i32,
        discrepancy_reason_id: Option<Uuid>,
        notes: Option<&str>,
    ) -> Result<SlaughterBatchSource, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let source = sqlx::query_as::<_, SlaughterBatchSource>(
            r#"
            INSERT INTO slaughter_batch_sources
                (slaughter_record_id, batch_id, expected_quantity, actual_quantity,
                 discrepancy_reason_id, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(slaughter_record_id)
        .bind(batch_id)
        .bind(expected_quantity)
        .bind(actual_quantity)
        .bind(discrepancy_reason_id)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(source)
    }

    pub async fn create_yield<'e, E>(
        &self,
        executor: E,
        slaughter_record_id: Uuid,
        product_id: Uuid,
        estimated_quantity: i32,
        actual_quantity: i32,
        household_consumed: i32,
    ) -> Result<SlaughterYield, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let slaughter_yield = sqlx::query_as::<_, SlaughterYield>(
            r#"
            INSERT INTO slaughter_yields
                (slaughter_record_id, product_id, estimated_quantity,
                 actual_quantity, household_consumed)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(slaughter_record_id)
        .bind(product_id)
        .bind(estimated_quantity)
        .bind(actual_quantity)
        .bind(household_consumed)
        .fetch_one(executor)
        .await?;
        Ok(slaughter_yield)
    }

    pub async fn get_reason<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        reason_id: Uuid,
    ) -> Result<Option<DiscrepancyReason>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let reason = sqlx::query_as::<_, DiscrepancyReason>(
            "SELECT * FROM discrepancy_reasons WHERE team_id = $1 AND id = $2",
        )
        .bind(team_id)
        .bind(reason_id)
        .fetch_optional(executor)
        .await?;
        Ok(reason)
    }

    pub async fn create_reason<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        label: &str,
        notify_manager: bool,
    ) -> Result<DiscrepancyReason, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let reason = sqlx::query_as::<_, DiscrepancyReason>(
            r#"
            INSERT INTO discrepancy_reasons (team_id, label, notify_manager)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(label)
        .bind(notify_manager)
        .fetch_one(executor)
        .await?;
        Ok(reason)
    }

    pub async fn list_reasons<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
    ) -> Result<Vec<DiscrepancyReason>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let reasons = sqlx::query_as::<_, DiscrepancyReason>(
            "SELECT * FROM discrepancy_reasons WHERE team_id = $1 ORDER BY label ASC",
        )
        .bind(team_id)
        .fetch_all(executor)
        .await?;
        Ok(reasons)
    }
}
