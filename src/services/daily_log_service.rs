// src/services/daily_log_service.rs

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError},
    db::{BatchRepository, DailyLogRepository, daily_log_repo::EnvReadings},
    models::daily_log::DailyLog,
};

/// One operational record per batch per calendar day, with the mortality
/// side effect on the batch's current quantity.
///
/// Mortality clamps the quantity at zero rather than rejecting; slaughter
/// and sales reject instead. The two policies are distinct per operation.
#[derive(Clone)]
pub struct DailyLogService {
    daily_log_repo: DailyLogRepository,
    batch_repo: BatchRepository,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Clone)]
pub struct DailyLogInput {
    pub log_date: NaiveDate,
    pub mortality_count: i32,
    pub feed_consumed_kg: Decimal,
    pub env: EnvReadings,
    pub notes: Option<String>,
}

// Updates cannot move a log to another date or change its recorder; the
// update input carries neither.
#[derive(Debug, Clone)]
pub struct DailyLogUpdate {
    pub mortality_count: i32,
    pub feed_consumed_kg: Decimal,
    pub env: EnvReadings,
    pub notes: Option<String>,
}

/// New quantity after applying a mortality delta, clamped to the valid
/// range `[0, initial]`.
pub(crate) fn requantify(current: i32, mortality_delta: i32, initial: i32) -> i32 {
    (current - mortality_delta).clamp(0, initial)
}

impl DailyLogService {
    pub fn new(
        daily_log_repo: DailyLogRepository,
        batch_repo: BatchRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            daily_log_repo,
            batch_repo,
            clock,
        }
    }

    /// Records the day's log and decrements the owning batch's quantity by
    /// the mortality count (floored at zero), atomically.
    pub async fn record<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
        recorded_by: Uuid,
        input: DailyLogInput,
    ) -> Result<DailyLog, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let batch = self
            .batch_repo
            .get_for_update(&mut *tx, team_id, batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Batch not found.".to_string()))?;

        if self
            .daily_log_repo
            .find_by_batch_and_date(&mut *tx, team_id, batch_id, input.log_date)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A daily log already exists for this batch and date.".to_string(),
            ));
        }

        let log = self
            .daily_log_repo
            .create(
                &mut *tx,
                team_id,
                batch_id,
                input.log_date,
                input.mortality_count,
                input.feed_consumed_kg,
                input.env,
                recorded_by,
                input.notes.as_deref(),
            )
            .await?;

        let new_quantity = requantify(
            batch.remaining_quantity(),
            input.mortality_count,
            batch.initial_quantity,
        );
        self.batch_repo
            .set_current_quantity(&mut *tx, team_id, batch_id, new_quantity)
            .await?;

        tx.commit().await?;
        Ok(log)
    }

    /// Edits a log within its same-day window and requantifies the batch by
    /// the DIFFERENCE between the new and old mortality counts.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        log_id: Uuid,
        input: DailyLogUpdate,
    ) -> Result<DailyLog, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let existing = self
            .daily_log_repo
            .get(&mut *tx, team_id, log_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Daily log not found.".to_string()))?;

        if !existing.is_editable_on(self.clock.today()) {
            return Err(AppError::EditWindowClosed);
        }

        let batch = self
            .batch_repo
            .get_for_update(&mut *tx, team_id, existing.batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Batch not found.".to_string()))?;

        let log = self
            .daily_log_repo
            .update(
                &mut *tx,
                team_id,
                log_id,
                input.mortality_count,
                input.feed_consumed_kg,
                input.env,
                input.notes.as_deref(),
            )
            .await?;

        let delta = input.mortality_count - existing.mortality_count;
        let new_quantity = requantify(batch.remaining_quantity(), delta, batch.initial_quantity);
        self.batch_repo
            .set_current_quantity(&mut *tx, team_id, existing.batch_id, new_quantity)
            .await?;

        tx.commit().await?;
        Ok(log)
    }

    pub async fn list_for_batch<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Vec<DailyLog>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.daily_log_repo
            .list_for_batch(executor, team_id, batch_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::requantify;

    #[test]
    fn mortality_floors_at_zero() {
        // Recording mortality M on quantity Q yields max(0, Q - M).
        assert_eq!(requantify(950, 30, 1000), 920);
        assert_eq!(requantify(10, 25, 1000), 0);
        assert_eq!(requantify(0, 5, 1000), 0);
    }

    #[test]
    fn corrections_never_exceed_initial_quantity() {
        // A downward-revised mortality count restores birds, but never
        // above the initial placement.
        assert_eq!(requantify(990, -5, 1000), 995);
        assert_eq!(requantify(998, -10, 1000), 1000);
    }
}
