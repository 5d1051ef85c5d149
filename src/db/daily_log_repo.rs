// src/db/daily_log_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::daily_log::DailyLog};

#[derive(Debug, Clone, Copy, Default)]
pub struct DailyLogRepository;

/// Optional environmental readings captured with a daily log.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvReadings {
    pub water_consumed_l: Option<Decimal>,
    pub temperature_c: Option<Decimal>,
    pub humidity_pct: Option<Decimal>,
    pub ammonia_ppm: Option<Decimal>,
}

impl DailyLogRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn get<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        log_id: Uuid,
    ) -> Result<Option<DailyLog>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let log = sqlx::query_as::<_, DailyLog>(
            "SELECT * FROM daily_logs WHERE team_id = $1 AND id = $2",
        )
        .bind(team_id)
        .bind(log_id)
        .fetch_optional(executor)
        .await?;
        Ok(log)
    }

    pub async fn find_by_batch_and_date<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
        log_date: NaiveDate,
    ) -> Result<Option<DailyLog>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let log = sqlx::query_as::<_, DailyLog>(
            "SELECT * FROM daily_logs
             WHERE team_id = $1 AND batch_id = $2 AND log_date = $3",
        )
        .bind(team_id)
        .bind(batch_id)
        .bind(log_date)
        .fetch_optional(executor)
        .await?;
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
        let logs = sqlx::query_as::<_, DailyLog>(
            "SELECT * FROM daily_logs
             WHERE team_id = $1 AND batch_id = $2
             ORDER BY log_date ASC",
        )
        .bind(team_id)
        .bind(batch_id)
        .fetch_all(executor)
        .await?;
        Ok(logs)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
        log_date: NaiveDate,
        mortality_count: i32,
        feed_consumed_kg: Decimal,
        env: EnvReadings,
        recorded_by: Uuid,
        notes: Option<&str>,
    ) -> Result<DailyLog, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let log = sqlx::query_as::<_, DailyLog>(
            r#"
            INSERT INTO daily_logs
                (team_id, batch_id, log_date, mortality_count, feed_consumed_kg,
                 water_consumed_l, temperature_c, humidity_pct, ammonia_ppm,
                 recorded_by, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(batch_id)
        .bind(log_date)
        .bind(mortality_count)
        .bind(feed_consumed_kg)
        .bind(env.water_consumed_l)
        .bind(env.temperature_c)
        .bind(env.humidity_pct)
        .bind(env.ammonia_ppm)
        .bind(recorded_by)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(log)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        log_id: Uuid,
        mortality_count: i32,
        feed_consumed_kg: Decimal,
        env: EnvReadings,
        notes: Option<&str>,
    ) -> Result<DailyLog, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let log = sqlx::query_as::<_, DailyLog>(
            r#"
            UPDATE daily_logs
            SET mortality_count = $3,
                feed_consumed_kg = $4,
                water_consumed_l = $5,
                temperature_c = $6,
                humidity_pct = $7,
                ammonia_ppm = $8,
                notes = $9,
                updated_at = now()
            WHERE team_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(log_id)
        .bind(mortality_count)
        .bind(feed_consumed_kg)
        .bind(env.water_consumed_l)
        .bind(env.temperature_c)
        .bind(env.humidity_pct)
        .bind(env.ammonia_ppm)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(log)
    }
}
