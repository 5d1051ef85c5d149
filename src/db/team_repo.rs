// src/db/team_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct TeamRepository;

impl TeamRepository {
    pub fn new() -> Self {
        Self
    }

    /// User ids holding the farm-manager role on a team. These are the
    /// audience for slaughter discrepancy notifications.
    pub async fn farm_manager_ids<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM team_members
             WHERE team_id = $1 AND role = 'FARM_MANAGER'",
        )
        .bind(team_id)
        .fetch_all(executor)
        .await?;
        Ok(ids)
    }

    pub async fn create_notification<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        user_id: Uuid,
        kind: &str,
        message: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO notifications (team_id, user_id, kind, message)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(team_id)
        .bind(user_id)
        .bind(kind)
        .bind(message)
        .execute(executor)
        .await?;
        Ok(())
    }
}
