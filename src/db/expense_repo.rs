// src/db/expense_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::expense::{AllocatableKind, Expense, ExpenseCategory},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseRepository;

impl ExpenseRepository {
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        description: &str,
        category: ExpenseCategory,
        amount_cents: i64,
        expense_date: NaiveDate,
        allocated_to: Option<(AllocatableKind, Uuid)>,
    ) -> Result<Expense, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (kind, id) = match allocated_to {
            Some((kind, id)) => (Some(kind), Some(id)),
            None => (None, None),
        };
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses
                (team_id, description, category, amount_cents, expense_date,
                 allocated_to_kind, allocated_to_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(description)
        .bind(category)
        .bind(amount_cents)
        .bind(expense_date)
        .bind(kind)
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(expense)
    }

    pub async fn list_for_team<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
    ) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE team_id = $1 ORDER BY expense_date DESC",
        )
        .bind(team_id)
        .fetch_all(executor)
        .await?;
        Ok(expenses)
    }

    /// Expenses allocated to a batch through the tagged reference.
    /// Unallocated expenses never count towards batch-level cost metrics.
    pub async fn list_for_batch<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses
             WHERE team_id = $1 AND allocated_to_kind = $2 AND allocated_to_id = $3
             ORDER BY expense_date ASC",
        )
        .bind(team_id)
        .bind(AllocatableKind::Batch)
        .bind(batch_id)
        .fetch_all(executor)
        .await?;
        Ok(expenses)
    }
}
