// src/services/expense_service.rs

use chrono::NaiveDate;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BatchRepository, ExpenseRepository},
    models::expense::{AllocatableKind, Expense, ExpenseCategory},
};

#[derive(Clone)]
pub struct ExpenseService {
    expense_repo: ExpenseRepository,
    batch_repo: BatchRepository,
}

#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub description: String,
    pub category: ExpenseCategory,
    pub amount_cents: i64,
    pub expense_date: NaiveDate,
    pub batch_id: Option<Uuid>,
}

impl ExpenseService {
    pub fn new(expense_repo: ExpenseRepository, batch_repo: BatchRepository) -> Self {
        Self {
            expense_repo,
            batch_repo,
        }
    }

    /// Records an expense, optionally allocated to a batch for
    /// cost-accounting. The batch must exist; expenses left unallocated are
    /// excluded from batch-level cost metrics.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        input: CreateExpenseInput,
    ) -> Result<Expense, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let allocated_to = match input.batch_id {
            Some(batch_id) => {
                self.batch_repo
                    .get(&mut *tx, team_id, batch_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Batch not found.".to_string()))?;
                Some((AllocatableKind::Batch, batch_id))
            }
            None => None,
        };

        let expense = self
            .expense_repo
            .create(
                &mut *tx,
                team_id,
                &input.description,
                input.category,
                input.amount_cents,
                input.expense_date,
                allocated_to,
            )
            .await?;

        tx.commit().await?;
        Ok(expense)
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Option<Uuid>,
    ) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        match batch_id {
            Some(batch_id) => {
                self.expense_repo
                    .list_for_batch(executor, team_id, batch_id)
                    .await
            }
            None => self.expense_repo.list_for_team(executor, team_id).await,
        }
    }
}
