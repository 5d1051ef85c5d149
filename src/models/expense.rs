// src/models/expense.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "expense_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Chicks,
    Feed,
    Medication,
    Labor,
    Utilities,
    Equipment,
    Other,
}

// Tagged reference to the entity an expense is allocated to.
// Only batches are allocatable today; the tag leaves room for more kinds
// without inheritance-style polymorphism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "allocatable_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocatableKind {
    Batch,
}

// A monetary allocation, optionally tied to a batch.
// Amounts are integer minor units (cents) end to end; no floating-point
// currency math anywhere.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,

    #[schema(ignore)]
    pub team_id: Uuid,

    #[schema(example = "Starter feed, 40 bags")]
    pub description: String,

    pub category: ExpenseCategory,

    #[schema(example = 475000)]
    pub amount_cents: i64,

    #[schema(value_type = String, format = Date, example = "2026-01-08")]
    pub expense_date: NaiveDate,

    pub allocated_to_kind: Option<AllocatableKind>,
    pub allocated_to_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}
