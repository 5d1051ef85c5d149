// src/handlers/expenses.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TeamContext,
    models::expense::{Expense, ExpenseCategory},
    services::expense_service::CreateExpenseInput,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    #[validate(length(min = 1, message = "The description is required."))]
    pub description: String,

    pub category: ExpenseCategory,

    // Integer minor currency units (cents).
    #[validate(range(min = 0, message = "The amount cannot be negative."))]
    pub amount_cents: i64,

    #[schema(value_type = String, format = Date)]
    pub expense_date: NaiveDate,

    // Allocates the expense to a batch for cost accounting.
    pub batch_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExpensesQuery {
    pub batch_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Expenses",
    request_body = CreateExpensePayload,
    responses(
        (status = 201, description = "Expense recorded", body = Expense),
        (status = 404, description = "Allocated batch not found")
    ),
    params(("x-team-id" = Uuid, Header, description = "Team ID"))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    team: TeamContext,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let expense = app_state
        .expense_service
        .create(
            &app_state.db_pool,
            team.0,
            CreateExpenseInput {
                description: payload.description,
                category: payload.category,
                amount_cents: payload.amount_cents,
                expense_date: payload.expense_date,
                batch_id: payload.batch_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Expenses",
    responses((status = 200, description = "Expenses for the team, optionally filtered by batch", body = Vec<Expense>)),
    params(
        ("batchId" = Option<Uuid>, Query, description = "Restrict to one batch's allocated expenses"),
        ("x-team-id" = Uuid, Header, description = "Team ID")
    )
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    team: TeamContext,
    Query(query): Query<ListExpensesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let expenses = app_state
        .expense_service
        .list(&app_state.db_pool, team.0, query.batch_id)
        .await?;
    Ok((StatusCode::OK, Json(expenses)))
}
