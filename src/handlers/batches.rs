// src/handlers/batches.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TeamContext,
    models::{batch::Batch, stats::BatchStatistics},
    services::batch_service::{CloseBatchInput, CreateBatchInput},
};

// ---
// Custom validation
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("The value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || val.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("The value must be positive.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchPayload {
    #[validate(length(min = 1, message = "The name is required."))]
    pub name: String,

    // Generated (team- and year-scoped) when omitted.
    pub batch_number: Option<String>,

    pub supplier_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub expected_end_date: Option<NaiveDate>,

    #[validate(range(min = 1, message = "The initial quantity must be at least 1."))]
    pub initial_quantity: i32,

    #[validate(custom(function = "validate_positive"))]
    pub target_weight_kg: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloseBatchPayload {
    #[validate(custom(function = "validate_positive"))]
    pub average_weight_kg: Decimal,

    #[validate(range(min = 0, message = "The manure bag count cannot be negative."))]
    pub manure_bags_collected: Option<i32>,

    pub closure_reason: Option<String>,
    pub closure_notes: Option<String>,
}

// ---
// Handlers
// ---

#[utoipa::path(
    post,
    path = "/api/batches",
    tag = "Batches",
    request_body = CreateBatchPayload,
    responses(
        (status = 201, description = "Batch created in Planned status", body = Batch),
        (status = 400, description = "Invalid payload")
    ),
    params(("x-team-id" = Uuid, Header, description = "Team ID"))
)]
pub async fn create_batch(
    State(app_state): State<AppState>,
    team: TeamContext,
    Json(payload): Json<CreateBatchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let batch = app_state
        .batch_service
        .create_batch(
            &app_state.db_pool,
            team.0,
            CreateBatchInput {
                name: payload.name,
                batch_number: payload.batch_number,
                supplier_id: payload.supplier_id,
                start_date: payload.start_date,
                expected_end_date: payload.expected_end_date,
                initial_quantity: payload.initial_quantity,
                target_weight_kg: payload.target_weight_kg,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(batch)))
}

#[utoipa::path(
    get,
    path = "/api/batches",
    tag = "Batches",
    responses((status = 200, description = "All batches for the team", body = Vec<Batch>)),
    params(("x-team-id" = Uuid, Header, description = "Team ID"))
)]
pub async fn list_batches(
    State(app_state): State<AppState>,
    team: TeamContext,
) -> Result<impl IntoResponse, AppError> {
    let batches = app_state
        .batch_service
        .list(&app_state.db_pool, team.0)
        .await?;
    Ok((StatusCode::OK, Json(batches)))
}

#[utoipa::path(
    get,
    path = "/api/batches/{id}",
    tag = "Batches",
    responses(
        (status = 200, description = "The batch", body = Batch),
        (status = 404, description = "Batch not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Batch ID"),
        ("x-team-id" = Uuid, Header, description = "Team ID")
    )
)]
pub async fn get_batch(
    State(app_state): State<AppState>,
    team: TeamContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let batch = app_state
        .batch_service
        .get(&app_state.db_pool, team.0, id)
        .await?;
    Ok((StatusCode::OK, Json(batch)))
}

#[utoipa::path(
    get,
    path = "/api/batches/{id}/statistics",
    tag = "Batches",
    responses(
        (status = 200, description = "Derived KPI report for the batch", body = BatchStatistics),
        (status = 404, description = "Batch not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Batch ID"),
        ("x-team-id" = Uuid, Header, description = "Team ID")
    )
)]
pub async fn get_batch_statistics(
    State(app_state): State<AppState>,
    team: TeamContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state
        .batch_service
        .get_statistics(&app_state.db_pool, team.0, id)
        .await?;
    Ok((StatusCode::OK, Json(stats)))
}

#[utoipa::path(
    post,
    path = "/api/batches/{id}/activate",
    tag = "Batches",
    responses(
        (status = 200, description = "Batch activated", body = Batch),
        (status = 422, description = "Guard failure (wrong state or missing precondition)")
    ),
    params(
        ("id" = Uuid, Path, description = "Batch ID"),
        ("x-team-id" = Uuid, Header, description = "Team ID")
    )
)]
pub async fn activate_batch(
    State(app_state): State<AppState>,
    team: TeamContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let batch = app_state
        .batch_service
        .activate(&app_state.db_pool, team.0, id)
        .await?;
    Ok((StatusCode::OK, Json(batch)))
}

#[utoipa::path(
    post,
    path = "/api/batches/{id}/start-harvesting",
    tag = "Batches",
    responses(
        (status = 200, description = "Batch moved to Harvesting", body = Batch),
        (status = 422, description = "Guard failure (wrong state)")
    ),
    params(
        ("id" = Uuid, Path, description = "Batch ID"),
        ("x-team-id" = Uuid, Header, description = "Team ID")
    )
)]
pub async fn start_harvesting(
    State(app_state): State<AppState>,
    team: TeamContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let batch = app_state
        .batch_service
        .start_harvesting(&app_state.db_pool, team.0, id)
        .await?;
    Ok((StatusCode::OK, Json(batch)))
}

#[utoipa::path(
    post,
    path = "/api/batches/{id}/close",
    tag = "Batches",
    request_body = CloseBatchPayload,
    responses(
        (status = 200, description = "Batch closed with final statistics", body = Batch),
        (status = 422, description = "Guard failure (wrong state or missing closure reason)")
    ),
    params(
        ("id" = Uuid, Path, description = "Batch ID"),
        ("x-team-id" = Uuid, Header, description = "Team ID")
    )
)]
pub async fn close_batch(
    State(app_state): State<AppState>,
    team: TeamContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<CloseBatchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let batch = app_state
        .batch_service
        .close(
            &app_state.db_pool,
            team.0,
            id,
            CloseBatchInput {
                average_weight_kg: payload.average_weight_kg,
                manure_bags_collected: payload.manure_bags_collected,
                closure_reason: payload.closure_reason,
                closure_notes: payload.closure_notes,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(batch)))
}
