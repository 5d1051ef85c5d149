// src/handlers/slaughter.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TeamContext,
    models::slaughter::{DiscrepancyReason, SlaughterRecordDetail},
    services::slaughter_service::{RecordSlaughterInput, SourceInput, YieldInput},
};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourcePayload {
    pub batch_id: Uuid,

    #[validate(range(min = 1, message = "The expected quantity must be at least 1."))]
    pub expected_quantity: i32,

    #[validate(range(min = 0, message = "The actual quantity cannot be negative."))]
    pub actual_quantity: i32,

    pub discrepancy_reason_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YieldPayload {
    pub product_id: Uuid,

    #[validate(range(min = 0, message = "The estimated quantity cannot be negative."))]
    pub estimated_quantity: i32,

    #[validate(range(min = 0, message = "The actual quantity cannot be negative."))]
    pub actual_quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordSlaughterPayload {
    #[schema(value_type = String, format = Date)]
    pub slaughter_date: NaiveDate,

    #[validate(length(min = 1, message = "At least one source batch is required."), nested)]
    pub sources: Vec<SourcePayload>,

    #[validate(nested)]
    pub yields: Vec<YieldPayload>,

    pub recorded_by: Uuid,
    pub notes: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/slaughters",
    tag = "Slaughter",
    request_body = RecordSlaughterPayload,
    responses(
        (status = 201, description = "Slaughter session recorded with nested sources and yields", body = SlaughterRecordDetail),
        (status = 422, description = "A source batch has insufficient stock")
    ),
    params(("x-team-id" = Uuid, Header, description = "Team ID"))
)]
pub async fn record_slaughter(
    State(app_state): State<AppState>,
    team: TeamContext,
    Json(payload): Json<RecordSlaughterPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = app_state
        .slaughter_service
        .record(
            &app_state.db_pool,
            team.0,
            payload.recorded_by,
            RecordSlaughterInput {
                slaughter_date: payload.slaughter_date,
                sources: payload
                    .sources
                    .into_iter()
                    .map(|s| SourceInput {
                        batch_id: s.batch_id,
                        expected_quantity: s.expected_quantity,
                        actual_quantity: s.actual_quantity,
                        discrepancy_reason_id: s.discrepancy_reason_id,
                        notes: s.notes,
                    })
                    .collect(),
                yields: payload
                    .yields
                    .into_iter()
                    .map(|y| YieldInput {
                        product_id: y.product_id,
                        estimated_quantity: y.estimated_quantity,
                        actual_quantity: y.actual_quantity,
                    })
                    .collect(),
                notes: payload.notes,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// ---
// Discrepancy reason catalogue
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReasonPayload {
    #[validate(length(min = 1, message = "The label is required."))]
    pub label: String,

    #[serde(default)]
    pub notify_manager: bool,
}

#[utoipa::path(
    post,
    path = "/api/slaughters/discrepancy-reasons",
    tag = "Slaughter",
    request_body = CreateReasonPayload,
    responses((status = 201, description = "Discrepancy reason created", body = DiscrepancyReason)),
    params(("x-team-id" = Uuid, Header, description = "Team ID"))
)]
pub async fn create_discrepancy_reason(
    State(app_state): State<AppState>,
    team: TeamContext,
    Json(payload): Json<CreateReasonPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let reason = app_state
        .slaughter_repo
        .create_reason(
            &app_state.db_pool,
            team.0,
            &payload.label,
            payload.notify_manager,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(reason)))
}

#[utoipa::path(
    get,
    path = "/api/slaughters/discrepancy-reasons",
    tag = "Slaughter",
    responses((status = 200, description = "Discrepancy reasons for the team", body = Vec<DiscrepancyReason>)),
    params(("x-team-id" = Uuid, Header, description = "Team ID"))
)]
pub async fn list_discrepancy_reasons(
    State(app_state): State<AppState>,
    team: TeamContext,
) -> Result<impl IntoResponse, AppError> {
    let reasons = app_state
        .slaughter_repo
        .list_reasons(&app_state.db_pool, team.0)
        .await?;
    Ok((StatusCode::OK, Json(reasons)))
}
