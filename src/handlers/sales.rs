// src/handlers/sales.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::batches::validate_not_negative,
    middleware::tenancy::TeamContext,
    models::sales::{LiveSaleRecord, PortioningRecord},
    services::sales_service::{LiveSaleInput, PortioningInput},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiveSalePayload {
    pub batch_id: Uuid,

    #[schema(value_type = String, format = Date)]
    pub sale_date: NaiveDate,

    #[validate(range(min = 1, message = "The quantity must be at least 1."))]
    pub quantity: i32,

    // Defaults to the team's live-bird product price when omitted.
    #[validate(range(min = 0, message = "The unit price cannot be negative."))]
    pub unit_price_cents: Option<i64>,

    pub customer_id: Option<Uuid>,
    pub recorded_by: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/sales/live",
    tag = "Sales",
    request_body = LiveSalePayload,
    responses(
        (status = 201, description = "Live sale recorded; batch quantity decremented", body = LiveSaleRecord),
        (status = 422, description = "Insufficient stock or no price available")
    ),
    params(("x-team-id" = Uuid, Header, description = "Team ID"))
)]
pub async fn record_live_sale(
    State(app_state): State<AppState>,
    team: TeamContext,
    Json(payload): Json<LiveSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let record = app_state
        .sales_service
        .record_live_sale(
            &app_state.db_pool,
            team.0,
            LiveSaleInput {
                batch_id: payload.batch_id,
                sale_date: payload.sale_date,
                quantity: payload.quantity,
                unit_price_cents: payload.unit_price_cents,
                customer_id: payload.customer_id,
                recorded_by: payload.recorded_by,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortioningPayload {
    #[schema(value_type = String, format = Date)]
    pub portioning_date: NaiveDate,

    #[validate(range(min = 1, message = "At least one whole bird is required."))]
    pub whole_birds_used: i32,

    #[validate(range(min = 1, message = "At least one pack must be produced."))]
    pub packs_produced: i32,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<String>)]
    pub pack_weight_kg: Option<Decimal>,

    pub recorded_by: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/sales/portioning",
    tag = "Sales",
    request_body = PortioningPayload,
    responses(
        (status = 201, description = "Portioning recorded; whole-bird stock down, pieces stock up", body = PortioningRecord),
        (status = 422, description = "Insufficient whole-bird stock")
    ),
    params(("x-team-id" = Uuid, Header, description = "Team ID"))
)]
pub async fn record_portioning(
    State(app_state): State<AppState>,
    team: TeamContext,
    Json(payload): Json<PortioningPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let record = app_state
        .sales_service
        .record_portioning(
            &app_state.db_pool,
            team.0,
            PortioningInput {
                portioning_date: payload.portioning_date,
                whole_birds_used: payload.whole_birds_used,
                packs_produced: payload.packs_produced,
                pack_weight_kg: payload.pack_weight_kg,
                recorded_by: payload.recorded_by,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}
