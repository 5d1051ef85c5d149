// src/handlers/daily_logs.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::daily_log_repo::EnvReadings,
    handlers::batches::validate_not_negative,
    middleware::tenancy::TeamContext,
    models::daily_log::DailyLog,
    services::daily_log_service::{DailyLogInput, DailyLogUpdate},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogPayload {
    #[schema(value_type = String, format = Date)]
    pub log_date: NaiveDate,

    #[validate(range(min = 0, message = "The mortality count cannot be negative."))]
    pub mortality_count: i32,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(value_type = String)]
    pub feed_consumed_kg: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<String>)]
    pub water_consumed_l: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub temperature_c: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<String>)]
    pub humidity_pct: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<String>)]
    pub ammonia_ppm: Option<Decimal>,

    pub recorded_by: Uuid,
    pub notes: Option<String>,
}

impl DailyLogPayload {
    fn into_input(self) -> DailyLogInput {
        DailyLogInput {
            log_date: self.log_date,
            mortality_count: self.mortality_count,
            feed_consumed_kg: self.feed_consumed_kg,
            env: EnvReadings {
                water_consumed_l: self.water_consumed_l,
                temperature_c: self.temperature_c,
                humidity_pct: self.humidity_pct,
                ammonia_ppm: self.ammonia_ppm,
            },
            notes: self.notes,
        }
    }
}

// The update payload carries no date and no recorder: a log stays pinned
// to its original day and author, only its figures can be corrected.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDailyLogPayload {
    #[validate(range(min = 0, message = "The mortality count cannot be negative."))]
    pub mortality_count: i32,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(value_type = String)]
    pub feed_consumed_kg: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<String>)]
    pub water_consumed_l: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub temperature_c: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<String>)]
    pub humidity_pct: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<String>)]
    pub ammonia_ppm: Option<Decimal>,

    pub notes: Option<String>,
}

impl UpdateDailyLogPayload {
    fn into_update(self) -> DailyLogUpdate {
        DailyLogUpdate {
            mortality_count: self.mortality_count,
            feed_consumed_kg: self.feed_consumed_kg,
            env: EnvReadings {
                water_consumed_l: self.water_consumed_l,
                temperature_c: self.temperature_c,
                humidity_pct: self.humidity_pct,
                ammonia_ppm: self.ammonia_ppm,
            },
            notes: self.notes,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/batches/{id}/daily-logs",
    tag = "Daily logs",
    request_body = DailyLogPayload,
    responses(
        (status = 201, description = "Daily log recorded; batch quantity decremented by mortality", body = DailyLog),
        (status = 409, description = "A log already exists for this batch and date")
    ),
    params(
        ("id" = Uuid, Path, description = "Batch ID"),
        ("x-team-id" = Uuid, Header, description = "Team ID")
    )
)]
pub async fn create_daily_log(
    State(app_state): State<AppState>,
    team: TeamContext,
    Path(batch_id): Path<Uuid>,
    Json(payload): Json<DailyLogPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let recorded_by = payload.recorded_by;
    let log = app_state
        .daily_log_service
        .record(
            &app_state.db_pool,
            team.0,
            batch_id,
            recorded_by,
            payload.into_input(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(log)))
}

#[utoipa::path(
    get,
    path = "/api/batches/{id}/daily-logs",
    tag = "Daily logs",
    responses((status = 200, description = "Daily logs for the batch, oldest first", body = Vec<DailyLog>)),
    params(
        ("id" = Uuid, Path, description = "Batch ID"),
        ("x-team-id" = Uuid, Header, description = "Team ID")
    )
)]
pub async fn list_daily_logs(
    State(app_state): State<AppState>,
    team: TeamContext,
    Path(batch_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let logs = app_state
        .daily_log_service
        .list_for_batch(&app_state.db_pool, team.0, batch_id)
        .await?;
    Ok((StatusCode::OK, Json(logs)))
}

#[utoipa::path(
    put,
    path = "/api/daily-logs/{id}",
    tag = "Daily logs",
    request_body = UpdateDailyLogPayload,
    responses(
        (status = 200, description = "Daily log updated; batch requantified by the mortality difference", body = DailyLog),
        (status = 422, description = "Edit window closed")
    ),
    params(
        ("id" = Uuid, Path, description = "Daily log ID"),
        ("x-team-id" = Uuid, Header, description = "Team ID")
    )
)]
pub async fn update_daily_log(
    State(app_state): State<AppState>,
    team: TeamContext,
    Path(log_id): Path<Uuid>,
    Json(payload): Json<UpdateDailyLogPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let log = app_state
        .daily_log_service
        .update(&app_state.db_pool, team.0, log_id, payload.into_update())
        .await?;

    Ok((StatusCode::OK, Json(log)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_payload_rejects_date_and_recorder_changes_by_shape() {
        // PUT bodies carry only correctable figures; logDate and
        // recordedBy are not part of the update contract.
        let payload: UpdateDailyLogPayload = serde_json::from_value(json!({
            "mortalityCount": 3,
            "feedConsumedKg": 120.5,
            "notes": "corrected feed figure"
        }))
        .unwrap();
        assert_eq!(payload.mortality_count, 3);
        assert_eq!(payload.notes.as_deref(), Some("corrected feed figure"));
    }
}
