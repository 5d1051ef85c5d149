// src/models/batch.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// --- Status (mapping the Postgres enum) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "batch_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Planned,
    Active,
    Harvesting,
    Closed,
}

// --- Batch ---
// A cohort of birds raised together from placement to closure.
// `initial_quantity` and `batch_number` are fixed at creation;
// `current_quantity` is mutated only by the recording actions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: Uuid,

    #[schema(ignore)]
    pub team_id: Uuid,

    #[schema(example = "BATCH-2026-001")]
    pub batch_number: String,

    #[schema(example = "Shed 3 broilers")]
    pub name: String,

    pub supplier_id: Option<Uuid>,

    pub status: BatchStatus,

    #[schema(value_type = String, format = Date, example = "2026-01-05")]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = String, format = Date, example = "2026-02-16")]
    pub expected_end_date: Option<NaiveDate>,
    #[schema(value_type = String, format = Date)]
    pub actual_end_date: Option<NaiveDate>,

    #[schema(example = 1000)]
    pub initial_quantity: i32,
    // Nullable in the schema; activation backfills it from
    // initial_quantity when a row arrives without one.
    pub current_quantity: Option<i32>,

    #[schema(value_type = Option<String>, example = "2.4")]
    pub target_weight_kg: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "2.1")]
    pub average_weight_kg: Option<Decimal>,

    pub manure_bags_collected: Option<i32>,
    pub closure_reason: Option<String>,
    pub closure_notes: Option<String>,

    // Metrics report frozen at closure time.
    #[schema(value_type = Option<Object>)]
    pub final_statistics: Option<serde_json::Value>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Batch {
    /// Birds still accounted for. Falls back to the initial placement when
    /// the batch has never been requantified.
    pub fn remaining_quantity(&self) -> i32 {
        self.current_quantity.unwrap_or(self.initial_quantity)
    }

    // ---
    // State machine guards. Transitions are strictly linear
    // (Planned -> Active -> Harvesting -> Closed); anything else is
    // rejected with a message naming the required predecessor state.
    // ---

    pub fn ensure_can_activate(&self) -> Result<(), AppError> {
        if self.status != BatchStatus::Planned {
            return Err(AppError::InvalidTransition(
                "Only planned batches can be activated.".to_string(),
            ));
        }
        if self.start_date.is_none() {
            return Err(AppError::MissingPrecondition(
                "Batch cannot be activated without a start date.".to_string(),
            ));
        }
        if self.initial_quantity <= 0 {
            return Err(AppError::MissingPrecondition(
                "Batch cannot be activated without an initial quantity.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ensure_can_start_harvesting(&self) -> Result<(), AppError> {
        if self.status != BatchStatus::Active {
            return Err(AppError::InvalidTransition(
                "Only active batches can transition to Harvesting status.".to_string(),
            ));
        }
        Ok(())
    }

    /// Closing with birds unaccounted for requires an explanation of where
    /// they went (household consumption, theft, escape).
    pub fn ensure_can_close(&self, closure_reason: Option<&str>) -> Result<(), AppError> {
        if self.status != BatchStatus::Harvesting {
            return Err(AppError::InvalidTransition(
                "Only batches in Harvesting status can be closed.".to_string(),
            ));
        }
        if self.remaining_quantity() > 0 && closure_reason.is_none() {
            return Err(AppError::MissingClosureReason);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_batch(status: BatchStatus) -> Batch {
        let ts = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
        Batch {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            batch_number: "BATCH-2026-001".to_string(),
            name: "Shed 3 broilers".to_string(),
            supplier_id: None,
            status,
            start_date: Some(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()),
            expected_end_date: None,
            actual_end_date: None,
            initial_quantity: 1000,
            current_quantity: Some(1000),
            target_weight_kg: None,
            average_weight_kg: None,
            manure_bags_collected: None,
            closure_reason: None,
            closure_notes: None,
            final_statistics: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn activation_requires_planned_status() {
        let batch = base_batch(BatchStatus::Active);
        let err = batch.ensure_can_activate().unwrap_err();
        assert_eq!(err.to_string(), "Only planned batches can be activated.");
    }

    #[test]
    fn activation_requires_start_date() {
        let mut batch = base_batch(BatchStatus::Planned);
        batch.start_date = None;
        let err = batch.ensure_can_activate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Batch cannot be activated without a start date."
        );
    }

    #[test]
    fn harvesting_requires_active_status() {
        for status in [BatchStatus::Planned, BatchStatus::Harvesting, BatchStatus::Closed] {
            let batch = base_batch(status);
            let err = batch.ensure_can_start_harvesting().unwrap_err();
            assert_eq!(
                err.to_string(),
                "Only active batches can transition to Harvesting status."
            );
        }
    }

    #[test]
    fn close_rejects_non_harvesting_origins() {
        // Active -> Closed directly (skipping Harvesting) must fail.
        let batch = base_batch(BatchStatus::Active);
        let err = batch.ensure_can_close(Some("sold out")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Only batches in Harvesting status can be closed."
        );
    }

    #[test]
    fn close_with_birds_remaining_requires_reason() {
        let mut batch = base_batch(BatchStatus::Harvesting);
        batch.current_quantity = Some(10);
        let err = batch.ensure_can_close(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Closure reason is required when birds remain in the batch."
        );
        assert!(batch.ensure_can_close(Some("household consumption")).is_ok());
    }

    #[test]
    fn close_with_zero_birds_needs_no_reason() {
        let mut batch = base_batch(BatchStatus::Harvesting);
        batch.current_quantity = Some(0);
        assert!(batch.ensure_can_close(None).is_ok());
    }
}
