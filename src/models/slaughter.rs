// src/models/slaughter.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// A slaughter session drawing birds from one or more batches and
// producing product yields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlaughterRecord {
    pub id: Uuid,

    #[schema(ignore)]
    pub team_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-02-14")]
    pub slaughter_date: NaiveDate,

    pub recorded_by: Uuid,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Expected vs. actual bird count drawn from one batch for a session.
// A shortfall (actual < expected) is a discrepancy that must be explained
// and may notify the team's farm managers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlaughterBatchSource {
    pub id: Uuid,
    pub slaughter_record_id: Uuid,
    pub batch_id: Uuid,

    #[schema(example = 200)]
    pub expected_quantity: i32,
    #[schema(example = 197)]
    pub actual_quantity: i32,

    pub discrepancy_reason_id: Option<Uuid>,
    pub notes: Option<String>,
}

impl SlaughterBatchSource {
    pub fn shortfall(&self) -> i32 {
        (self.expected_quantity - self.actual_quantity).max(0)
    }
}

// Estimated vs. actual product quantity for a session.
// household_consumed = max(0, estimated - actual).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlaughterYield {
    pub id: Uuid,
    pub slaughter_record_id: Uuid,
    pub product_id: Uuid,

    #[schema(example = 200)]
    pub estimated_quantity: i32,
    #[schema(example = 195)]
    pub actual_quantity: i32,
    #[schema(example = 5)]
    pub household_consumed: i32,
}

// Team-configured catalogue of discrepancy explanations. `notify_manager`
// flags the ones serious enough to alert the farm managers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscrepancyReason {
    pub id: Uuid,

    #[schema(ignore)]
    pub team_id: Uuid,

    #[schema(example = "Theft suspected")]
    pub label: String,

    pub notify_manager: bool,
}

// Full session as returned to the client: the record with its nested
// sources and yields.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlaughterRecordDetail {
    #[serde(flatten)]
    pub record: SlaughterRecord,
    pub sources: Vec<SlaughterBatchSource>,
    pub yields: Vec<SlaughterYield>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_is_never_negative() {
        let source = SlaughterBatchSource {
            id: Uuid::new_v4(),
            slaughter_record_id: Uuid::new_v4(),
            batch_id: Uuid::new_v4(),
            expected_quantity: 190,
            actual_quantity: 200,
            discrepancy_reason_id: None,
            notes: None,
        };
        assert_eq!(source.shortfall(), 0);
    }
}
