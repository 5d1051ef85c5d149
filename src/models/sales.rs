// src/models/sales.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Sale of live birds straight out of a batch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiveSaleRecord {
    pub id: Uuid,

    #[schema(ignore)]
    pub team_id: Uuid,

    pub batch_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-02-10")]
    pub sale_date: NaiveDate,

    #[schema(example = 50)]
    pub quantity: i32,

    // Minor currency units (cents).
    #[schema(example = 2500)]
    pub unit_price_cents: i64,

    pub customer_id: Option<Uuid>,
    pub recorded_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

// Conversion of whole processed birds into smaller retail packs:
// decrements whole-bird stock, increments pieces stock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortioningRecord {
    pub id: Uuid,

    #[schema(ignore)]
    pub team_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-02-15")]
    pub portioning_date: NaiveDate,

    #[schema(example = 20)]
    pub whole_birds_used: i32,

    #[schema(example = 60)]
    pub packs_produced: i32,

    #[schema(value_type = Option<String>, example = "0.5")]
    pub pack_weight_kg: Option<Decimal>,

    pub recorded_by: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}
