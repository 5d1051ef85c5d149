// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "product_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductKind {
    LiveBird,
    WholeBird,
    Pieces,
    Other,
}

// Sellable product with an on-hand stock level. Slaughter yields feed
// whole-bird stock; portioning converts whole birds into pieces packs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,

    #[schema(ignore)]
    pub team_id: Uuid,

    #[schema(example = "Whole chicken")]
    pub name: String,

    pub kind: ProductKind,

    // Minor currency units (cents); the live-bird product's price is the
    // fallback for live sales recorded without an explicit unit price.
    #[schema(example = 2500)]
    pub default_price_cents: Option<i64>,

    #[schema(value_type = String, example = "42")]
    pub stock_quantity: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stock_movement_reason", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockMovementReason {
    SlaughterYield,
    PortioningIn,
    PortioningOut,
    Sale,
    Correction,
}

// Ledger entry written alongside every product stock change.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,

    #[schema(ignore)]
    pub team_id: Uuid,

    pub product_id: Uuid,

    #[schema(value_type = String, example = "-12")]
    pub quantity_delta: Decimal,

    pub reason: StockMovementReason,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}
