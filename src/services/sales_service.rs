// src/services/sales_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BatchRepository, ProductRepository, SalesRepository},
    models::{
        product::{ProductKind, StockMovementReason},
        sales::{LiveSaleRecord, PortioningRecord},
    },
};

/// Live sales (birds straight out of a batch) and portioning (whole birds
/// converted into pieces packs). Both reject deductions that exceed the
/// available quantity.
#[derive(Clone)]
pub struct SalesService {
    sales_repo: SalesRepository,
    batch_repo: BatchRepository,
    product_repo: ProductRepository,
}

#[derive(Debug, Clone)]
pub struct LiveSaleInput {
    pub batch_id: Uuid,
    pub sale_date: NaiveDate,
    pub quantity: i32,
    pub unit_price_cents: Option<i64>,
    pub customer_id: Option<Uuid>,
    pub recorded_by: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct PortioningInput {
    pub portioning_date: NaiveDate,
    pub whole_birds_used: i32,
    pub packs_produced: i32,
    pub pack_weight_kg: Option<Decimal>,
    pub recorded_by: Option<Uuid>,
}

impl SalesService {
    pub fn new(
        sales_repo: SalesRepository,
        batch_repo: BatchRepository,
        product_repo: ProductRepository,
    ) -> Self {
        Self {
            sales_repo,
            batch_repo,
            product_repo,
        }
    }

    /// Sells live birds out of a batch. When no unit price is supplied, the
    /// team's live-bird product default price is used; a team with no priced
    /// live-bird product cannot record an unpriced sale.
    pub async fn record_live_sale<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        input: LiveSaleInput,
    ) -> Result<LiveSaleRecord, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let batch = self
            .batch_repo
            .get_for_update(&mut *tx, team_id, input.batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Batch not found.".to_string()))?;

        let available = batch.remaining_quantity();
        if input.quantity > available {
            return Err(AppError::InsufficientStock(format!(
                "Batch {} has only {} birds available, {} requested.",
                batch.batch_number, available, input.quantity
            )));
        }

        let unit_price_cents = match input.unit_price_cents {
            Some(price) => price,
            None => self
                .product_repo
                .get_by_kind_for_update(&mut *tx, team_id, ProductKind::LiveBird)
                .await?
                .and_then(|p| p.default_price_cents)
                .ok_or(AppError::MissingPricing)?,
        };

        self.batch_repo
            .set_current_quantity(&mut *tx, team_id, batch.id, available - input.quantity)
            .await?;

        let record = self
            .sales_repo
            .create_live_sale(
                &mut *tx,
                team_id,
                input.batch_id,
                input.sale_date,
                input.quantity,
                unit_price_cents,
                input.customer_id,
                input.recorded_by,
            )
            .await?;

        tx.commit().await?;
        Ok(record)
    }

    /// Converts whole processed birds into retail packs: whole-bird stock
    /// down, pieces stock up, both movements ledgered.
    pub async fn record_portioning<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        input: PortioningInput,
    ) -> Result<PortioningRecord, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let whole = self
            .product_repo
            .get_by_kind_for_update(&mut *tx, team_id, ProductKind::WholeBird)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No whole-bird product found for the team.".to_string())
            })?;

        let used = Decimal::from(input.whole_birds_used);
        if used > whole.stock_quantity {
            return Err(AppError::InsufficientStock(format!(
                "Whole-bird stock has only {} units available, {} requested.",
                whole.stock_quantity, input.whole_birds_used
            )));
        }

        let pieces = self
            .product_repo
            .get_by_kind_for_update(&mut *tx, team_id, ProductKind::Pieces)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No pieces product found for the team.".to_string())
            })?;

        self.product_repo
            .adjust_stock(&mut *tx, team_id, whole.id, -used)
            .await?;
        self.product_repo
            .record_movement(
                &mut *tx,
                team_id,
                whole.id,
                -used,
                StockMovementReason::PortioningOut,
                Some("Portioned into packs"),
            )
            .await?;

        let produced = Decimal::from(input.packs_produced);
        self.product_repo
            .adjust_stock(&mut *tx, team_id, pieces.id, produced)
            .await?;
        self.product_repo
            .record_movement(
                &mut *tx,
                team_id,
                pieces.id,
                produced,
                StockMovementReason::PortioningIn,
                Some("Packs from portioning"),
            )
            .await?;

        let record = self
            .sales_repo
            .create_portioning(
                &mut *tx,
                team_id,
                input.portioning_date,
                input.whole_birds_used,
                input.packs_produced,
                input.pack_weight_kg,
                input.recorded_by,
            )
            .await?;

        tx.commit().await?;
        Ok(record)
    }
}
