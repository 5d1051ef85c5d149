// src/db/sales_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sales::{LiveSaleRecord, PortioningRecord},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SalesRepository;

impl SalesRepository {
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_live_sale<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        batch_id: Uuid,
        sale_date: NaiveDate,
        quantity: i32,
        unit_price_cents: i64,
        customer_id: Option<Uuid>,
        recorded_by: Option<Uuid>,
    ) -> Result<LiveSaleRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, LiveSaleRecord>(
            r#"
            INSERT INTO live_sale_records
                (team_id, batch_id, sale_date, quantity, unit_price_cents,
                 customer_id, recorded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(batch_id)
        .bind(sale_date)
        .bind(quantity)
        .bind(unit_price_cents)
        .bind(customer_id)
        .bind(recorded_by)
        .fetch_one(executor)
        .await?;
        Ok(record)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_portioning<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        portioning_date: NaiveDate,
        whole_birds_used: i32,
        packs_produced: i32,
        pack_weight_kg: Option<Decimal>,
        recorded_by: Option<Uuid>,
    ) -> Result<PortioningRecord, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, PortioningRecord>(
            r#"
            INSERT INTO portioning_records
                (team_id, portioning_date, whole_birds_used, packs_produced,
                 pack_weight_kg, recorded_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(portioning_date)
        .bind(whole_birds_used)
        .bind(packs_produced)
        .bind(pack_weight_kg)
        .bind(recorded_by)
        .fetch_one(executor)
        .await?;
        Ok(record)
    }
}
