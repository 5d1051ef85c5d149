// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::product::{Product, ProductKind, StockMovement, StockMovementReason},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductRepository;

impl ProductRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        name: &str,
        kind: ProductKind,
        default_price_cents: Option<i64>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (team_id, name, kind, default_price_cents, stock_quantity)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(name)
        .bind(kind)
        .bind(default_price_cents)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    pub async fn list<'e, E>(&self, executor: E, team_id: Uuid) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE team_id = $1 ORDER BY name ASC",
        )
        .bind(team_id)
        .fetch_all(executor)
        .await?;
        Ok(products)
    }

    pub async fn get_for_update<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE team_id = $1 AND id = $2 FOR UPDATE",
        )
        .bind(team_id)
        .bind(product_id)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    /// First product of the given kind, row-locked. Portioning and live-sale
    /// pricing address products by role rather than by id.
    pub async fn get_by_kind_for_update<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        kind: ProductKind,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products
             WHERE team_id = $1 AND kind = $2
             ORDER BY created_at ASC
             LIMIT 1
             FOR UPDATE",
        )
        .bind(team_id)
        .bind(kind)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    pub async fn adjust_stock<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        product_id: Uuid,
        quantity_delta: Decimal,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products
             SET stock_quantity = stock_quantity + $3, updated_at = now()
             WHERE team_id = $1 AND id = $2
             RETURNING *",
        )
        .bind(team_id)
        .bind(product_id)
        .bind(quantity_delta)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        product_id: Uuid,
        quantity_delta: Decimal,
        reason: StockMovementReason,
        notes: Option<&str>,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements (team_id, product_id, quantity_delta, reason, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(team_id)
        .bind(product_id)
        .bind(quantity_delta)
        .bind(reason)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }
}
