// src/handlers/products.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TeamContext,
    models::product::{Product, ProductKind},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "The name is required."))]
    pub name: String,

    pub kind: ProductKind,

    #[validate(range(min = 0, message = "The price cannot be negative."))]
    pub default_price_cents: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductPayload,
    responses((status = 201, description = "Product created with zero stock", body = Product)),
    params(("x-team-id" = Uuid, Header, description = "Team ID"))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    team: TeamContext,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .product_repo
        .create(
            &app_state.db_pool,
            team.0,
            &payload.name,
            payload.kind,
            payload.default_price_cents,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses((status = 200, description = "Products for the team", body = Vec<Product>)),
    params(("x-team-id" = Uuid, Header, description = "Team ID"))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    team: TeamContext,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .product_repo
        .list(&app_state.db_pool, team.0)
        .await?;
    Ok((StatusCode::OK, Json(products)))
}
