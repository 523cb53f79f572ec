// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::query::PeriodQuery,
    middleware::tenancy::TenantContext,
    models::products::{CreateProductRequest, Product, ProductPricing, QuoteRequest, UpdateProductRequest},
};

// GET /api/products
pub async fn list_products(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state.product_service.list(tenant.0).await?;
    Ok(Json(products))
}

// POST /api/products
pub async fn create_product(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    payload.validate()?;
    let product = app_state.product_service.create(tenant.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
pub async fn update_product(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>, AppError> {
    payload.validate()?;
    let product = app_state.product_service.update(tenant.0, id, &payload).await?;
    Ok(Json(product))
}

// DELETE /api/products/{id}
pub async fn delete_product(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.product_service.delete(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/products/{id}/pricing?year=&month=
pub async fn get_pricing(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<ProductPricing>, AppError> {
    let (year, month) = period.resolve()?;
    let pricing = app_state.product_service.pricing(tenant.0, id, year, month).await?;
    Ok(Json(pricing))
}

// POST /api/products/quote?year=&month=
pub async fn quote(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(period): Query<PeriodQuery>,
    Json(payload): Json<QuoteRequest>,
) -> Result<Json<ProductPricing>, AppError> {
    payload.validate()?;
    let (year, month) = period.resolve()?;
    let pricing = app_state.product_service.quote(tenant.0, &payload, year, month).await?;
    Ok(Json(pricing))
}
