// src/handlers/sales.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::finance::{CreateSaleRequest, Sale, UpdateSaleRequest},
};

pub async fn list_sales(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<Vec<Sale>>, AppError> {
    Ok(Json(app_state.finance_service.list_sales(tenant.0).await?))
}

pub async fn create_sale(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<Sale>), AppError> {
    payload.validate()?;
    let sale = app_state.finance_service.create_sale(tenant.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn update_sale(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSaleRequest>,
) -> Result<Json<Sale>, AppError> {
    payload.validate()?;
    let sale = app_state.finance_service.update_sale(tenant.0, id, &payload).await?;
    Ok(Json(sale))
}

pub async fn delete_sale(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.finance_service.delete_sale(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
