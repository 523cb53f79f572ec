// src/handlers/inventory.rs

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
    models::{
        dashboard::LowStockMaterial,
        inventory::{
            CreatePurchaseRequest, CreateRawMaterialRequest, RawMaterial, RawMaterialPurchase,
            SelectableMaterial, UpdateRawMaterialRequest,
        },
    },
};

// =============================================================================
//  MATÉRIAS-PRIMAS
// =============================================================================

// GET /api/raw-materials
pub async fn list_materials(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<Vec<RawMaterial>>, AppError> {
    let materials = app_state.inventory_service.list_materials(tenant.0).await?;
    Ok(Json(materials))
}

// POST /api/raw-materials
pub async fn create_material(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateRawMaterialRequest>,
) -> Result<(StatusCode, Json<RawMaterial>), AppError> {
    payload.validate()?;
    let material = app_state.inventory_service.create_material(tenant.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

// PUT /api/raw-materials/{id}
pub async fn update_material(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRawMaterialRequest>,
) -> Result<Json<RawMaterial>, AppError> {
    payload.validate()?;
    let material = app_state.inventory_service.update_material(tenant.0, id, &payload).await?;
    Ok(Json(material))
}

// DELETE /api/raw-materials/{id}
pub async fn delete_material(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.inventory_service.delete_material(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/raw-materials/selectable
pub async fn list_selectable(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<Vec<SelectableMaterial>>, AppError> {
    let materials = app_state.inventory_service.selectable(tenant.0).await?;
    Ok(Json(materials))
}

// GET /api/raw-materials/low-stock
pub async fn list_low_stock(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<Vec<LowStockMaterial>>, AppError> {
    let materials = app_state.inventory_service.low_stock(tenant.0).await?;
    Ok(Json(materials))
}

// =============================================================================
//  COMPRAS
// =============================================================================

// GET /api/purchases
pub async fn list_purchases(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<Vec<RawMaterialPurchase>>, AppError> {
    let purchases = app_state.inventory_service.list_purchases(tenant.0).await?;
    Ok(Json(purchases))
}

// POST /api/purchases
pub async fn create_purchase(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreatePurchaseRequest>,
) -> Result<(StatusCode, Json<RawMaterialPurchase>), AppError> {
    payload.validate()?;
    let purchase = app_state.inventory_service.register_purchase(tenant.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

// DELETE /api/purchases/{id}
pub async fn delete_purchase(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.inventory_service.delete_purchase(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
