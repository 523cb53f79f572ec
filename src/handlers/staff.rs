// src/handlers/staff.rs

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
    models::staff::{CreateEmployeeCostRequest, EmployeeCost, UpdateEmployeeCostRequest},
};

// GET /api/employees
pub async fn list_employees(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<Vec<EmployeeCost>>, AppError> {
    Ok(Json(app_state.finance_service.list_employees(tenant.0).await?))
}

// POST /api/employees
pub async fn create_employee(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateEmployeeCostRequest>,
) -> Result<(StatusCode, Json<EmployeeCost>), AppError> {
    payload.validate()?;
    let employee = app_state.finance_service.create_employee(tenant.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

// PUT /api/employees/{id}
pub async fn update_employee(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeCostRequest>,
) -> Result<Json<EmployeeCost>, AppError> {
    payload.validate()?;
    let employee = app_state.finance_service.update_employee(tenant.0, id, &payload).await?;
    Ok(Json(employee))
}

// DELETE /api/employees/{id}
pub async fn delete_employee(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.finance_service.delete_employee(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
