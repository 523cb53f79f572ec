// src/handlers/finance.rs

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
    engine::ExpenseRatios,
    handlers::query::PeriodQuery,
    middleware::tenancy::TenantContext,
    models::finance::{
        CreateFixedExpenseRequest, CreateVariableExpenseRequest, FixedExpense, UpdateFixedExpenseRequest,
        UpdateVariableExpenseRequest, VariableExpense,
    },
};

// =============================================================================
//  DESPESAS FIXAS
// =============================================================================

pub async fn list_fixed(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<Vec<FixedExpense>>, AppError> {
    Ok(Json(app_state.finance_service.list_fixed(tenant.0).await?))
}

pub async fn create_fixed(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateFixedExpenseRequest>,
) -> Result<(StatusCode, Json<FixedExpense>), AppError> {
    payload.validate()?;
    let expense = app_state.finance_service.create_fixed(tenant.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn update_fixed(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFixedExpenseRequest>,
) -> Result<Json<FixedExpense>, AppError> {
    payload.validate()?;
    let expense = app_state.finance_service.update_fixed(tenant.0, id, &payload).await?;
    Ok(Json(expense))
}

pub async fn delete_fixed(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.finance_service.delete_fixed(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  DESPESAS VARIÁVEIS
// =============================================================================

pub async fn list_variable(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<Vec<VariableExpense>>, AppError> {
    Ok(Json(app_state.finance_service.list_variable(tenant.0).await?))
}

pub async fn create_variable(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<CreateVariableExpenseRequest>,
) -> Result<(StatusCode, Json<VariableExpense>), AppError> {
    payload.validate()?;
    let expense = app_state.finance_service.create_variable(tenant.0, &payload).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn update_variable(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVariableExpenseRequest>,
) -> Result<Json<VariableExpense>, AppError> {
    payload.validate()?;
    let expense = app_state.finance_service.update_variable(tenant.0, id, &payload).await?;
    Ok(Json(expense))
}

pub async fn delete_variable(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.finance_service.delete_variable(tenant.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/expenses/ratios?year=&month=
pub async fn get_ratios(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<ExpenseRatios>, AppError> {
    let (year, month) = period.resolve()?;
    let ratios = app_state.finance_service.expense_ratios(tenant.0, year, month).await?;
    Ok(Json(ratios.rounded()))
}
