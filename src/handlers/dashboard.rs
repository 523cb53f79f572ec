// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::query::{PeriodQuery, YearQuery},
    middleware::tenancy::TenantContext,
    models::dashboard::{AnnualOverview, DashboardMetrics},
};

// GET /api/dashboard?year=&month=
pub async fn get_metrics(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<DashboardMetrics>, AppError> {
    let (year, month) = period.resolve()?;
    let metrics = app_state.dashboard_service.get_metrics(tenant.0, year, month).await?;
    Ok(Json(metrics))
}

// GET /api/dashboard/annual?year=
pub async fn get_annual_overview(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<YearQuery>,
) -> Result<Json<AnnualOverview>, AppError> {
    let overview = app_state
        .dashboard_service
        .get_annual_overview(tenant.0, query.resolve())
        .await?;
    Ok(Json(overview))
}
