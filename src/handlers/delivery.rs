// src/handlers/delivery.rs

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::delivery::{AccessToken, ExternalSale, SalesQuery},
};

// POST /api/delivery/token
pub async fn get_token(State(app_state): State<AppState>) -> Result<Json<AccessToken>, AppError> {
    let token = app_state.delivery_service.token().await?;
    Ok(Json(token))
}

// GET /api/delivery/sales?merchantId=&beginDate=&endDate=&page=
pub async fn list_sales(
    State(app_state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> Result<Json<Vec<ExternalSale>>, AppError> {
    query.validate()?;
    if query.end_date < query.begin_date {
        return Err(AppError::InvalidPeriod("endDate anterior a beginDate".to_string()));
    }

    let sales = app_state.delivery_service.sales(&query).await?;
    tracing::debug!(merchant_id = %query.merchant_id, count = sales.len(), "Vendas de delivery obtidas");
    Ok(Json(sales))
}
