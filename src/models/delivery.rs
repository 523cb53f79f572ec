// src/models/delivery.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Token OAuth2 devolvido pela plataforma (client credentials)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    #[validate(length(min = 1, message = "O merchantId é obrigatório."))]
    pub merchant_id: String,
    pub begin_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "first_page")]
    #[validate(range(min = 1, message = "A página começa em 1."))]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

/// Venda da plataforma, repassada sem mapeamento de campos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalSale(pub serde_json::Value);
