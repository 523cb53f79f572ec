// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "expense_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExpenseFrequency {
    Monthly,    // Mensal
    Quarterly,  // Trimestral
    Semiannual, // Semestral
    Annual,     // Anual
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub amount: Decimal,
    pub frequency: ExpenseFrequency,
    pub due_day: Option<i32>,
    pub active: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VariableExpense {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub payment_method: Option<String>,
    pub receipt_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub client_id: Uuid,
    pub sale_date: NaiveDate,
    pub total_amount: Decimal,
    pub orders_count: i32,
    pub average_ticket: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFixedExpenseRequest {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub category: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Decimal,

    pub frequency: ExpenseFrequency,

    #[validate(range(min = 1, max = 31, message = "O dia de vencimento deve estar entre 1 e 31."))]
    pub due_day: Option<i32>,

    #[serde(default = "default_active")]
    pub active: bool,

    pub description: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFixedExpenseRequest {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Option<Decimal>,
    pub frequency: Option<ExpenseFrequency>,
    #[validate(range(min = 1, max = 31, message = "O dia de vencimento deve estar entre 1 e 31."))]
    pub due_day: Option<i32>,
    pub active: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVariableExpenseRequest {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub category: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub payment_method: Option<String>,
    pub receipt_ref: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVariableExpenseRequest {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub name: Option<String>,
    pub category: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Option<Decimal>,
    pub expense_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub receipt_ref: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    pub sale_date: NaiveDate,
    #[validate(custom(function = "validate_not_negative"))]
    pub total_amount: Decimal,
    #[validate(range(min = 0, message = "O número de pedidos não pode ser negativo."))]
    #[serde(default)]
    pub orders_count: i32,
    #[validate(custom(function = "validate_not_negative"))]
    pub average_ticket: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleRequest {
    pub sale_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_not_negative"))]
    pub total_amount: Option<Decimal>,
    #[validate(range(min = 0, message = "O número de pedidos não pode ser negativo."))]
    pub orders_count: Option<i32>,
    #[validate(custom(function = "validate_not_negative"))]
    pub average_ticket: Option<Decimal>,
    pub notes: Option<String>,
}
