// src/models/staff.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;

// Custo mensal de um colaborador, item a item.
// `hourly_cost` é apenas informativo e não entra no encargo total.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCost {
    pub id: Uuid,
    pub client_id: Uuid,
    pub professional_name: String,
    pub hourly_cost: Decimal,

    pub base_salary: Decimal,
    pub benefits: Decimal,
    pub fgts: Decimal,
    pub vacation: Decimal,
    pub vacation_bonus: Decimal,
    pub fgts_vacation: Decimal,
    pub thirteenth_salary: Decimal,
    pub fgts_thirteenth: Decimal,
    pub notice_pay: Decimal,
    pub fgts_notice: Decimal,
    pub fgts_penalty: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeCost {
    pub fn burden_components(&self) -> [Decimal; 11] {
        [
            self.base_salary,
            self.benefits,
            self.fgts,
            self.vacation,
            self.vacation_bonus,
            self.fgts_vacation,
            self.thirteenth_salary,
            self.fgts_thirteenth,
            self.notice_pay,
            self.fgts_notice,
            self.fgts_penalty,
        ]
    }
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeCostRequest {
    #[validate(length(min = 1, message = "O nome do profissional é obrigatório."))]
    pub professional_name: String,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub hourly_cost: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub base_salary: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub benefits: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub fgts: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub vacation: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub vacation_bonus: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub fgts_vacation: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub thirteenth_salary: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub fgts_thirteenth: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub notice_pay: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub fgts_notice: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub fgts_penalty: Decimal,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeCostRequest {
    #[validate(length(min = 1, message = "O nome do profissional não pode ficar vazio."))]
    pub professional_name: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub hourly_cost: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub base_salary: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub benefits: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub fgts: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub vacation: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub vacation_bonus: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub fgts_vacation: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub thirteenth_salary: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub fgts_thirteenth: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub notice_pay: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub fgts_notice: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub fgts_penalty: Option<Decimal>,
}
