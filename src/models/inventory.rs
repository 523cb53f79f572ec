// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::validate_not_negative;
use crate::engine::units::MeasurementUnit;

// --- 1. Matéria-prima ---
// O custo unitário NÃO fica aqui: ele vem sempre da última compra.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterial {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub base_unit: MeasurementUnit,
    pub current_stock: Decimal,
    pub minimum_stock: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RawMaterial {
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.minimum_stock
    }
}

// --- 2. Compra de matéria-prima ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialPurchase {
    pub id: Uuid,
    pub client_id: Uuid,
    pub raw_material_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_cost: Decimal, // quantity * unit_price
    pub purchase_date: NaiveDate,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Matéria-prima que pode entrar numa receita (tem histórico de compra)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectableMaterial {
    pub id: Uuid,
    pub name: String,
    pub base_unit: MeasurementUnit,
    pub unit_price: Decimal,
    pub last_purchase_date: NaiveDate,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRawMaterialRequest {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub category: Option<String>,

    pub base_unit: MeasurementUnit,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub current_stock: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub minimum_stock: Decimal,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRawMaterialRequest {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub name: Option<String>,

    pub category: Option<String>,

    pub base_unit: Option<MeasurementUnit>,

    #[validate(custom(function = "validate_not_negative"))]
    pub current_stock: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub minimum_stock: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub raw_material_id: Uuid,

    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Decimal,

    pub purchase_date: NaiveDate,

    pub supplier: Option<String>,
}

fn validate_positive(val: &Decimal) -> Result<(), validator::ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = validator::ValidationError::new("range");
        err.message = Some("A quantidade deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}
