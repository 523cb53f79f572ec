// src/models/products.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_not_negative, validate_percentage};
use crate::engine::pricing::PricingSuggestion;
use crate::engine::units::MeasurementUnit;

pub const DEFAULT_TARGET_MARGIN: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

fn default_target_margin() -> Decimal {
    DEFAULT_TARGET_MARGIN
}

// Linha da ficha técnica: quanto de cada matéria-prima a receita usa.
// `unit` é a unidade digitada, que pode diferir da unidade base da matéria-prima.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientUsage {
    pub raw_material_id: Uuid,
    pub quantity: Decimal,
    pub unit: MeasurementUnit,
    #[serde(default)]
    pub unit_price: Decimal,
    #[serde(default)]
    pub total_cost: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub ingredients: Json<Vec<IngredientUsage>>,
    pub selling_price: Decimal,
    pub target_margin: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IngredientInput {
    pub raw_material_id: Uuid,

    #[validate(custom(function = "validate_not_negative"))]
    pub quantity: Decimal,

    pub unit: MeasurementUnit,
}

impl From<&IngredientInput> for IngredientUsage {
    fn from(input: &IngredientInput) -> Self {
        IngredientUsage {
            raw_material_id: input.raw_material_id,
            quantity: input.quantity,
            unit: input.unit,
            unit_price: Decimal::ZERO,
            total_cost: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub category: Option<String>,

    #[validate(nested)]
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub selling_price: Decimal,

    #[validate(custom(function = "validate_percentage"))]
    #[serde(default = "default_target_margin")]
    pub target_margin: Decimal,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub name: Option<String>,

    pub category: Option<String>,

    #[validate(nested)]
    pub ingredients: Option<Vec<IngredientInput>>,

    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Option<Decimal>,

    #[validate(custom(function = "validate_percentage"))]
    pub target_margin: Option<Decimal>,
}

// Pré-visualização do formulário de produto (nada é gravado)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[validate(nested)]
    pub ingredients: Vec<IngredientInput>,

    #[validate(custom(function = "validate_percentage"))]
    #[serde(default = "default_target_margin")]
    pub target_margin: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Option<Decimal>,
}

// Resposta de precificação: ficha técnica com preços do dia + sugestão
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricing {
    pub ingredients: Vec<IngredientUsage>,
    pub pricing: PricingSuggestion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn create_request_defaults_margin_to_thirty() {
        let json = r#"{ "name": "Pão de queijo", "sellingPrice": 12.5 }"#;
        let req: CreateProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.target_margin, dec!(30));
        assert!(req.ingredients.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn nested_ingredient_validation_rejects_negative_quantity() {
        let json = r#"{
            "name": "Bolo",
            "ingredients": [
                { "rawMaterialId": "6f1c2b1e-7f0a-4a0e-9a55-2f4a3b8e9c10", "quantity": -1, "unit": "kg" }
            ]
        }"#;
        let req: CreateProductRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn quote_with_absurd_margin_is_invalid() {
        let json = r#"{ "ingredients": [], "targetMargin": 7e28 }"#;
        let req: QuoteRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());

        let json = r#"{ "ingredients": [], "targetMargin": 30, "sellingPrice": 1e28 }"#;
        let req: QuoteRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn absurd_ingredient_quantity_is_invalid() {
        let json = r#"{
            "ingredients": [
                { "rawMaterialId": "6f1c2b1e-7f0a-4a0e-9a55-2f4a3b8e9c10", "quantity": 1e28, "unit": "kg" }
            ]
        }"#;
        let req: QuoteRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_name_is_invalid() {
        let json = r#"{ "name": "" }"#;
        let req: CreateProductRequest = serde_json::from_str(json).unwrap();
        assert!(req.validate().is_err());
    }
}
