// src/services/product_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{product_repo::ProductFields, InventoryRepository, ProductRepository},
    engine::{
        pricing::suggest,
        recipe::{cost_recipe, index_materials, RecipeCost},
        PriceBook,
    },
    models::{
        inventory::{RawMaterial, RawMaterialPurchase},
        products::{
            CreateProductRequest, IngredientInput, IngredientUsage, Product, ProductPricing, QuoteRequest,
            UpdateProductRequest,
        },
    },
    services::finance_service::FinanceService,
};

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    inventory_repo: InventoryRepository,
    finance_service: FinanceService,
}

// Matérias-primas e compras do cliente, base de todo custeio
struct CostingData {
    materials: Vec<RawMaterial>,
    purchases: Vec<RawMaterialPurchase>,
}

impl CostingData {
    fn cost(&self, lines: &[IngredientUsage]) -> RecipeCost {
        let prices = PriceBook::from_purchases(&self.purchases);
        cost_recipe(lines, &index_materials(&self.materials), &prices)
    }

    // Ingrediente de outro cliente (ou apagado) não entra numa ficha nova
    fn ensure_known(&self, inputs: &[IngredientInput]) -> Result<(), AppError> {
        let all_known = inputs
            .iter()
            .all(|input| self.materials.iter().any(|m| m.id == input.raw_material_id));
        if all_known {
            Ok(())
        } else {
            Err(AppError::NotFound("Matéria-prima"))
        }
    }
}

fn to_usages(inputs: &[IngredientInput]) -> Vec<IngredientUsage> {
    inputs.iter().map(IngredientUsage::from).collect()
}

impl ProductService {
    pub fn new(product_repo: ProductRepository, inventory_repo: InventoryRepository, finance_service: FinanceService) -> Self {
        Self {
            product_repo,
            inventory_repo,
            finance_service,
        }
    }

    async fn costing_data(&self, client_id: Uuid) -> Result<CostingData, AppError> {
        let (materials, purchases) = tokio::try_join!(
            self.inventory_repo.list_materials(client_id),
            self.inventory_repo.list_purchases(client_id),
        )?;
        Ok(CostingData { materials, purchases })
    }

    pub async fn list(&self, client_id: Uuid) -> Result<Vec<Product>, AppError> {
        self.product_repo.list_products(client_id).await
    }

    pub async fn get(&self, client_id: Uuid, id: Uuid) -> Result<Product, AppError> {
        self.product_repo
            .find_product(client_id, id)
            .await?
            .ok_or(AppError::NotFound("Produto"))
    }

    /// Grava o produto com a ficha técnica já precificada pelas últimas compras.
    pub async fn create(&self, client_id: Uuid, payload: &CreateProductRequest) -> Result<Product, AppError> {
        let costing = self.costing_data(client_id).await?;
        costing.ensure_known(&payload.ingredients)?;

        let recipe = costing.cost(&to_usages(&payload.ingredients));

        let product = self
            .product_repo
            .create_product(
                client_id,
                &payload.name,
                payload.category.as_deref(),
                &recipe.lines,
                payload.selling_price,
                payload.target_margin,
            )
            .await?;

        tracing::info!(product_id = %product.id, recipe_cost = %recipe.total_cost, "Produto criado");
        Ok(product)
    }

    pub async fn update(&self, client_id: Uuid, id: Uuid, payload: &UpdateProductRequest) -> Result<Product, AppError> {
        // Só recusteia quando a ficha técnica veio no payload
        let lines = match &payload.ingredients {
            Some(inputs) => {
                let costing = self.costing_data(client_id).await?;
                costing.ensure_known(inputs)?;
                Some(costing.cost(&to_usages(inputs)).lines)
            }
            None => None,
        };

        let fields = ProductFields {
            name: payload.name.as_deref(),
            category: payload.category.as_deref(),
            ingredients: lines.as_deref(),
            selling_price: payload.selling_price,
            target_margin: payload.target_margin,
        };

        self.product_repo
            .update_product(client_id, id, fields)
            .await?
            .ok_or(AppError::NotFound("Produto"))
    }

    pub async fn delete(&self, client_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.product_repo.delete_product(client_id, id).await? {
            return Err(AppError::NotFound("Produto"));
        }
        Ok(())
    }

    /// Preço sugerido de um produto gravado, com os preços e despesas do período.
    pub async fn pricing(&self, client_id: Uuid, id: Uuid, year: i32, month: u32) -> Result<ProductPricing, AppError> {
        let (product, costing, ratios) = tokio::try_join!(
            self.get(client_id, id),
            self.costing_data(client_id),
            self.finance_service.expense_ratios(client_id, year, month),
        )?;

        let recipe = costing.cost(&product.ingredients.0);
        let pricing = suggest(recipe.total_cost, &ratios, product.target_margin, Some(product.selling_price));

        Ok(ProductPricing {
            ingredients: recipe.lines,
            pricing,
        })
    }

    /// Pré-visualização do formulário: mesmo cálculo, nada é gravado.
    pub async fn quote(&self, client_id: Uuid, payload: &QuoteRequest, year: i32, month: u32) -> Result<ProductPricing, AppError> {
        let (costing, ratios) = tokio::try_join!(
            self.costing_data(client_id),
            self.finance_service.expense_ratios(client_id, year, month),
        )?;
        costing.ensure_known(&payload.ingredients)?;

        let recipe = costing.cost(&to_usages(&payload.ingredients));
        let selling_price = payload.selling_price.filter(|price| *price > Decimal::ZERO);

        Ok(ProductPricing {
            ingredients: recipe.lines,
            pricing: suggest(recipe.total_cost, &ratios, payload.target_margin, selling_price),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::recipe::fixtures::{material, purchase};
    use crate::engine::units::MeasurementUnit;
    use rust_decimal_macros::dec;

    fn input(raw_material_id: Uuid, quantity: Decimal, unit: MeasurementUnit) -> IngredientInput {
        IngredientInput { raw_material_id, quantity, unit }
    }

    #[test]
    fn costing_prices_lines_with_latest_purchase() {
        let flour = material("Farinha", MeasurementUnit::Kg);
        let costing = CostingData {
            purchases: vec![
                purchase(flour.id, dec!(10), dec!(8), 1),
                purchase(flour.id, dec!(10), dec!(10), 15),
            ],
            materials: vec![flour.clone()],
        };

        let recipe = costing.cost(&to_usages(&[input(flour.id, dec!(500), MeasurementUnit::G)]));
        assert_eq!(recipe.total_cost, dec!(5.00));
        assert_eq!(recipe.lines[0].unit_price, dec!(10));
    }

    #[test]
    fn unknown_material_is_rejected_before_saving() {
        let flour = material("Farinha", MeasurementUnit::Kg);
        let costing = CostingData { materials: vec![flour.clone()], purchases: vec![] };

        assert!(costing.ensure_known(&[input(flour.id, dec!(1), MeasurementUnit::Kg)]).is_ok());
        let result = costing.ensure_known(&[input(Uuid::new_v4(), dec!(1), MeasurementUnit::Kg)]);
        assert!(matches!(result, Err(AppError::NotFound("Matéria-prima"))));
    }
}
