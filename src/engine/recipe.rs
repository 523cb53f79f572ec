// src/engine/recipe.rs

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::engine::units::convert;
use crate::models::inventory::{RawMaterial, RawMaterialPurchase, SelectableMaterial};
use crate::models::products::IngredientUsage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestPrice {
    pub unit_price: Decimal,
    pub purchase_date: NaiveDate,
    created_at: DateTime<Utc>,
}

/// Preço vigente de cada matéria-prima: o da compra mais recente.
/// Não é média ponderada; a última compra manda.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    latest: HashMap<Uuid, LatestPrice>,
}

impl PriceBook {
    pub fn from_purchases<'a, I>(purchases: I) -> Self
    where
        I: IntoIterator<Item = &'a RawMaterialPurchase>,
    {
        let mut latest: HashMap<Uuid, LatestPrice> = HashMap::new();

        for purchase in purchases {
            let candidate = LatestPrice {
                unit_price: purchase.unit_price,
                purchase_date: purchase.purchase_date,
                created_at: purchase.created_at,
            };

            latest
                .entry(purchase.raw_material_id)
                .and_modify(|current| {
                    // Mesma data: vale a compra registrada por último
                    if (candidate.purchase_date, candidate.created_at)
                        > (current.purchase_date, current.created_at)
                    {
                        *current = candidate;
                    }
                })
                .or_insert(candidate);
        }

        Self { latest }
    }

    pub fn latest(&self, raw_material_id: Uuid) -> Option<&LatestPrice> {
        self.latest.get(&raw_material_id)
    }

    pub fn unit_price(&self, raw_material_id: Uuid) -> Option<Decimal> {
        self.latest(raw_material_id).map(|p| p.unit_price)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCost {
    pub lines: Vec<IngredientUsage>,
    pub total_cost: Decimal,
}

/// Resolve preço e custo de uma linha da ficha técnica.
///
/// Sem histórico de compra o preço é zero e a linha não pesa no custo.
/// Matéria-prima inexistente também degrada para custo zero.
pub fn cost_line(
    line: &IngredientUsage,
    material: Option<&RawMaterial>,
    prices: &PriceBook,
) -> IngredientUsage {
    let Some(material) = material else {
        tracing::warn!(raw_material_id = %line.raw_material_id, "Matéria-prima não encontrada; custo zerado");
        return IngredientUsage {
            unit_price: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            ..line.clone()
        };
    };

    let unit_price = match prices.unit_price(material.id) {
        Some(price) => price,
        None => {
            tracing::debug!(raw_material_id = %material.id, "Sem histórico de compra; preço unitário zero");
            Decimal::ZERO
        }
    };

    let converted_quantity = convert(line.quantity, line.unit, material.base_unit);

    IngredientUsage {
        unit_price,
        total_cost: converted_quantity.saturating_mul(unit_price),
        ..line.clone()
    }
}

pub fn cost_recipe(
    lines: &[IngredientUsage],
    materials: &HashMap<Uuid, &RawMaterial>,
    prices: &PriceBook,
) -> RecipeCost {
    let lines: Vec<IngredientUsage> = lines
        .iter()
        .map(|line| cost_line(line, materials.get(&line.raw_material_id).copied(), prices))
        .collect();

    // Soma saturada: uma linha absurda não derruba o cálculo inteiro
    let total_cost = lines
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.total_cost));

    RecipeCost { lines, total_cost }
}

pub fn index_materials(materials: &[RawMaterial]) -> HashMap<Uuid, &RawMaterial> {
    materials.iter().map(|m| (m.id, m)).collect()
}

/// Só entram no formulário de receita as matérias-primas com pelo menos uma compra.
pub fn selectable_materials(materials: &[RawMaterial], prices: &PriceBook) -> Vec<SelectableMaterial> {
    materials
        .iter()
        .filter_map(|m| {
            prices.latest(m.id).map(|latest| SelectableMaterial {
                id: m.id,
                name: m.name.clone(),
                base_unit: m.base_unit,
                unit_price: latest.unit_price,
                last_purchase_date: latest.purchase_date,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::engine::units::MeasurementUnit;

    pub fn material(name: &str, base_unit: MeasurementUnit) -> RawMaterial {
        RawMaterial {
            id: Uuid::new_v4(),
            client_id: Uuid::nil(),
            name: name.to_string(),
            category: None,
            base_unit,
            current_stock: Decimal::ZERO,
            minimum_stock: Decimal::ZERO,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn purchase(material_id: Uuid, quantity: Decimal, unit_price: Decimal, day: u32) -> RawMaterialPurchase {
        RawMaterialPurchase {
            id: Uuid::new_v4(),
            client_id: Uuid::nil(),
            raw_material_id: material_id,
            quantity,
            unit_price,
            total_cost: quantity * unit_price,
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            supplier: None,
            created_at: Utc::now(),
        }
    }

    pub fn usage(material_id: Uuid, quantity: Decimal, unit: MeasurementUnit) -> IngredientUsage {
        IngredientUsage {
            raw_material_id: material_id,
            quantity,
            unit,
            unit_price: Decimal::ZERO,
            total_cost: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::engine::units::MeasurementUnit::*;
    use rust_decimal_macros::dec;

    #[test]
    fn latest_purchase_wins_over_average() {
        let flour = material("Farinha", Kg);
        let purchases = vec![
            purchase(flour.id, dec!(10), dec!(2.00), 1),
            purchase(flour.id, dec!(5), dec!(2.50), 5),
        ];
        let prices = PriceBook::from_purchases(&purchases);
        let materials = vec![flour.clone()];

        let cost = cost_recipe(&[usage(flour.id, dec!(2), Kg)], &index_materials(&materials), &prices);

        assert_eq!(cost.total_cost, dec!(5.00));
        assert_eq!(cost.lines[0].unit_price, dec!(2.50));
    }

    #[test]
    fn purchase_order_in_input_does_not_matter() {
        let flour = material("Farinha", Kg);
        let purchases = vec![
            purchase(flour.id, dec!(5), dec!(2.50), 5),
            purchase(flour.id, dec!(10), dec!(2.00), 1),
        ];
        let prices = PriceBook::from_purchases(&purchases);
        assert_eq!(prices.unit_price(flour.id), Some(dec!(2.50)));
    }

    #[test]
    fn same_day_purchases_use_last_registered() {
        let milk = material("Leite", L);
        let first = purchase(milk.id, dec!(1), dec!(4.00), 2);
        let mut second = purchase(milk.id, dec!(1), dec!(4.60), 2);
        second.created_at = first.created_at + chrono::Duration::minutes(5);

        let prices = PriceBook::from_purchases(&[second, first]);
        assert_eq!(prices.unit_price(milk.id), Some(dec!(4.60)));
    }

    #[test]
    fn entry_unit_is_converted_to_base_unit() {
        let flour = material("Farinha", Kg);
        let purchases = vec![purchase(flour.id, dec!(1), dec!(4.00), 1)];
        let prices = PriceBook::from_purchases(&purchases);
        let materials = vec![flour.clone()];

        let cost = cost_recipe(&[usage(flour.id, dec!(250), G)], &index_materials(&materials), &prices);

        assert_eq!(cost.total_cost, dec!(1.00));
        let line = &cost.lines[0];
        assert_eq!(line.total_cost, line.unit_price * dec!(0.25));
        assert_eq!(line.quantity, dec!(250));
        assert_eq!(line.unit, G);
    }

    #[test]
    fn material_without_purchase_costs_zero() {
        let salt = material("Sal", Kg);
        let materials = vec![salt.clone()];
        let cost = cost_recipe(
            &[usage(salt.id, dec!(0.1), Kg)],
            &index_materials(&materials),
            &PriceBook::default(),
        );
        assert_eq!(cost.total_cost, Decimal::ZERO);
        assert_eq!(cost.lines[0].unit_price, Decimal::ZERO);
    }

    #[test]
    fn unknown_material_costs_zero() {
        let cost = cost_recipe(
            &[usage(Uuid::new_v4(), dec!(3), Un)],
            &HashMap::new(),
            &PriceBook::default(),
        );
        assert_eq!(cost.total_cost, Decimal::ZERO);
    }

    #[test]
    fn recipe_cost_is_additive() {
        let flour = material("Farinha", Kg);
        let oil = material("Óleo", L);
        let purchases = vec![
            purchase(flour.id, dec!(5), dec!(3.20), 3),
            purchase(oil.id, dec!(1), dec!(9.90), 4),
        ];
        let prices = PriceBook::from_purchases(&purchases);
        let materials = vec![flour.clone(), oil.clone()];
        let index = index_materials(&materials);

        let a = usage(flour.id, dec!(0.7), Kg);
        let b = usage(oil.id, dec!(150), Ml);

        let both = cost_recipe(&[a.clone(), b.clone()], &index, &prices).total_cost;
        let only_a = cost_recipe(&[a], &index, &prices).total_cost;
        let only_b = cost_recipe(&[b], &index, &prices).total_cost;

        assert_eq!(both, only_a + only_b);
    }

    #[test]
    fn oversized_lines_saturate_instead_of_overflowing() {
        let saffron = material("Açafrão", Mg);
        let purchases = vec![purchase(saffron.id, dec!(1), dec!(1000000000000), 6)];
        let prices = PriceBook::from_purchases(&purchases);
        let materials = vec![saffron.clone()];
        let line = usage(saffron.id, dec!(1000000000000), Kg);

        let cost = cost_recipe(&[line.clone(), line], &index_materials(&materials), &prices);

        assert_eq!(cost.lines[0].total_cost, Decimal::MAX);
        assert_eq!(cost.total_cost, Decimal::MAX);
    }

    #[test]
    fn selectable_materials_require_price_history() {
        let flour = material("Farinha", Kg);
        let salt = material("Sal", Kg);
        let purchases = vec![purchase(flour.id, dec!(1), dec!(3), 7)];
        let prices = PriceBook::from_purchases(&purchases);

        let selectable = selectable_materials(&[flour.clone(), salt], &prices);

        assert_eq!(selectable.len(), 1);
        assert_eq!(selectable[0].id, flour.id);
        assert_eq!(selectable[0].unit_price, dec!(3));
    }
}
