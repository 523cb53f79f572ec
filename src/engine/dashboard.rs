// src/engine/dashboard.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::common::money::{percentage_of, round2, safe_div, HUNDRED};
use crate::engine::expenses::annualized_fixed_total;
use crate::engine::period::{in_month, monthly_totals, SalesSummary};
use crate::engine::ratios::compute_ratios;
use crate::engine::recipe::{cost_recipe, index_materials, PriceBook};
use crate::models::dashboard::{AnnualOverview, DashboardMetrics, LowStockMaterial, ProductMargin};
use crate::models::finance::{FixedExpense, Sale, VariableExpense};
use crate::models::inventory::{RawMaterial, RawMaterialPurchase};
use crate::models::products::Product;
use crate::models::staff::EmployeeCost;

/// Fração das vendas implícitas usada na estimativa do CMV.
/// Aproximação assumida enquanto não existe venda por produto.
pub const CMV_SAMPLING_FACTOR: Decimal = Decimal::from_parts(1, 0, 0, false, 1);
pub const LOW_MARGIN_THRESHOLD: Decimal = Decimal::from_parts(40, 0, 0, false, 0);
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// Fotografia dos dados de um cliente. Toda agregação parte dela.
#[derive(Debug, Clone, Default)]
pub struct FinancialSnapshot {
    pub materials: Vec<RawMaterial>,
    pub purchases: Vec<RawMaterialPurchase>,
    pub products: Vec<Product>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub variable_expenses: Vec<VariableExpense>,
    pub employees: Vec<EmployeeCost>,
    pub sales: Vec<Sale>,
}

/// Unidades vendidas estimadas de um produto: `(receita / preço) × 0,1`.
pub fn estimated_sales_count(monthly_revenue: Decimal, selling_price: Decimal) -> Decimal {
    if selling_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    monthly_revenue / selling_price * CMV_SAMPLING_FACTOR
}

/// Ponto de equilíbrio: `CMO / (margem bruta % / 100)`.
/// Sem margem bruta positiva não há como calcular.
pub fn break_even_point(operating_cost: Decimal, gross_margin_pct: Decimal) -> Option<Decimal> {
    if gross_margin_pct <= Decimal::ZERO {
        return None;
    }
    operating_cost.checked_div(gross_margin_pct / HUNDRED)
}

/// Custo de receita atual de cada produto, recalculado pela última compra.
pub fn product_costs(
    products: &[Product],
    materials: &[RawMaterial],
    prices: &PriceBook,
) -> HashMap<Uuid, Decimal> {
    let index = index_materials(materials);
    products
        .iter()
        .map(|p| (p.id, cost_recipe(&p.ingredients.0, &index, prices).total_cost))
        .collect()
}

pub fn estimate_cmv(products: &[Product], costs: &HashMap<Uuid, Decimal>, monthly_revenue: Decimal) -> Decimal {
    products
        .iter()
        .map(|p| {
            let cost = costs.get(&p.id).copied().unwrap_or_default();
            cost * estimated_sales_count(monthly_revenue, p.selling_price)
        })
        .sum()
}

/// Margem (%) de cada produto com preço de venda definido.
/// Margem de cada produto com preço. `margin_pct` sai sem arredondar;
/// [`rank_products`] arredonda depois de classificar.
pub fn product_margins(products: &[Product], costs: &HashMap<Uuid, Decimal>) -> Vec<ProductMargin> {
    products
        .iter()
        .filter(|p| p.selling_price > Decimal::ZERO)
        .map(|p| {
            let recipe_cost = costs.get(&p.id).copied().unwrap_or_default();
            ProductMargin {
                product_id: p.id,
                name: p.name.clone(),
                selling_price: p.selling_price,
                recipe_cost: round2(recipe_cost),
                margin_pct: percentage_of(p.selling_price.saturating_sub(recipe_cost), p.selling_price),
            }
        })
        .collect()
}

/// (top 5 por margem decrescente, todos abaixo de 40% em ordem crescente)
pub fn rank_products(margins: &[ProductMargin]) -> (Vec<ProductMargin>, Vec<ProductMargin>) {
    // Classifica pela margem exata; só a resposta vai arredondada
    let rounded = |m: ProductMargin| ProductMargin { margin_pct: round2(m.margin_pct), ..m };

    let mut top = margins.to_vec();
    top.sort_by(|a, b| b.margin_pct.cmp(&a.margin_pct).then_with(|| a.name.cmp(&b.name)));
    top.truncate(TOP_PRODUCTS_LIMIT);

    let mut low: Vec<ProductMargin> = margins
        .iter()
        .filter(|m| m.margin_pct < LOW_MARGIN_THRESHOLD)
        .cloned()
        .collect();
    low.sort_by(|a, b| a.margin_pct.cmp(&b.margin_pct).then_with(|| a.name.cmp(&b.name)));

    (
        top.into_iter().map(rounded).collect(),
        low.into_iter().map(rounded).collect(),
    )
}

pub fn low_stock(materials: &[RawMaterial]) -> Vec<LowStockMaterial> {
    materials
        .iter()
        .filter(|m| m.is_low_stock())
        .map(|m| LowStockMaterial {
            raw_material_id: m.id,
            name: m.name.clone(),
            base_unit: m.base_unit,
            current_stock: m.current_stock,
            minimum_stock: m.minimum_stock,
        })
        .collect()
}

/// Valor do estoque: `Σ estoque atual × último preço` (zero sem compras).
pub fn inventory_value(materials: &[RawMaterial], prices: &PriceBook) -> Decimal {
    materials
        .iter()
        .map(|m| m.current_stock * prices.unit_price(m.id).unwrap_or_default())
        .sum()
}

pub fn aggregate(snapshot: &FinancialSnapshot, year: i32, month: u32) -> DashboardMetrics {
    let prices = PriceBook::from_purchases(&snapshot.purchases);

    let sales = SalesSummary::from_sales(in_month(&snapshot.sales, year, month));
    let revenue = sales.revenue;

    let ratios = compute_ratios(
        &snapshot.fixed_expenses,
        in_month(&snapshot.variable_expenses, year, month),
        &snapshot.employees,
        revenue,
    );
    let cmo = ratios.operating_cost;

    let costs = product_costs(&snapshot.products, &snapshot.materials, &prices);
    let cmv = estimate_cmv(&snapshot.products, &costs, revenue);

    let gross_margin = revenue - cmv;
    let gross_margin_pct = percentage_of(gross_margin, revenue);
    let operating_margin = gross_margin - cmo;
    let profitability_pct = if revenue > Decimal::ZERO {
        safe_div(operating_margin, revenue) * HUNDRED
    } else {
        Decimal::ZERO
    };

    let margins = product_margins(&snapshot.products, &costs);
    let (top_products, low_margin_products) = rank_products(&margins);

    tracing::debug!(year, month, %revenue, %cmv, %cmo, "Dashboard agregado");

    DashboardMetrics {
        year,
        month,
        revenue: round2(revenue),
        orders: sales.orders,
        average_ticket: round2(sales.average_ticket),
        cmv: round2(cmv),
        cmo: round2(cmo),
        expense_ratios: ratios.rounded(),
        gross_margin: round2(gross_margin),
        gross_margin_pct: round2(gross_margin_pct),
        operating_margin: round2(operating_margin),
        profitability_pct: round2(profitability_pct),
        break_even_point: break_even_point(cmo, gross_margin_pct).map(round2),
        top_products,
        low_margin_products,
        low_stock: low_stock(&snapshot.materials),
        inventory_value: round2(inventory_value(&snapshot.materials, &prices)),
    }
}

pub fn annual_overview(snapshot: &FinancialSnapshot, year: i32) -> AnnualOverview {
    let revenue_by_month = monthly_totals(&snapshot.sales, year, |s| s.total_amount);
    let variable_expenses_by_month = monthly_totals(&snapshot.variable_expenses, year, |e| e.amount);

    let total_revenue = revenue_by_month.iter().map(|m| m.amount).sum();
    let total_variable_expenses = variable_expenses_by_month.iter().map(|m| m.amount).sum();

    AnnualOverview {
        year,
        revenue_by_month,
        variable_expenses_by_month,
        total_revenue,
        total_variable_expenses,
        annualized_fixed_expenses: round2(annualized_fixed_total(&snapshot.fixed_expenses)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::expenses::fixtures::{employee, fixed};
    use crate::engine::ratios::fixtures::variable;
    use crate::engine::recipe::fixtures::{material, purchase, usage};
    use crate::engine::units::MeasurementUnit::{Kg, Un};
    use crate::models::finance::ExpenseFrequency::{Annual, Monthly};
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::types::Json;

    fn product(name: &str, selling_price: Decimal, ingredients: Vec<crate::models::products::IngredientUsage>) -> Product {
        Product {
            id: Uuid::new_v4(),
            client_id: Uuid::nil(),
            name: name.to_string(),
            category: None,
            ingredients: Json(ingredients),
            selling_price,
            target_margin: dec!(30),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sale(day: u32, total: Decimal, orders: i32) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            client_id: Uuid::nil(),
            sale_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            total_amount: total,
            orders_count: orders,
            average_ticket: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn margin(name: &str, pct: Decimal) -> ProductMargin {
        ProductMargin {
            product_id: Uuid::new_v4(),
            name: name.to_string(),
            selling_price: dec!(10),
            recipe_cost: dec!(1),
            margin_pct: pct,
        }
    }

    #[test]
    fn break_even_is_not_computable_without_gross_margin() {
        assert_eq!(break_even_point(dec!(1000), Decimal::ZERO), None);
        assert_eq!(break_even_point(dec!(1000), dec!(-5)), None);
        assert_eq!(break_even_point(dec!(1000), dec!(50)), Some(dec!(2000)));
    }

    #[test]
    fn estimated_sales_count_samples_ten_percent() {
        assert_eq!(estimated_sales_count(dec!(10000), dec!(25)), dec!(40));
        assert_eq!(estimated_sales_count(dec!(10000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn ranking_takes_top_five_and_low_margins_ascending() {
        let margins = vec![
            margin("A", dec!(70)),
            margin("B", dec!(35)),
            margin("C", dec!(55)),
            margin("D", dec!(10)),
            margin("E", dec!(80)),
            margin("F", dec!(60)),
            margin("G", dec!(39.99)),
        ];

        let (top, low) = rank_products(&margins);

        let top_names: Vec<&str> = top.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(top_names, vec!["E", "A", "F", "C", "G"]);

        let low_names: Vec<&str> = low.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(low_names, vec!["D", "B", "G"]);
    }

    #[test]
    fn margin_just_below_threshold_stays_in_low_list() {
        let margins = vec![margin("Quase", dec!(39.996)), margin("Exata", dec!(40))];

        let (top, low) = rank_products(&margins);

        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Quase");
        assert_eq!(low[0].margin_pct, dec!(40.00));
        assert_eq!(top[0].name, "Exata");
        assert_eq!(top[1].margin_pct, dec!(40.00));
    }

    #[test]
    fn product_margins_keep_full_precision_for_ranking() {
        let cake = product("Bolo", dec!(100), vec![]);
        let costs = HashMap::from([(cake.id, dec!(60.004))]);

        let margins = product_margins(&[cake], &costs);
        assert_eq!(margins[0].margin_pct, dec!(39.996));

        let (_, low) = rank_products(&margins);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].margin_pct, dec!(40.00));
    }

    #[test]
    fn low_stock_includes_equal_threshold() {
        let mut flour = material("Farinha", Kg);
        flour.current_stock = dec!(2);
        flour.minimum_stock = dec!(2);
        let mut sugar = material("Açúcar", Kg);
        sugar.current_stock = dec!(5);
        sugar.minimum_stock = dec!(1);

        let low = low_stock(&[flour.clone(), sugar]);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].raw_material_id, flour.id);
    }

    #[test]
    fn inventory_value_uses_last_price() {
        let mut flour = material("Farinha", Kg);
        flour.current_stock = dec!(10);
        let mut salt = material("Sal", Kg);
        salt.current_stock = dec!(3);

        let purchases = vec![
            purchase(flour.id, dec!(10), dec!(2.00), 1),
            purchase(flour.id, dec!(5), dec!(2.50), 5),
        ];
        let prices = PriceBook::from_purchases(&purchases);

        assert_eq!(inventory_value(&[flour, salt], &prices), dec!(25.00));
    }

    #[test]
    fn aggregate_composes_headline_metrics() {
        let flour = material("Farinha", Kg);
        let egg = material("Ovo", Un);

        let snapshot = FinancialSnapshot {
            purchases: vec![
                purchase(flour.id, dec!(10), dec!(2.00), 1),
                purchase(egg.id, dec!(30), dec!(0.50), 2),
            ],
            products: vec![
                // custo 2 × 2 + 4 × 0,5 = 6,00
                product("Bolo", dec!(20), vec![usage(flour.id, dec!(2), Kg), usage(egg.id, dec!(4), Un)]),
                product("Sem preço", Decimal::ZERO, vec![usage(flour.id, dec!(1), Kg)]),
            ],
            materials: vec![flour, egg],
            fixed_expenses: vec![fixed(dec!(1000), Monthly, true), fixed(dec!(1200), Annual, true)],
            variable_expenses: vec![variable(dec!(400), 2024, 3, 10), variable(dec!(999), 2024, 4, 1)],
            employees: vec![employee(dec!(1000), Decimal::ZERO)],
            sales: vec![sale(1, dec!(6000), 100), sale(15, dec!(4000), 60)],
        };

        let m = aggregate(&snapshot, 2024, 3);

        assert_eq!(m.revenue, dec!(10000));
        assert_eq!(m.orders, 160);
        assert_eq!(m.average_ticket, dec!(62.50));
        // 6 × (10000 / 20) × 0,1
        assert_eq!(m.cmv, dec!(300.00));
        // 1000 + 100 + 400 + 1000
        assert_eq!(m.cmo, dec!(2500.00));
        assert_eq!(m.expense_ratios.total_pct, dec!(15.00));
        assert_eq!(m.gross_margin, dec!(9700.00));
        assert_eq!(m.gross_margin_pct, dec!(97.00));
        assert_eq!(m.operating_margin, dec!(7200.00));
        assert_eq!(m.profitability_pct, dec!(72.00));
        assert_eq!(m.break_even_point, Some(dec!(2577.32)));
        assert_eq!(m.top_products.len(), 1);
        assert_eq!(m.top_products[0].margin_pct, dec!(70.00));
        assert!(m.low_margin_products.is_empty());
    }

    #[test]
    fn aggregate_without_sales_has_no_break_even() {
        let snapshot = FinancialSnapshot {
            fixed_expenses: vec![fixed(dec!(1000), Monthly, true)],
            ..Default::default()
        };

        let m = aggregate(&snapshot, 2024, 3);

        assert_eq!(m.revenue, Decimal::ZERO);
        assert_eq!(m.gross_margin_pct, Decimal::ZERO);
        assert_eq!(m.profitability_pct, Decimal::ZERO);
        assert_eq!(m.break_even_point, None);
        assert!(m.expense_ratios.used_estimate);
    }

    #[test]
    fn annual_overview_rolls_up_months() {
        let snapshot = FinancialSnapshot {
            sales: vec![sale(1, dec!(100), 1), sale(20, dec!(50), 1)],
            variable_expenses: vec![variable(dec!(30), 2024, 7, 1)],
            fixed_expenses: vec![fixed(dec!(1200), Annual, true), fixed(dec!(50), Monthly, false)],
            ..Default::default()
        };

        let overview = annual_overview(&snapshot, 2024);

        assert_eq!(overview.revenue_by_month[2].amount, dec!(150));
        assert_eq!(overview.total_revenue, dec!(150));
        assert_eq!(overview.variable_expenses_by_month[6].amount, dec!(30));
        assert_eq!(overview.annualized_fixed_expenses, dec!(100.00));
    }
}
