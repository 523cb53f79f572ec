// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::engine::period::MonthlyTotal;
use crate::engine::ratios::ExpenseRatios;
use crate::engine::units::MeasurementUnit;

// 1. Indicadores do mês (os cards do topo)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub year: i32,
    pub month: u32,

    pub revenue: Decimal,
    pub orders: i64,
    pub average_ticket: Decimal,

    pub cmv: Decimal,
    pub cmo: Decimal,
    pub expense_ratios: ExpenseRatios,

    pub gross_margin: Decimal,
    pub gross_margin_pct: Decimal,
    pub operating_margin: Decimal,
    pub profitability_pct: Decimal,
    /// `None` quando a margem bruta não é positiva (não calculável).
    pub break_even_point: Option<Decimal>,

    pub top_products: Vec<ProductMargin>,
    pub low_margin_products: Vec<ProductMargin>,
    pub low_stock: Vec<LowStockMaterial>,
    pub inventory_value: Decimal,
}

// 2. Margem por produto (ranking)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMargin {
    pub product_id: Uuid,
    pub name: String,
    pub selling_price: Decimal,
    pub recipe_cost: Decimal,
    pub margin_pct: Decimal,
}

// 3. Estoque baixo
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockMaterial {
    pub raw_material_id: Uuid,
    pub name: String,
    pub base_unit: MeasurementUnit,
    pub current_stock: Decimal,
    pub minimum_stock: Decimal,
}

// 4. Visão anual (gráficos)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualOverview {
    pub year: i32,
    pub revenue_by_month: Vec<MonthlyTotal>,
    pub variable_expenses_by_month: Vec<MonthlyTotal>,
    pub total_revenue: Decimal,
    pub total_variable_expenses: Decimal,
    pub annualized_fixed_expenses: Decimal,
}
