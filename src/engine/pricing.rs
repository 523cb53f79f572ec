// src/engine/pricing.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::money::{percentage_of, round2, saturated, HUNDRED};
use crate::engine::ratios::ExpenseRatios;

/// Preço base que cobre o custo da receita e a fatia das despesas.
///
/// Com despesas em 100% ou mais o denominador zera ou fica negativo; nesse
/// caso o preço base satura no próprio custo da receita. O mesmo vale quando
/// o denominador é tão pequeno que a divisão estoura.
pub fn base_price(recipe_cost: Decimal, total_expense_pct: Decimal) -> Decimal {
    let denominator = Decimal::ONE - total_expense_pct / HUNDRED;
    if denominator <= Decimal::ZERO {
        return recipe_cost;
    }
    recipe_cost.checked_div(denominator).unwrap_or(recipe_cost)
}

/// Preço de venda sugerido para atingir `margin_pct` sobre o preço base.
/// Estouro satura em `Decimal::MAX`.
pub fn suggested_price(recipe_cost: Decimal, total_expense_pct: Decimal, margin_pct: Decimal) -> Decimal {
    if recipe_cost.is_zero() {
        return Decimal::ZERO;
    }
    let base = base_price(recipe_cost, total_expense_pct);
    let markup = Decimal::ONE + margin_pct / HUNDRED;
    round2(base.checked_mul(markup).unwrap_or(saturated(base.is_sign_negative())))
}

/// Lucro realizado num preço de venda; pode ser negativo (prejuízo).
pub fn profit(selling_price: Decimal, recipe_cost: Decimal, total_expense_pct: Decimal) -> Decimal {
    profit_breakdown(selling_price, recipe_cost, total_expense_pct).profit
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitBreakdown {
    pub selling_price: Decimal,
    pub recipe_cost: Decimal,
    pub expense_cost: Decimal,
    pub profit: Decimal,
    /// Lucro sobre o preço de venda, em %.
    pub margin_pct: Decimal,
}

pub fn profit_breakdown(selling_price: Decimal, recipe_cost: Decimal, total_expense_pct: Decimal) -> ProfitBreakdown {
    let expense_cost = selling_price.saturating_mul(total_expense_pct / HUNDRED);
    let profit = round2(selling_price.saturating_sub(recipe_cost).saturating_sub(expense_cost));

    ProfitBreakdown {
        selling_price,
        recipe_cost: round2(recipe_cost),
        expense_cost: round2(expense_cost),
        profit,
        margin_pct: round2(percentage_of(profit, selling_price)),
    }
}

/// Tudo o que o formulário de produto mostra sobre preço.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSuggestion {
    pub recipe_cost: Decimal,
    pub target_margin: Decimal,
    pub expense_ratios: ExpenseRatios,
    pub base_price: Decimal,
    pub suggested_price: Decimal,
    /// Resultado no preço de venda declarado, quando houver.
    pub current: Option<ProfitBreakdown>,
}

pub fn suggest(
    recipe_cost: Decimal,
    ratios: &ExpenseRatios,
    target_margin: Decimal,
    selling_price: Option<Decimal>,
) -> PricingSuggestion {
    let base = if recipe_cost.is_zero() {
        Decimal::ZERO
    } else {
        base_price(recipe_cost, ratios.total_pct)
    };

    PricingSuggestion {
        recipe_cost: round2(recipe_cost),
        target_margin,
        expense_ratios: ratios.rounded(),
        base_price: round2(base),
        suggested_price: suggested_price(recipe_cost, ratios.total_pct, target_margin),
        current: selling_price
            .filter(|price| *price > Decimal::ZERO)
            .map(|price| profit_breakdown(price, recipe_cost, ratios.total_pct)),
    }
}
