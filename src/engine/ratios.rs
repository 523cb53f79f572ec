// src/engine/ratios.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::common::money::{percentage_of, round2};
use crate::engine::expenses::{monthly_employee_burden, monthly_fixed_total};
use crate::models::finance::{FixedExpense, VariableExpense};
use crate::models::staff::EmployeeCost;

/// Sem faturamento no mês, estimamos a receita como o dobro das despesas.
const ESTIMATED_REVENUE_MULTIPLIER: Decimal = Decimal::TWO;

/// Resultado de uma única passada sobre as despesas do mês.
///
/// Dois agregados distintos saem daqui e não devem ser confundidos:
/// - `operating_cost` (CMO): fixas + variáveis do mês + encargos de pessoal;
/// - `total_pct`: fixas% + variáveis%, a razão usada na formação de preço.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRatios {
    pub monthly_fixed: Decimal,
    pub monthly_variable: Decimal,
    pub monthly_employee_burden: Decimal,
    pub operating_cost: Decimal,
    /// Denominador usado nas porcentagens (receita real ou estimada).
    pub revenue_base: Decimal,
    pub fixed_pct: Decimal,
    pub variable_pct: Decimal,
    pub total_pct: Decimal,
    /// `true` quando as porcentagens vêm da receita estimada.
    pub used_estimate: bool,
}

impl ExpenseRatios {
    /// Cópia com valores e porcentagens arredondados para exibição.
    pub fn rounded(&self) -> Self {
        Self {
            monthly_fixed: round2(self.monthly_fixed),
            monthly_variable: round2(self.monthly_variable),
            monthly_employee_burden: round2(self.monthly_employee_burden),
            operating_cost: round2(self.operating_cost),
            revenue_base: round2(self.revenue_base),
            fixed_pct: round2(self.fixed_pct),
            variable_pct: round2(self.variable_pct),
            total_pct: round2(self.total_pct),
            used_estimate: self.used_estimate,
        }
    }
}

/// `variable_this_month` já deve vir filtrado para o mês de referência.
pub fn compute_ratios<'a, I>(
    fixed: &[FixedExpense],
    variable_this_month: I,
    employees: &[EmployeeCost],
    monthly_revenue: Decimal,
) -> ExpenseRatios
where
    I: IntoIterator<Item = &'a VariableExpense>,
{
    let monthly_fixed = monthly_fixed_total(fixed);
    let monthly_variable: Decimal = variable_this_month.into_iter().map(|e| e.amount).sum();
    let monthly_employee_burden = monthly_employee_burden(employees);
    let operating_cost = monthly_fixed + monthly_variable + monthly_employee_burden;

    let expenses = monthly_fixed + monthly_variable;

    let (revenue_base, used_estimate) = if monthly_revenue > Decimal::ZERO {
        (monthly_revenue, false)
    } else if expenses > Decimal::ZERO {
        tracing::debug!(%expenses, "Sem faturamento no período; usando receita estimada");
        (expenses * ESTIMATED_REVENUE_MULTIPLIER, true)
    } else {
        (Decimal::ZERO, false)
    };

    let fixed_pct = percentage_of(monthly_fixed, revenue_base);
    let variable_pct = percentage_of(monthly_variable, revenue_base);

    ExpenseRatios {
        monthly_fixed,
        monthly_variable,
        monthly_employee_burden,
        operating_cost,
        revenue_base,
        fixed_pct,
        variable_pct,
        total_pct: fixed_pct.saturating_add(variable_pct),
        used_estimate,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    pub fn variable(amount: Decimal, y: i32, m: u32, d: u32) -> VariableExpense {
        VariableExpense {
            id: Uuid::new_v4(),
            client_id: Uuid::nil(),
            name: "Gás".to_string(),
            category: None,
            amount,
            expense_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            payment_method: Some("pix".to_string()),
            receipt_ref: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::variable;
    use super::*;
    use crate::engine::expenses::fixtures::{employee, fixed};
    use crate::models::finance::ExpenseFrequency::Monthly;
    use rust_decimal_macros::dec;

    #[test]
    fn ratios_over_actual_revenue() {
        let fixed_expenses = vec![fixed(dec!(2000), Monthly, true)];
        let variable_expenses = vec![variable(dec!(1000), 2024, 3, 4)];

        let r = compute_ratios(&fixed_expenses, &variable_expenses, &[], dec!(10000));

        assert_eq!(r.fixed_pct, dec!(20));
        assert_eq!(r.variable_pct, dec!(10));
        assert_eq!(r.total_pct, dec!(30));
        assert_eq!(r.revenue_base, dec!(10000));
        assert!(!r.used_estimate);
    }

    #[test]
    fn zero_revenue_falls_back_to_estimate() {
        let fixed_expenses = vec![fixed(dec!(1000), Monthly, true)];
        let variable_expenses = vec![variable(dec!(500), 2024, 3, 4)];

        let r = compute_ratios(&fixed_expenses, &variable_expenses, &[], Decimal::ZERO).rounded();

        assert_eq!(r.revenue_base, dec!(3000));
        assert_eq!(r.fixed_pct, dec!(33.33));
        assert_eq!(r.variable_pct, dec!(16.67));
        assert_eq!(r.total_pct, dec!(50.00));
        assert!(r.used_estimate);
    }

    #[test]
    fn nothing_at_all_gives_zero_percentages() {
        let r = compute_ratios(&[], &Vec::<VariableExpense>::new(), &[], Decimal::ZERO);
        assert_eq!(r.total_pct, Decimal::ZERO);
        assert_eq!(r.fixed_pct, Decimal::ZERO);
        assert_eq!(r.variable_pct, Decimal::ZERO);
        assert!(!r.used_estimate);
    }

    #[test]
    fn employee_burden_goes_into_cmo_but_not_into_pricing_ratio() {
        let fixed_expenses = vec![fixed(dec!(1000), Monthly, true)];
        let staff = vec![employee(dec!(1500), dec!(0))];

        let r = compute_ratios(&fixed_expenses, &Vec::<VariableExpense>::new(), &staff, dec!(5000));

        assert_eq!(r.monthly_employee_burden, dec!(1500));
        assert_eq!(r.operating_cost, dec!(2500));
        assert_eq!(r.total_pct, dec!(20));
    }

    #[test]
    fn inactive_fixed_expense_is_ignored() {
        let fixed_expenses = vec![fixed(dec!(1000), Monthly, false)];
        let r = compute_ratios(&fixed_expenses, &Vec::<VariableExpense>::new(), &[], dec!(1000));
        assert_eq!(r.monthly_fixed, Decimal::ZERO);
        assert_eq!(r.operating_cost, Decimal::ZERO);
    }
}
