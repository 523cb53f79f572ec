// src/engine/expenses.rs

use rust_decimal::Decimal;

use crate::models::finance::{ExpenseFrequency, FixedExpense};
use crate::models::staff::EmployeeCost;

impl ExpenseFrequency {
    /// Quantos meses cada lançamento cobre.
    pub fn months(self) -> u32 {
        match self {
            ExpenseFrequency::Monthly => 1,
            ExpenseFrequency::Quarterly => 3,
            ExpenseFrequency::Semiannual => 6,
            ExpenseFrequency::Annual => 12,
        }
    }

    /// Quantos lançamentos ocorrem num ano.
    pub fn annual_factor(self) -> u32 {
        12 / self.months()
    }
}

/// Valor mensal equivalente de uma despesa fixa (`amount / meses`).
pub fn monthly_equivalent(expense: &FixedExpense) -> Decimal {
    expense.amount / Decimal::from(expense.frequency.months())
}

/// Anualização para relatórios: equivalente mensal × fator anual da frequência.
pub fn annualized(expense: &FixedExpense) -> Decimal {
    monthly_equivalent(expense) * Decimal::from(expense.frequency.annual_factor())
}

/// Soma dos equivalentes mensais; despesas inativas ficam de fora.
pub fn monthly_fixed_total(expenses: &[FixedExpense]) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.active)
        .map(monthly_equivalent)
        .sum()
}

pub fn annualized_fixed_total(expenses: &[FixedExpense]) -> Decimal {
    expenses.iter().filter(|e| e.active).map(annualized).sum()
}

/// Encargo mensal total de um colaborador: soma dos onze componentes.
pub fn employee_burden(employee: &EmployeeCost) -> Decimal {
    employee.burden_components().iter().copied().sum()
}

pub fn monthly_employee_burden(employees: &[EmployeeCost]) -> Decimal {
    employees.iter().map(employee_burden).sum()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use rust_decimal_macros::dec;
    use ExpenseFrequency::*;

    #[test]
    fn quarterly_expense_normalizes_to_monthly() {
        let rent = fixed(dec!(1200), Quarterly, true);
        assert_eq!(monthly_equivalent(&rent), dec!(400.00));
        assert_eq!(annualized(&rent), dec!(1600.00));
    }

    #[test]
    fn divisors_per_frequency() {
        assert_eq!(monthly_equivalent(&fixed(dec!(600), Monthly, true)), dec!(600));
        assert_eq!(monthly_equivalent(&fixed(dec!(600), Semiannual, true)), dec!(100));
        assert_eq!(monthly_equivalent(&fixed(dec!(600), Annual, true)), dec!(50));
    }

    #[test]
    fn normalization_round_trips_under_annual_factor() {
        for frequency in [Monthly, Quarterly, Semiannual, Annual] {
            let e = fixed(dec!(900), frequency, true);
            let expected = monthly_equivalent(&e) * Decimal::from(frequency.annual_factor());
            assert_eq!(annualized(&e), expected);
        }
        assert_eq!(Monthly.annual_factor(), 12);
        assert_eq!(Quarterly.annual_factor(), 4);
        assert_eq!(Semiannual.annual_factor(), 2);
        assert_eq!(Annual.annual_factor(), 1);
    }

    #[test]
    fn inactive_expenses_do_not_count() {
        let expenses = vec![
            fixed(dec!(1000), Monthly, true),
            fixed(dec!(1200), Annual, true),
            fixed(dec!(5000), Monthly, false),
        ];
        assert_eq!(monthly_fixed_total(&expenses), dec!(1100));
    }

    #[test]
    fn burden_excludes_hourly_cost() {
        let cook = employee(dec!(2000), dec!(10));
        // 2000 + 10 × 10 componentes
        assert_eq!(employee_burden(&cook), dec!(2100));
        assert_eq!(monthly_employee_burden(&[cook.clone(), cook]), dec!(4200));
    }
}
