// src/engine/period.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::finance::{Sale, VariableExpense};
use crate::models::inventory::RawMaterialPurchase;

/// Registro financeiro com data civil (sem fuso).
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for Sale {
    fn date(&self) -> NaiveDate {
        self.sale_date
    }
}

impl Dated for VariableExpense {
    fn date(&self) -> NaiveDate {
        self.expense_date
    }
}

impl Dated for RawMaterialPurchase {
    fn date(&self) -> NaiveDate {
        self.purchase_date
    }
}

impl<T: Dated> Dated for &T {
    fn date(&self) -> NaiveDate {
        (*self).date()
    }
}

/// Filtra os registros do mês (`month` de 1 a 12) e ano informados.
pub fn in_month<T: Dated>(records: &[T], year: i32, month: u32) -> Vec<&T> {
    records
        .iter()
        .filter(|r| {
            let date = r.date();
            date.year() == year && date.month() == month
        })
        .collect()
}

pub fn in_year<T: Dated>(records: &[T], year: i32) -> Vec<&T> {
    records.iter().filter(|r| r.date().year() == year).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    pub month: u32,
    pub amount: Decimal,
}

/// Doze baldes (jan..dez) com a soma de `amount` de cada mês do ano.
pub fn monthly_totals<T, F>(records: &[T], year: i32, amount: F) -> Vec<MonthlyTotal>
where
    T: Dated,
    F: Fn(&T) -> Decimal,
{
    let mut buckets: Vec<MonthlyTotal> = (1..=12)
        .map(|month| MonthlyTotal { month, amount: Decimal::ZERO })
        .collect();

    for record in in_year(records, year) {
        let index = record.date().month0() as usize;
        buckets[index].amount += amount(record);
    }

    buckets
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub revenue: Decimal,
    pub orders: i64,
    pub average_ticket: Decimal,
}

impl SalesSummary {
    pub fn from_sales<'a, I>(sales: I) -> Self
    where
        I: IntoIterator<Item = &'a Sale>,
    {
        let (revenue, orders) = sales
            .into_iter()
            .fold((Decimal::ZERO, 0i64), |(revenue, orders), sale| {
                (revenue + sale.total_amount, orders + i64::from(sale.orders_count))
            });

        let average_ticket = if orders > 0 {
            revenue / Decimal::from(orders)
        } else {
            Decimal::ZERO
        };

        Self { revenue, orders, average_ticket }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn sale(y: i32, m: u32, d: u32, total: Decimal, orders: i32) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            client_id: Uuid::nil(),
            sale_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            total_amount: total,
            orders_count: orders,
            average_ticket: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn month_bucket_matches_month_and_year() {
        let sales = vec![
            sale(2024, 3, 1, dec!(100), 4),
            sale(2024, 3, 31, dec!(50), 2),
            sale(2024, 4, 1, dec!(70), 3),
            sale(2023, 3, 15, dec!(999), 9),
        ];

        let march = in_month(&sales, 2024, 3);
        assert_eq!(march.len(), 2);
        assert!(march.iter().all(|s| s.sale_date.month() == 3 && s.sale_date.year() == 2024));
    }

    #[test]
    fn year_bucket_ignores_other_years() {
        let sales = vec![sale(2024, 1, 1, dec!(1), 1), sale(2025, 1, 1, dec!(1), 1)];
        assert_eq!(in_year(&sales, 2024).len(), 1);
    }

    #[test]
    fn monthly_totals_has_twelve_buckets() {
        let sales = vec![
            sale(2024, 1, 10, dec!(100), 1),
            sale(2024, 1, 20, dec!(25.50), 1),
            sale(2024, 12, 31, dec!(40), 1),
            sale(2023, 12, 31, dec!(1000), 1),
        ];

        let totals = monthly_totals(&sales, 2024, |s| s.total_amount);

        assert_eq!(totals.len(), 12);
        assert_eq!(totals[0], MonthlyTotal { month: 1, amount: dec!(125.50) });
        assert_eq!(totals[11].amount, dec!(40));
        assert_eq!(totals[5].amount, Decimal::ZERO);
    }

    #[test]
    fn sales_summary_derives_average_ticket() {
        let sales = vec![sale(2024, 5, 1, dec!(300), 10), sale(2024, 5, 2, dec!(100), 6)];
        let summary = SalesSummary::from_sales(&sales);
        assert_eq!(summary.revenue, dec!(400));
        assert_eq!(summary.orders, 16);
        assert_eq!(summary.average_ticket, dec!(25));
    }

    #[test]
    fn sales_summary_without_orders() {
        let summary = SalesSummary::from_sales(&[sale(2024, 5, 1, dec!(80), 0)]);
        assert_eq!(summary.average_ticket, Decimal::ZERO);
        assert_eq!(summary.revenue, dec!(80));
    }
}
