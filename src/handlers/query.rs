// src/handlers/query.rs

use chrono::{Datelike, Local};
use serde::Deserialize;

use crate::common::error::AppError;

// ?year=2024&month=3 — qualquer um dos dois pode faltar (vale o mês corrente)
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl PeriodQuery {
    pub fn resolve(&self) -> Result<(i32, u32), AppError> {
        let today = Local::now().date_naive();
        let year = self.year.unwrap_or_else(|| today.year());
        let month = self.month.unwrap_or_else(|| today.month());

        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidPeriod(format!("mês {} fora do intervalo 1-12", month)));
        }
        Ok((year, month))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

impl YearQuery {
    pub fn resolve(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }
}
