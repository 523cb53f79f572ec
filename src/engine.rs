// src/engine.rs
//
// Motor de custos e precificação. Funções puras sobre a fotografia dos dados
// de um cliente: nada aqui faz I/O nem guarda estado entre chamadas.

pub mod dashboard;
pub mod expenses;
pub mod period;
pub mod pricing;
pub mod ratios;
pub mod recipe;
pub mod units;

pub use dashboard::FinancialSnapshot;
pub use ratios::ExpenseRatios;
pub use recipe::PriceBook;
