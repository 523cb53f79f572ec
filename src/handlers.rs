pub mod auth;
pub mod dashboard;
pub mod delivery;
pub mod finance;
pub mod inventory;
pub mod products;
pub mod query;
pub mod sales;
pub mod staff;
