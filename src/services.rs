pub mod auth;
pub mod dashboard_service;
pub mod delivery_service;
pub mod finance_service;
pub mod inventory_service;
pub mod product_service;
