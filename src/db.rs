pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod sales_repo;
pub use sales_repo::SalesRepository;
