// src/services/dashboard_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, InventoryRepository, ProductRepository, SalesRepository, StaffRepository},
    engine::{
        dashboard::{aggregate, annual_overview},
        FinancialSnapshot,
    },
    models::dashboard::{AnnualOverview, DashboardMetrics},
};

#[derive(Clone)]
pub struct DashboardService {
    inventory_repo: InventoryRepository,
    product_repo: ProductRepository,
    finance_repo: FinanceRepository,
    staff_repo: StaffRepository,
    sales_repo: SalesRepository,
}

impl DashboardService {
    pub fn new(
        inventory_repo: InventoryRepository,
        product_repo: ProductRepository,
        finance_repo: FinanceRepository,
        staff_repo: StaffRepository,
        sales_repo: SalesRepository,
    ) -> Self {
        Self {
            inventory_repo,
            product_repo,
            finance_repo,
            staff_repo,
            sales_repo,
        }
    }

    /// Carrega todas as coleções do cliente em paralelo.
    /// A agregação só começa depois que todas as consultas terminaram.
    async fn load_snapshot(&self, client_id: Uuid) -> Result<FinancialSnapshot, AppError> {
        let (materials, purchases, products, fixed_expenses, variable_expenses, employees, sales) = tokio::try_join!(
            self.inventory_repo.list_materials(client_id),
            self.inventory_repo.list_purchases(client_id),
            self.product_repo.list_products(client_id),
            self.finance_repo.list_fixed_expenses(client_id),
            self.finance_repo.list_variable_expenses(client_id),
            self.staff_repo.list_employees(client_id),
            self.sales_repo.list_sales(client_id),
        )?;

        Ok(FinancialSnapshot {
            materials,
            purchases,
            products,
            fixed_expenses,
            variable_expenses,
            employees,
            sales,
        })
    }

    pub async fn get_metrics(&self, client_id: Uuid, year: i32, month: u32) -> Result<DashboardMetrics, AppError> {
        let snapshot = self.load_snapshot(client_id).await?;
        Ok(aggregate(&snapshot, year, month))
    }

    pub async fn get_annual_overview(&self, client_id: Uuid, year: i32) -> Result<AnnualOverview, AppError> {
        let snapshot = self.load_snapshot(client_id).await?;
        Ok(annual_overview(&snapshot, year))
    }
}
