// src/services/finance_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, SalesRepository, StaffRepository},
    engine::{
        period::{in_month, SalesSummary},
        ratios::compute_ratios,
        ExpenseRatios,
    },
    models::{
        finance::{
            CreateFixedExpenseRequest, CreateSaleRequest, CreateVariableExpenseRequest, FixedExpense, Sale,
            UpdateFixedExpenseRequest, UpdateSaleRequest, UpdateVariableExpenseRequest, VariableExpense,
        },
        staff::{CreateEmployeeCostRequest, EmployeeCost, UpdateEmployeeCostRequest},
    },
};

#[derive(Clone)]
pub struct FinanceService {
    finance_repo: FinanceRepository,
    staff_repo: StaffRepository,
    sales_repo: SalesRepository,
}

impl FinanceService {
    pub fn new(finance_repo: FinanceRepository, staff_repo: StaffRepository, sales_repo: SalesRepository) -> Self {
        Self {
            finance_repo,
            staff_repo,
            sales_repo,
        }
    }

    /// Razões de despesa do mês, em precisão cheia.
    ///
    /// A receita base é o faturamento do mês. Sem faturamento, o cálculo
    /// recorre à estimativa de `2 × (fixas + variáveis)`.
    pub async fn expense_ratios(&self, client_id: Uuid, year: i32, month: u32) -> Result<ExpenseRatios, AppError> {
        let (fixed, variable, employees, sales) = tokio::try_join!(
            self.finance_repo.list_fixed_expenses(client_id),
            self.finance_repo.list_variable_expenses(client_id),
            self.staff_repo.list_employees(client_id),
            self.sales_repo.list_sales(client_id),
        )?;

        let revenue = SalesSummary::from_sales(in_month(&sales, year, month)).revenue;
        let ratios = compute_ratios(&fixed, in_month(&variable, year, month), &employees, revenue);

        tracing::debug!(
            %client_id, year, month,
            total_pct = %ratios.total_pct,
            used_estimate = ratios.used_estimate,
            "Razões de despesa calculadas"
        );

        Ok(ratios)
    }

    // --- DESPESAS FIXAS ---

    pub async fn list_fixed(&self, client_id: Uuid) -> Result<Vec<FixedExpense>, AppError> {
        self.finance_repo.list_fixed_expenses(client_id).await
    }

    pub async fn create_fixed(
        &self,
        client_id: Uuid,
        payload: &CreateFixedExpenseRequest,
    ) -> Result<FixedExpense, AppError> {
        self.finance_repo.create_fixed_expense(client_id, payload).await
    }

    pub async fn update_fixed(
        &self,
        client_id: Uuid,
        id: Uuid,
        payload: &UpdateFixedExpenseRequest,
    ) -> Result<FixedExpense, AppError> {
        self.finance_repo
            .update_fixed_expense(client_id, id, payload)
            .await?
            .ok_or(AppError::NotFound("Despesa fixa"))
    }

    pub async fn delete_fixed(&self, client_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.finance_repo.delete_fixed_expense(client_id, id).await? {
            return Err(AppError::NotFound("Despesa fixa"));
        }
        Ok(())
    }

    // --- DESPESAS VARIÁVEIS ---

    pub async fn list_variable(&self, client_id: Uuid) -> Result<Vec<VariableExpense>, AppError> {
        self.finance_repo.list_variable_expenses(client_id).await
    }

    pub async fn create_variable(
        &self,
        client_id: Uuid,
        payload: &CreateVariableExpenseRequest,
    ) -> Result<VariableExpense, AppError> {
        self.finance_repo.create_variable_expense(client_id, payload).await
    }

    pub async fn update_variable(
        &self,
        client_id: Uuid,
        id: Uuid,
        payload: &UpdateVariableExpenseRequest,
    ) -> Result<VariableExpense, AppError> {
        self.finance_repo
            .update_variable_expense(client_id, id, payload)
            .await?
            .ok_or(AppError::NotFound("Despesa variável"))
    }

    pub async fn delete_variable(&self, client_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.finance_repo.delete_variable_expense(client_id, id).await? {
            return Err(AppError::NotFound("Despesa variável"));
        }
        Ok(())
    }

    // --- MÃO DE OBRA ---

    pub async fn list_employees(&self, client_id: Uuid) -> Result<Vec<EmployeeCost>, AppError> {
        self.staff_repo.list_employees(client_id).await
    }

    pub async fn create_employee(
        &self,
        client_id: Uuid,
        payload: &CreateEmployeeCostRequest,
    ) -> Result<EmployeeCost, AppError> {
        self.staff_repo.create_employee(client_id, payload).await
    }

    pub async fn update_employee(
        &self,
        client_id: Uuid,
        id: Uuid,
        payload: &UpdateEmployeeCostRequest,
    ) -> Result<EmployeeCost, AppError> {
        self.staff_repo
            .update_employee(client_id, id, payload)
            .await?
            .ok_or(AppError::NotFound("Colaborador"))
    }

    pub async fn delete_employee(&self, client_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.staff_repo.delete_employee(client_id, id).await? {
            return Err(AppError::NotFound("Colaborador"));
        }
        Ok(())
    }

    // --- VENDAS ---

    pub async fn list_sales(&self, client_id: Uuid) -> Result<Vec<Sale>, AppError> {
        self.sales_repo.list_sales(client_id).await
    }

    pub async fn create_sale(&self, client_id: Uuid, payload: &CreateSaleRequest) -> Result<Sale, AppError> {
        self.sales_repo.create_sale(client_id, payload).await
    }

    pub async fn update_sale(&self, client_id: Uuid, id: Uuid, payload: &UpdateSaleRequest) -> Result<Sale, AppError> {
        self.sales_repo
            .update_sale(client_id, id, payload)
            .await?
            .ok_or(AppError::NotFound("Venda"))
    }

    pub async fn delete_sale(&self, client_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.sales_repo.delete_sale(client_id, id).await? {
            return Err(AppError::NotFound("Venda"));
        }
        Ok(())
    }
}
