// src/db/finance_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{
        CreateFixedExpenseRequest, CreateVariableExpenseRequest, FixedExpense, UpdateFixedExpenseRequest,
        UpdateVariableExpenseRequest, VariableExpense,
    },
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  DESPESAS FIXAS
    // =========================================================================

    pub async fn list_fixed_expenses(&self, client_id: Uuid) -> Result<Vec<FixedExpense>, AppError> {
        let expenses = sqlx::query_as::<_, FixedExpense>(
            "SELECT * FROM fixed_expenses WHERE client_id = $1 ORDER BY name ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    pub async fn create_fixed_expense(
        &self,
        client_id: Uuid,
        input: &CreateFixedExpenseRequest,
    ) -> Result<FixedExpense, AppError> {
        let expense = sqlx::query_as::<_, FixedExpense>(
            r#"
            INSERT INTO fixed_expenses (client_id, name, category, amount, frequency, due_day, active, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.amount)
        .bind(input.frequency)
        .bind(input.due_day)
        .bind(input.active)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(expense)
    }

    pub async fn update_fixed_expense(
        &self,
        client_id: Uuid,
        id: Uuid,
        input: &UpdateFixedExpenseRequest,
    ) -> Result<Option<FixedExpense>, AppError> {
        let expense = sqlx::query_as::<_, FixedExpense>(
            r#"
            UPDATE fixed_expenses SET
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                amount = COALESCE($5, amount),
                frequency = COALESCE($6, frequency),
                due_day = COALESCE($7, due_day),
                active = COALESCE($8, active),
                description = COALESCE($9, description),
                updated_at = NOW()
            WHERE id = $1 AND client_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.amount)
        .bind(input.frequency)
        .bind(input.due_day)
        .bind(input.active)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(expense)
    }

    pub async fn delete_fixed_expense(&self, client_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM fixed_expenses WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  DESPESAS VARIÁVEIS
    // =========================================================================

    pub async fn list_variable_expenses(&self, client_id: Uuid) -> Result<Vec<VariableExpense>, AppError> {
        let expenses = sqlx::query_as::<_, VariableExpense>(
            "SELECT * FROM variable_expenses WHERE client_id = $1 ORDER BY expense_date DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    pub async fn create_variable_expense(
        &self,
        client_id: Uuid,
        input: &CreateVariableExpenseRequest,
    ) -> Result<VariableExpense, AppError> {
        let expense = sqlx::query_as::<_, VariableExpense>(
            r#"
            INSERT INTO variable_expenses (client_id, name, category, amount, expense_date, payment_method, receipt_ref)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.amount)
        .bind(input.expense_date)
        .bind(&input.payment_method)
        .bind(&input.receipt_ref)
        .fetch_one(&self.pool)
        .await?;
        Ok(expense)
    }

    pub async fn update_variable_expense(
        &self,
        client_id: Uuid,
        id: Uuid,
        input: &UpdateVariableExpenseRequest,
    ) -> Result<Option<VariableExpense>, AppError> {
        let expense = sqlx::query_as::<_, VariableExpense>(
            r#"
            UPDATE variable_expenses SET
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                amount = COALESCE($5, amount),
                expense_date = COALESCE($6, expense_date),
                payment_method = COALESCE($7, payment_method),
                receipt_ref = COALESCE($8, receipt_ref)
            WHERE id = $1 AND client_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.amount)
        .bind(input.expense_date)
        .bind(&input.payment_method)
        .bind(&input.receipt_ref)
        .fetch_optional(&self.pool)
        .await?;
        Ok(expense)
    }

    pub async fn delete_variable_expense(&self, client_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM variable_expenses WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
