// src/db/staff_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::staff::{CreateEmployeeCostRequest, EmployeeCost, UpdateEmployeeCostRequest},
};

#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_employees(&self, client_id: Uuid) -> Result<Vec<EmployeeCost>, AppError> {
        let employees = sqlx::query_as::<_, EmployeeCost>(
            "SELECT * FROM employee_costs WHERE client_id = $1 ORDER BY professional_name ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn create_employee(
        &self,
        client_id: Uuid,
        input: &CreateEmployeeCostRequest,
    ) -> Result<EmployeeCost, AppError> {
        let employee = sqlx::query_as::<_, EmployeeCost>(
            r#"
            INSERT INTO employee_costs (
                client_id, professional_name, hourly_cost,
                base_salary, benefits, fgts, vacation, vacation_bonus, fgts_vacation,
                thirteenth_salary, fgts_thirteenth, notice_pay, fgts_notice, fgts_penalty
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(&input.professional_name)
        .bind(input.hourly_cost)
        .bind(input.base_salary)
        .bind(input.benefits)
        .bind(input.fgts)
        .bind(input.vacation)
        .bind(input.vacation_bonus)
        .bind(input.fgts_vacation)
        .bind(input.thirteenth_salary)
        .bind(input.fgts_thirteenth)
        .bind(input.notice_pay)
        .bind(input.fgts_notice)
        .bind(input.fgts_penalty)
        .fetch_one(&self.pool)
        .await?;
        Ok(employee)
    }

    pub async fn update_employee(
        &self,
        client_id: Uuid,
        id: Uuid,
        input: &UpdateEmployeeCostRequest,
    ) -> Result<Option<EmployeeCost>, AppError> {
        let employee = sqlx::query_as::<_, EmployeeCost>(
            r#"
            UPDATE employee_costs SET
                professional_name = COALESCE($3, professional_name),
                hourly_cost = COALESCE($4, hourly_cost),
                base_salary = COALESCE($5, base_salary),
                benefits = COALESCE($6, benefits),
                fgts = COALESCE($7, fgts),
                vacation = COALESCE($8, vacation),
                vacation_bonus = COALESCE($9, vacation_bonus),
                fgts_vacation = COALESCE($10, fgts_vacation),
                thirteenth_salary = COALESCE($11, thirteenth_salary),
                fgts_thirteenth = COALESCE($12, fgts_thirteenth),
                notice_pay = COALESCE($13, notice_pay),
                fgts_notice = COALESCE($14, fgts_notice),
                fgts_penalty = COALESCE($15, fgts_penalty),
                updated_at = NOW()
            WHERE id = $1 AND client_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(&input.professional_name)
        .bind(input.hourly_cost)
        .bind(input.base_salary)
        .bind(input.benefits)
        .bind(input.fgts)
        .bind(input.vacation)
        .bind(input.vacation_bonus)
        .bind(input.fgts_vacation)
        .bind(input.thirteenth_salary)
        .bind(input.fgts_thirteenth)
        .bind(input.notice_pay)
        .bind(input.fgts_notice)
        .bind(input.fgts_penalty)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    pub async fn delete_employee(&self, client_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM employee_costs WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
