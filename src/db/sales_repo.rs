// src/db/sales_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{CreateSaleRequest, Sale, UpdateSaleRequest},
};

#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_sales(&self, client_id: Uuid) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT * FROM sales WHERE client_id = $1 ORDER BY sale_date DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    pub async fn create_sale(&self, client_id: Uuid, input: &CreateSaleRequest) -> Result<Sale, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (client_id, sale_date, total_amount, orders_count, average_ticket, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(input.sale_date)
        .bind(input.total_amount)
        .bind(input.orders_count)
        .bind(input.average_ticket)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(sale)
    }

    pub async fn update_sale(
        &self,
        client_id: Uuid,
        id: Uuid,
        input: &UpdateSaleRequest,
    ) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales SET
                sale_date = COALESCE($3, sale_date),
                total_amount = COALESCE($4, total_amount),
                orders_count = COALESCE($5, orders_count),
                average_ticket = COALESCE($6, average_ticket),
                notes = COALESCE($7, notes)
            WHERE id = $1 AND client_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(input.sale_date)
        .bind(input.total_amount)
        .bind(input.orders_count)
        .bind(input.average_ticket)
        .bind(&input.notes)
        .fetch_optional(&self.pool)
        .await?;
        Ok(sale)
    }

    pub async fn delete_sale(&self, client_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
