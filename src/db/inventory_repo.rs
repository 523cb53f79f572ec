// src/db/inventory_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{CreateRawMaterialRequest, RawMaterial, RawMaterialPurchase, UpdateRawMaterialRequest},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  MATÉRIAS-PRIMAS
    // =========================================================================

    pub async fn list_materials(&self, client_id: Uuid) -> Result<Vec<RawMaterial>, AppError> {
        let materials = sqlx::query_as::<_, RawMaterial>(
            "SELECT * FROM raw_materials WHERE client_id = $1 ORDER BY name ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(materials)
    }

    pub async fn create_material(
        &self,
        client_id: Uuid,
        input: &CreateRawMaterialRequest,
    ) -> Result<RawMaterial, AppError> {
        let material = sqlx::query_as::<_, RawMaterial>(
            r#"
            INSERT INTO raw_materials (client_id, name, category, base_unit, current_stock, minimum_stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.base_unit)
        .bind(input.current_stock)
        .bind(input.minimum_stock)
        .fetch_one(&self.pool)
        .await?;
        Ok(material)
    }

    /// Atualização parcial: campos ausentes mantêm o valor atual.
    pub async fn update_material(
        &self,
        client_id: Uuid,
        id: Uuid,
        input: &UpdateRawMaterialRequest,
    ) -> Result<Option<RawMaterial>, AppError> {
        let material = sqlx::query_as::<_, RawMaterial>(
            r#"
            UPDATE raw_materials SET
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                base_unit = COALESCE($5, base_unit),
                current_stock = COALESCE($6, current_stock),
                minimum_stock = COALESCE($7, minimum_stock),
                updated_at = NOW()
            WHERE id = $1 AND client_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.base_unit)
        .bind(input.current_stock)
        .bind(input.minimum_stock)
        .fetch_optional(&self.pool)
        .await?;
        Ok(material)
    }

    pub async fn delete_material(&self, client_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM raw_materials WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soma (ou subtrai) quantidade no estoque atual. Roda dentro de transação.
    pub async fn add_to_stock<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        id: Uuid,
        quantity_changed: Decimal,
    ) -> Result<Option<RawMaterial>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, RawMaterial>(
            r#"
            UPDATE raw_materials
            SET current_stock = current_stock + $3, updated_at = NOW()
            WHERE id = $1 AND client_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(quantity_changed)
        .fetch_optional(executor)
        .await?;
        Ok(material)
    }

    // =========================================================================
    //  COMPRAS
    // =========================================================================

    pub async fn list_purchases(&self, client_id: Uuid) -> Result<Vec<RawMaterialPurchase>, AppError> {
        let purchases = sqlx::query_as::<_, RawMaterialPurchase>(
            r#"
            SELECT * FROM raw_material_purchases
            WHERE client_id = $1
            ORDER BY purchase_date DESC, created_at DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(purchases)
    }

    pub async fn create_purchase<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        raw_material_id: Uuid,
        quantity: Decimal,
        unit_price: Decimal,
        purchase_date: NaiveDate,
        supplier: Option<&str>,
    ) -> Result<RawMaterialPurchase, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let purchase = sqlx::query_as::<_, RawMaterialPurchase>(
            r#"
            INSERT INTO raw_material_purchases
                (client_id, raw_material_id, quantity, unit_price, total_cost, purchase_date, supplier)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(raw_material_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(quantity * unit_price)
        .bind(purchase_date)
        .bind(supplier)
        .fetch_one(executor)
        .await?;
        Ok(purchase)
    }

    pub async fn delete_purchase(&self, client_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM raw_material_purchases WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
