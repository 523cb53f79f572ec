// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::products::{IngredientUsage, Product},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

// Campos já resolvidos pelo serviço (ingredientes com preço e custo)
pub struct ProductFields<'a> {
    pub name: Option<&'a str>,
    pub category: Option<&'a str>,
    pub ingredients: Option<&'a [IngredientUsage]>,
    pub selling_price: Option<Decimal>,
    pub target_margin: Option<Decimal>,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_products(&self, client_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE client_id = $1 ORDER BY name ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_product(&self, client_id: Uuid, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    pub async fn create_product(
        &self,
        client_id: Uuid,
        name: &str,
        category: Option<&str>,
        ingredients: &[IngredientUsage],
        selling_price: Decimal,
        target_margin: Decimal,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (client_id, name, category, ingredients, selling_price, target_margin)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(name)
        .bind(category)
        .bind(Json(ingredients))
        .bind(selling_price)
        .bind(target_margin)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn update_product(
        &self,
        client_id: Uuid,
        id: Uuid,
        fields: ProductFields<'_>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                ingredients = COALESCE($5, ingredients),
                selling_price = COALESCE($6, selling_price),
                target_margin = COALESCE($7, target_margin),
                updated_at = NOW()
            WHERE id = $1 AND client_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(fields.name)
        .bind(fields.category)
        .bind(fields.ingredients.map(Json))
        .bind(fields.selling_price)
        .bind(fields.target_margin)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn delete_product(&self, client_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
