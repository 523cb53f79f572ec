// src/services/inventory_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    engine::{dashboard::low_stock, recipe::selectable_materials, PriceBook},
    models::{
        dashboard::LowStockMaterial,
        inventory::{
            CreatePurchaseRequest, CreateRawMaterialRequest, RawMaterial, RawMaterialPurchase,
            SelectableMaterial, UpdateRawMaterialRequest,
        },
    },
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, pool: PgPool) -> Self {
        Self { inventory_repo, pool }
    }

    // --- MATÉRIAS-PRIMAS ---

    pub async fn list_materials(&self, client_id: Uuid) -> Result<Vec<RawMaterial>, AppError> {
        self.inventory_repo.list_materials(client_id).await
    }

    pub async fn create_material(
        &self,
        client_id: Uuid,
        payload: &CreateRawMaterialRequest,
    ) -> Result<RawMaterial, AppError> {
        self.inventory_repo.create_material(client_id, payload).await
    }

    pub async fn update_material(
        &self,
        client_id: Uuid,
        id: Uuid,
        payload: &UpdateRawMaterialRequest,
    ) -> Result<RawMaterial, AppError> {
        self.inventory_repo
            .update_material(client_id, id, payload)
            .await?
            .ok_or(AppError::NotFound("Matéria-prima"))
    }

    pub async fn delete_material(&self, client_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.inventory_repo.delete_material(client_id, id).await? {
            return Err(AppError::NotFound("Matéria-prima"));
        }
        Ok(())
    }

    /// Matérias-primas com histórico de compra, já com o preço vigente.
    pub async fn selectable(&self, client_id: Uuid) -> Result<Vec<SelectableMaterial>, AppError> {
        let (materials, purchases) = tokio::try_join!(
            self.inventory_repo.list_materials(client_id),
            self.inventory_repo.list_purchases(client_id),
        )?;

        let prices = PriceBook::from_purchases(&purchases);
        Ok(selectable_materials(&materials, &prices))
    }

    pub async fn low_stock(&self, client_id: Uuid) -> Result<Vec<LowStockMaterial>, AppError> {
        let materials = self.inventory_repo.list_materials(client_id).await?;
        Ok(low_stock(&materials))
    }

    // --- COMPRAS ---

    pub async fn list_purchases(&self, client_id: Uuid) -> Result<Vec<RawMaterialPurchase>, AppError> {
        self.inventory_repo.list_purchases(client_id).await
    }

    /// Grava a compra e soma a quantidade ao estoque, tudo na mesma transação.
    pub async fn register_purchase(
        &self,
        client_id: Uuid,
        payload: &CreatePurchaseRequest,
    ) -> Result<RawMaterialPurchase, AppError> {
        let mut tx = self.pool.begin().await?;

        // Atualiza o estoque primeiro: se a matéria-prima não é do cliente, nada é gravado
        let material = self
            .inventory_repo
            .add_to_stock(&mut *tx, client_id, payload.raw_material_id, payload.quantity)
            .await?
            .ok_or(AppError::NotFound("Matéria-prima"))?;

        let purchase = self
            .inventory_repo
            .create_purchase(
                &mut *tx,
                client_id,
                material.id,
                payload.quantity,
                payload.unit_price,
                payload.purchase_date,
                payload.supplier.as_deref(),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            raw_material_id = %material.id,
            quantity = %payload.quantity,
            current_stock = %material.current_stock,
            "Compra registrada"
        );

        Ok(purchase)
    }

    // O estoque não é estornado ao excluir uma compra.
    pub async fn delete_purchase(&self, client_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.inventory_repo.delete_purchase(client_id, id).await? {
            return Err(AppError::NotFound("Compra"));
        }
        Ok(())
    }
}
