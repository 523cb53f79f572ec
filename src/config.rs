// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{ClientRepository, FinanceRepository, InventoryRepository, ProductRepository, SalesRepository, StaffRepository},
    services::{
        auth::AuthService,
        dashboard_service::DashboardService,
        delivery_service::{DeliveryPlatform, DeliveryService, HttpDeliveryClient},
        finance_service::FinanceService,
        inventory_service::InventoryService,
        product_service::ProductService,
    },
};

#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub delivery: Option<DeliveryConfig>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value
                .parse()
                .context("DATABASE_MAX_CONNECTIONS deve ser um número inteiro")?,
            Err(_) => 5,
        };

        // A integração de delivery é opcional: só liga com as três variáveis.
        let delivery = match (
            env::var("DELIVERY_BASE_URL"),
            env::var("DELIVERY_CLIENT_ID"),
            env::var("DELIVERY_CLIENT_SECRET"),
        ) {
            (Ok(base_url), Ok(client_id), Ok(client_secret)) => Some(DeliveryConfig {
                base_url,
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            max_connections,
            delivery,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub product_service: ProductService,
    pub finance_service: FinanceService,
    pub dashboard_service: DashboardService,
    pub delivery_service: DeliveryService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, config: &Config) -> Self {
        let client_repo = ClientRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let staff_repo = StaffRepository::new(db_pool.clone());
        let sales_repo = SalesRepository::new(db_pool.clone());

        let auth_service = AuthService::new(client_repo, config.jwt_secret.clone());
        let inventory_service = InventoryService::new(inventory_repo.clone(), db_pool.clone());
        let finance_service = FinanceService::new(finance_repo.clone(), staff_repo.clone(), sales_repo.clone());
        let product_service = ProductService::new(product_repo.clone(), inventory_repo.clone(), finance_service.clone());
        let dashboard_service = DashboardService::new(inventory_repo, product_repo, finance_repo, staff_repo, sales_repo);

        let platform = config.delivery.clone().map(|delivery| {
            tracing::info!(base_url = %delivery.base_url, "Integração de delivery habilitada");
            Arc::new(HttpDeliveryClient::new(delivery)) as Arc<dyn DeliveryPlatform>
        });
        let delivery_service = DeliveryService::new(platform);

        Self {
            db_pool,
            auth_service,
            inventory_service,
            product_service,
            finance_service,
            dashboard_service,
            delivery_service,
        }
    }
}
