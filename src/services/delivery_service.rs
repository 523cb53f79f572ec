// src/services/delivery_service.rs

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::DeliveryConfig;
use crate::models::delivery::{AccessToken, ExternalSale, SalesQuery};

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("integração não configurada")]
    NotConfigured,

    #[error("falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("resposta {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Plataforma de delivery externa. Sem retentativas: o erro sobe para quem chamou.
#[async_trait]
pub trait DeliveryPlatform: Send + Sync {
    async fn authenticate(&self) -> Result<AccessToken, DeliveryError>;

    async fn get_sales(&self, token: &AccessToken, query: &SalesQuery) -> Result<Vec<ExternalSale>, DeliveryError>;
}

// ---
// Cliente HTTP (reqwest)
// ---

#[derive(Clone)]
pub struct HttpDeliveryClient {
    client: Client,
    config: DeliveryConfig,
}

impl HttpDeliveryClient {
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, DeliveryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(DeliveryError::Rejected {
        status: status.as_u16(),
        body,
    })
}

/// A listagem pode vir como array puro ou embrulhada em `{ "sales": [...] }`.
pub fn extract_sales(payload: serde_json::Value) -> Vec<ExternalSale> {
    match payload {
        serde_json::Value::Array(items) => items.into_iter().map(ExternalSale).collect(),
        serde_json::Value::Object(mut map) => match map.remove("sales") {
            Some(serde_json::Value::Array(items)) => items.into_iter().map(ExternalSale).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[async_trait]
impl DeliveryPlatform for HttpDeliveryClient {
    async fn authenticate(&self) -> Result<AccessToken, DeliveryError> {
        let form = [
            ("grantType", "client_credentials"),
            ("clientId", self.config.client_id.as_str()),
            ("clientSecret", self.config.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(self.url("authentication/v1.0/oauth/token"))
            .form(&form)
            .send()
            .await?;

        let token = ensure_success(response).await?.json::<AccessToken>().await?;
        tracing::info!("🔑 Token da plataforma de delivery obtido");
        Ok(token)
    }

    async fn get_sales(&self, token: &AccessToken, query: &SalesQuery) -> Result<Vec<ExternalSale>, DeliveryError> {
        let path = format!("financial/v2.0/merchants/{}/sales", query.merchant_id);

        let response = self
            .client
            .get(self.url(&path))
            .bearer_auth(&token.access_token)
            .query(&[
                ("beginSalesDate", query.begin_date.to_string()),
                ("endSalesDate", query.end_date.to_string()),
                ("page", query.page.to_string()),
            ])
            .send()
            .await?;

        let payload = ensure_success(response).await?.json::<serde_json::Value>().await?;
        Ok(extract_sales(payload))
    }
}

// ---
// Serviço
// ---

#[derive(Clone)]
pub struct DeliveryService {
    platform: Option<Arc<dyn DeliveryPlatform>>,
}

impl DeliveryService {
    pub fn new(platform: Option<Arc<dyn DeliveryPlatform>>) -> Self {
        Self { platform }
    }

    fn platform(&self) -> Result<&Arc<dyn DeliveryPlatform>, DeliveryError> {
        self.platform.as_ref().ok_or(DeliveryError::NotConfigured)
    }

    pub async fn token(&self) -> Result<AccessToken, DeliveryError> {
        self.platform()?.authenticate().await
    }

    /// Autentica e busca uma página de vendas.
    pub async fn sales(&self, query: &SalesQuery) -> Result<Vec<ExternalSale>, DeliveryError> {
        let platform = self.platform()?;
        let token = platform.authenticate().await?;
        platform.get_sales(&token, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakePlatform {
        seen_tokens: Mutex<Vec<String>>,
        fail_auth: bool,
    }

    #[async_trait]
    impl DeliveryPlatform for FakePlatform {
        async fn authenticate(&self) -> Result<AccessToken, DeliveryError> {
            if self.fail_auth {
                return Err(DeliveryError::Rejected { status: 401, body: "invalid_client".into() });
            }
            Ok(AccessToken {
                access_token: "abc".into(),
                token_type: Some("bearer".into()),
                expires_in: Some(3600),
            })
        }

        async fn get_sales(&self, token: &AccessToken, query: &SalesQuery) -> Result<Vec<ExternalSale>, DeliveryError> {
            self.seen_tokens.lock().unwrap().push(token.access_token.clone());
            Ok(vec![ExternalSale(json!({ "merchant": query.merchant_id, "page": query.page }))])
        }
    }

    fn query() -> SalesQuery {
        SalesQuery {
            merchant_id: "m-1".into(),
            begin_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            page: 2,
        }
    }

    #[tokio::test]
    async fn sales_authenticates_before_querying() {
        let fake = Arc::new(FakePlatform { seen_tokens: Mutex::new(Vec::new()), fail_auth: false });
        let service = DeliveryService::new(Some(fake.clone()));

        let sales = service.sales(&query()).await.unwrap();

        assert_eq!(sales, vec![ExternalSale(json!({ "merchant": "m-1", "page": 2 }))]);
        assert_eq!(*fake.seen_tokens.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[tokio::test]
    async fn auth_failure_is_surfaced() {
        let fake = Arc::new(FakePlatform { seen_tokens: Mutex::new(Vec::new()), fail_auth: true });
        let service = DeliveryService::new(Some(fake.clone()));

        let err = service.sales(&query()).await.unwrap_err();

        assert!(matches!(err, DeliveryError::Rejected { status: 401, .. }));
        assert!(fake.seen_tokens.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_configuration_is_reported() {
        let service = DeliveryService::new(None);
        assert!(matches!(service.token().await, Err(DeliveryError::NotConfigured)));
    }

    #[test]
    fn extracts_sales_from_both_shapes() {
        assert_eq!(extract_sales(json!([{ "id": 1 }, { "id": 2 }])).len(), 2);
        assert_eq!(extract_sales(json!({ "sales": [{ "id": 1 }], "page": 1 })).len(), 1);
        assert!(extract_sales(json!({ "unexpected": true })).is_empty());
    }

    #[test]
    fn access_token_parses_platform_payload() {
        let token: AccessToken =
            serde_json::from_value(json!({ "accessToken": "xyz", "type": "bearer", "expiresIn": 21600 })).unwrap();
        assert_eq!(token.access_token, "xyz");
        assert_eq!(token.token_type.as_deref(), Some("bearer"));
        assert_eq!(token.expires_in, Some(21600));
    }
}
