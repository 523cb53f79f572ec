// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ClientRepository,
    models::auth::{Claims, Client},
};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    client_repo: ClientRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(client_repo: ClientRepository, jwt_secret: String) -> Self {
        Self { client_repo, jwt_secret }
    }

    pub async fn register_client(&self, name: &str, email: &str, password: &str) -> Result<String, AppError> {
        // bcrypt é pesado; roda fora do executor assíncrono
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let client = self.client_repo.create_client(name, email, &hashed_password).await?;
        tracing::info!(client_id = %client.id, "Novo cliente registrado");

        self.create_token(client.id)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let client = self
            .client_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash = client.password_hash.clone();

        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(client.id)
    }

    /// Decodifica o token e carrega o cliente dono dele.
    pub async fn validate_token(&self, token: &str) -> Result<Client, AppError> {
        let client_id = self.decode_token(token)?;

        self.client_repo
            .find_by_id(client_id)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    fn decode_token(&self, token: &str) -> Result<Uuid, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims.sub)
    }

    fn create_token(&self, client_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: client_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // Pool preguiçoso: não abre conexão, só serve para montar o repositório.
    fn service(secret: &str) -> AuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/foodcost_test")
            .unwrap();
        AuthService::new(ClientRepository::new(pool), secret.to_string())
    }

    #[tokio::test]
    async fn token_round_trip_keeps_client_id() {
        let auth = service("segredo-de-teste");
        let client_id = Uuid::new_v4();

        let token = auth.create_token(client_id).unwrap();
        assert_eq!(auth.decode_token(&token).unwrap(), client_id);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let token = service("segredo-a").create_token(Uuid::new_v4()).unwrap();
        let result = service("segredo-b").decode_token(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let result = service("segredo").decode_token("não.é.jwt");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
